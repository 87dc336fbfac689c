//! REST implementation of [`NetworkApi`].
//!
//! Talks to the platform's endpoints (`/networks`, `/networks/{id}` plus the
//! `deploy`/`backups`/`restore` action routes). Transient failures are
//! retried by the shared HTTP plumbing; everything else is mapped to a
//! structured [`ApiError`] for the lifecycle layer to interpret.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http;
use crate::traits::NetworkApi;
use crate::types::{BackupReceipt, Network, NetworkDraft, NetworkPatch};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default retry count for transient failures.
const DEFAULT_MAX_RETRIES: u32 = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest<'a> {
    environment: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RestoreRequest<'a> {
    backup_id: &'a str,
}

/// REST client for the network platform API.
pub struct RestNetworkApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
    max_retries: u32,
}

impl RestNetworkApi {
    /// Creates a client for the given API base URL (e.g.
    /// `https://forge.example.com/api`). A trailing slash is trimmed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: "client".to_string(),
                detail: e.to_string(),
            })?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            bearer_token: None,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Attaches a bearer token sent with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Overrides the transient-failure retry count (0 disables retries).
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Serializes a request body up front so failures surface as
    /// [`ApiError::Serialization`] instead of a transport error at send time.
    fn json_body<T: Serialize>(value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Dispatches a request and returns `(status, body)` with transient
    /// retry applied.
    async fn dispatch(
        &self,
        builder: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<(u16, String)> {
        http::execute_with_retry(self.authed(builder), method, path, self.max_retries).await
    }

    /// Maps a terminal response to a parsed body or a structured error.
    fn decode<T: serde::de::DeserializeOwned>(
        status: u16,
        body: &str,
        path: &str,
        resource: &str,
    ) -> Result<T> {
        match status {
            200..=299 => http::parse_json(body, path),
            404 => Err(ApiError::NotFound {
                resource: resource.to_string(),
            }),
            _ => Err(ApiError::Rejected {
                endpoint: path.to_string(),
                status,
                message: body.to_string(),
            }),
        }
    }

    /// Like [`Self::decode`] but for endpoints with no response body.
    fn expect_ok(status: u16, body: &str, path: &str, resource: &str) -> Result<()> {
        match status {
            200..=299 => Ok(()),
            404 => Err(ApiError::NotFound {
                resource: resource.to_string(),
            }),
            _ => Err(ApiError::Rejected {
                endpoint: path.to_string(),
                status,
                message: body.to_string(),
            }),
        }
    }
}

#[async_trait]
impl NetworkApi for RestNetworkApi {
    async fn list_networks(&self) -> Result<Vec<Network>> {
        let path = "/networks";
        let (status, body) = self
            .dispatch(self.client.get(self.url(path)), "GET", path)
            .await?;
        Self::decode(status, &body, path, "networks")
    }

    async fn get_network(&self, id: &str) -> Result<Option<Network>> {
        let path = format!("/networks/{id}");
        let (status, body) = self
            .dispatch(self.client.get(self.url(&path)), "GET", &path)
            .await?;
        // A reachable remote without the record is a regular outcome here,
        // not an error.
        if status == 404 {
            return Ok(None);
        }
        Self::decode(status, &body, &path, &format!("network {id}")).map(Some)
    }

    async fn create_network(&self, draft: &NetworkDraft) -> Result<Network> {
        let path = "/networks";
        let request = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(Self::json_body(draft)?);
        let (status, body) = self.dispatch(request, "POST", path).await?;
        Self::decode(status, &body, path, "networks")
    }

    async fn update_network(&self, id: &str, patch: &NetworkPatch) -> Result<Network> {
        let path = format!("/networks/{id}");
        let request = self
            .client
            .put(self.url(&path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(Self::json_body(patch)?);
        let (status, body) = self.dispatch(request, "PUT", &path).await?;
        Self::decode(status, &body, &path, &format!("network {id}"))
    }

    async fn delete_network(&self, id: &str) -> Result<()> {
        let path = format!("/networks/{id}");
        let (status, body) = self
            .dispatch(self.client.delete(self.url(&path)), "DELETE", &path)
            .await?;
        // Deleting an already-absent record is treated as success.
        if status == 404 {
            return Ok(());
        }
        Self::expect_ok(status, &body, &path, &format!("network {id}"))
    }

    async fn trigger_deploy(&self, id: &str, environment: &str) -> Result<()> {
        let path = format!("/networks/{id}/deploy");
        let request = self
            .client
            .post(self.url(&path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(Self::json_body(&DeployRequest { environment })?);
        let (status, body) = self.dispatch(request, "POST", &path).await?;
        Self::expect_ok(status, &body, &path, &format!("network {id}"))
    }

    async fn create_backup(&self, id: &str) -> Result<BackupReceipt> {
        let path = format!("/networks/{id}/backups");
        let (status, body) = self
            .dispatch(self.client.post(self.url(&path)), "POST", &path)
            .await?;
        Self::decode(status, &body, &path, &format!("network {id}"))
    }

    async fn trigger_restore(&self, id: &str, backup_id: &str) -> Result<()> {
        let path = format!("/networks/{id}/restore");
        let request = self
            .client
            .post(self.url(&path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(Self::json_body(&RestoreRequest { backup_id })?);
        let (status, body) = self.dispatch(request, "POST", &path).await?;
        Self::expect_ok(status, &body, &path, &format!("network {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api = RestNetworkApi::new("https://forge.example.com/api/").unwrap();
        assert_eq!(api.url("/networks"), "https://forge.example.com/api/networks");
    }

    #[test]
    fn deploy_request_wire_shape() {
        let json = serde_json::to_value(DeployRequest { environment: "aws" }).unwrap();
        assert_eq!(json, serde_json::json!({ "environment": "aws" }));
    }

    #[test]
    fn restore_request_uses_camel_case() {
        let json = serde_json::to_value(RestoreRequest { backup_id: "b-1" }).unwrap();
        assert_eq!(json, serde_json::json!({ "backupId": "b-1" }));
    }

    #[test]
    fn json_body_maps_failures_to_serialization_error() {
        struct Unserializable;
        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(
                &self,
                _serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("refuses to serialize"))
            }
        }

        let result = RestNetworkApi::json_body(&Unserializable);
        assert!(matches!(result, Err(ApiError::Serialization(_))));
    }

    #[test]
    fn decode_maps_404_to_not_found() {
        let result: Result<Network> =
            RestNetworkApi::decode(404, "", "/networks/n1", "network n1");
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[test]
    fn decode_maps_other_errors_to_rejected() {
        let result: Result<Network> =
            RestNetworkApi::decode(400, "bad draft", "/networks", "networks");
        assert!(
            matches!(result, Err(ApiError::Rejected { status: 400, .. })),
        );
    }
}
