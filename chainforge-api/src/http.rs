//! Shared HTTP plumbing for the REST client.
//!
//! Request execution, response logging, and retry with exponential backoff
//! live here so the endpoint methods stay focused on wire types.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Maximum response-body length echoed into debug logs.
const LOG_BODY_LIMIT: usize = 512;

fn truncate_for_log(body: &str) -> &str {
    if body.len() <= LOG_BODY_LIMIT {
        return body;
    }
    let mut end = LOG_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Executes a request and returns `(status_code, body)`.
///
/// HTTP 429 and 502–504 are mapped to transient errors here; other error
/// statuses are left to the caller, which knows the endpoint semantics
/// (e.g. whether 404 means [`ApiError::NotFound`]).
pub(crate) async fn execute(
    request: RequestBuilder,
    method: &str,
    endpoint: &str,
) -> Result<(u16, String), ApiError> {
    log::debug!("{method} {endpoint}");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        } else {
            ApiError::Transport {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status().as_u16();
    log::debug!("{endpoint} -> HTTP {status}");

    // Capture Retry-After before the body consumes the response.
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status == 429 {
        log::warn!("{endpoint} rate limited, retry_after={retry_after:?}");
        return Err(ApiError::RateLimited {
            endpoint: endpoint.to_string(),
            retry_after,
        });
    }

    if matches!(status, 502..=504) {
        let body = response.text().await.unwrap_or_default();
        log::warn!("{endpoint} upstream error (HTTP {status})");
        return Err(ApiError::Transport {
            endpoint: endpoint.to_string(),
            detail: format!("HTTP {status}: {body}"),
        });
    }

    let body = response.text().await.map_err(|e| ApiError::Transport {
        endpoint: endpoint.to_string(),
        detail: format!("failed to read response body: {e}"),
    })?;

    log::debug!("{endpoint} body: {}", truncate_for_log(&body));

    Ok((status, body))
}

/// Executes a request, retrying transient failures with exponential backoff.
///
/// Backoff: 100ms, 200ms, 400ms, ... capped at 10s; a `Retry-After` hint
/// from the server takes precedence (capped at 30s). Non-transient errors
/// are returned immediately.
pub(crate) async fn execute_with_retry(
    request: RequestBuilder,
    method: &str,
    endpoint: &str,
    max_retries: u32,
) -> Result<(u16, String), ApiError> {
    if max_retries == 0 {
        return execute(request, method, endpoint).await;
    }

    let mut last_error = None;

    for attempt in 0..=max_retries {
        // RequestBuilder is single-use; a streaming body cannot be cloned.
        let Some(req) = request.try_clone() else {
            log::warn!("{endpoint}: request not cloneable, retry disabled");
            return execute(request, method, endpoint).await;
        };

        match execute(req, method, endpoint).await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries && e.is_transient() => {
                let delay = retry_delay(&e, attempt);
                log::warn!(
                    "{endpoint} failed (attempt {}/{max_retries}), retrying in {:.1}s: {e}",
                    attempt + 1,
                    delay.as_secs_f32(),
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| ApiError::Transport {
        endpoint: endpoint.to_string(),
        detail: "all retries exhausted with no error captured".to_string(),
    }))
}

/// Parses a JSON response body.
pub(crate) fn parse_json<T>(body: &str, endpoint: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("{endpoint}: JSON parse failed: {e}");
        log::error!("{endpoint}: raw response: {}", truncate_for_log(body));
        ApiError::Parse {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    })
}

fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // keep 1 << attempt in range
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
