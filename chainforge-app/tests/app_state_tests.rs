#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the offline lifecycle flow.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use chainforge_api::{
    ApiError, BackupReceipt, GovernanceSettings, ModuleSelection, Network, NetworkApi,
    NetworkDraft, NetworkPatch, NetworkStatus, TokenEconomics, ValidatorRequirements,
};
use chainforge_core::error::CoreError;
use chainforge_core::services::LifecycleConfig;
use chainforge_core::traits::StaticCatalog;

use chainforge_app::AppStateBuilder;

// ===== Mock implementations =====

/// Remote that is never reachable.
struct OfflineApi;

fn refused(endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        detail: "connection refused".to_string(),
    }
}

#[async_trait]
impl NetworkApi for OfflineApi {
    async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        Err(refused("/networks"))
    }
    async fn get_network(&self, _id: &str) -> Result<Option<Network>, ApiError> {
        Err(refused("/networks/{id}"))
    }
    async fn create_network(&self, _draft: &NetworkDraft) -> Result<Network, ApiError> {
        Err(refused("/networks"))
    }
    async fn update_network(&self, _id: &str, _patch: &NetworkPatch) -> Result<Network, ApiError> {
        Err(refused("/networks/{id}"))
    }
    async fn delete_network(&self, _id: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}"))
    }
    async fn trigger_deploy(&self, _id: &str, _environment: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}/deploy"))
    }
    async fn create_backup(&self, _id: &str) -> Result<BackupReceipt, ApiError> {
        Err(refused("/networks/{id}/backups"))
    }
    async fn trigger_restore(&self, _id: &str, _backup_id: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}/restore"))
    }
}

/// Remote serving a fixed, read-only collection.
struct FixedApi {
    networks: Vec<Network>,
}

#[async_trait]
impl NetworkApi for FixedApi {
    async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        Ok(self.networks.clone())
    }
    async fn get_network(&self, id: &str) -> Result<Option<Network>, ApiError> {
        Ok(self.networks.iter().find(|n| n.id == id).cloned())
    }
    async fn create_network(&self, _draft: &NetworkDraft) -> Result<Network, ApiError> {
        Err(refused("/networks"))
    }
    async fn update_network(&self, _id: &str, _patch: &NetworkPatch) -> Result<Network, ApiError> {
        Err(refused("/networks/{id}"))
    }
    async fn delete_network(&self, _id: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}"))
    }
    async fn trigger_deploy(&self, _id: &str, _environment: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}/deploy"))
    }
    async fn create_backup(&self, _id: &str) -> Result<BackupReceipt, ApiError> {
        Err(refused("/networks/{id}/backups"))
    }
    async fn trigger_restore(&self, _id: &str, _backup_id: &str) -> Result<(), ApiError> {
        Err(refused("/networks/{id}/restore"))
    }
}

fn sample_network(id: &str) -> Network {
    let now = Utc::now();
    Network {
        id: id.to_string(),
        name: format!("{id} net"),
        chain_id: format!("{id}-1"),
        description: String::new(),
        status: NetworkStatus::Active,
        token_economics: TokenEconomics::default(),
        validator_requirements: ValidatorRequirements::default(),
        governance_settings: GovernanceSettings::default(),
        modules: ModuleSelection::default(),
        deployed_environment: None,
        last_backup_at: None,
        created_at: now,
        updated_at: now,
        error: None,
        metrics: None,
        validators: None,
    }
}

fn complete_draft(name: &str) -> NetworkDraft {
    NetworkDraft {
        name: name.to_string(),
        chain_id: format!("{name}-1"),
        description: String::new(),
        token_economics: TokenEconomics::default(),
        validator_requirements: ValidatorRequirements::default(),
        governance_settings: GovernanceSettings::default(),
        modules: ModuleSelection::default(),
    }
}

fn fast_config() -> LifecycleConfig {
    LifecycleConfig {
        deploy_delay: Duration::from_millis(500),
        restore_delay: Duration::from_millis(300),
    }
}

// ===== Builder =====

#[test]
fn build_without_api_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn startup_online_loads_remote_collection() {
    let api = FixedApi {
        networks: vec![sample_network("r1"), sample_network("r2")],
    };
    let state = AppStateBuilder::new().api(Arc::new(api)).build().unwrap();

    state.run_startup().await;
    let networks = state.network_service.list().await;
    assert_eq!(networks.len(), 2);
}

#[tokio::test]
async fn startup_offline_seeds_builtin_catalog() {
    let state = AppStateBuilder::new()
        .api(Arc::new(OfflineApi))
        .build()
        .unwrap();

    state.run_startup().await;
    let networks = state.network_service.list().await;
    assert_eq!(networks.len(), 2);
    assert!(networks.iter().any(|n| n.id == "cosmoshub-devnet"));
}

#[tokio::test]
async fn custom_fallback_catalog_is_honored() {
    let catalog = StaticCatalog::new(vec![sample_network("seed-only")]);
    let state = AppStateBuilder::new()
        .api(Arc::new(OfflineApi))
        .fallback(Arc::new(catalog))
        .build()
        .unwrap();

    state.run_startup().await;
    let networks = state.network_service.list().await;
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].id, "seed-only");
}

// ===== Offline end-to-end lifecycle =====

#[tokio::test(start_paused = true)]
async fn full_lifecycle_works_entirely_offline() {
    let state = AppStateBuilder::new()
        .api(Arc::new(OfflineApi))
        .fallback(Arc::new(StaticCatalog::new(Vec::new())))
        .lifecycle_config(fast_config())
        .build()
        .unwrap();
    state.run_startup().await;
    let svc = &state.network_service;

    // Create degrades to a locally generated record.
    let network = svc.create(complete_draft("offline-chain")).await;
    assert_eq!(network.status, NetworkStatus::Created);

    // Deploy flips to Deploying immediately and Active after the delay.
    let deploying = svc.deploy(&network.id, "aws").await.unwrap();
    assert_eq!(deploying.status, NetworkStatus::Deploying);
    assert_eq!(deploying.deployed_environment.as_deref(), Some("aws"));
    tokio::time::sleep(fast_config().deploy_delay + Duration::from_millis(10)).await;
    assert_eq!(
        svc.get(&network.id).await.unwrap().status,
        NetworkStatus::Active,
    );

    // Backup issues a local receipt without touching status.
    let backup_id = svc.backup(&network.id).await.unwrap();
    assert!(backup_id.starts_with("local-"));
    assert_eq!(
        svc.get(&network.id).await.unwrap().status,
        NetworkStatus::Active,
    );

    // Restore mirrors deploy.
    let restoring = svc.restore(&network.id, &backup_id).await.unwrap();
    assert_eq!(restoring.status, NetworkStatus::Restoring);
    tokio::time::sleep(fast_config().restore_delay + Duration::from_millis(10)).await;
    assert_eq!(
        svc.get(&network.id).await.unwrap().status,
        NetworkStatus::Active,
    );

    // Delete removes the record and clears the selection.
    svc.delete(&network.id).await;
    assert!(svc.list().await.is_empty());
    assert!(svc.selected().await.is_none());
}
