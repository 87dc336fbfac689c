//! Test helpers: mock remote API and service factories.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use chainforge_api::{
    ApiError, BackupReceipt, GovernanceSettings, ModuleSelection, Network, NetworkApi,
    NetworkDraft, NetworkPatch, NetworkStatus, TokenEconomics, ValidatorRequirements,
};

use crate::services::{LifecycleConfig, NetworkService};
use crate::traits::StaticCatalog;

// ===== MockNetworkApi =====

/// In-memory stand-in for the remote platform API.
///
/// Flip [`set_offline`](Self::set_offline) to make every call fail with a
/// transport error, modeling an unreachable remote.
pub struct MockNetworkApi {
    remote: RwLock<HashMap<String, Network>>,
    offline: AtomicBool,
    next_id: AtomicU64,
    deploy_calls: RwLock<Vec<(String, String)>>,
    restore_calls: RwLock<Vec<(String, String)>>,
}

impl MockNetworkApi {
    pub fn new() -> Self {
        Self {
            remote: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            deploy_calls: RwLock::new(Vec::new()),
            restore_calls: RwLock::new(Vec::new()),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seeds a record into the simulated remote store.
    pub async fn seed(&self, network: Network) {
        self.remote
            .write()
            .await
            .insert(network.id.clone(), network);
    }

    pub async fn deploy_calls(&self) -> Vec<(String, String)> {
        self.deploy_calls.read().await.clone()
    }

    pub async fn restore_calls(&self) -> Vec<(String, String)> {
        self.restore_calls.read().await.clone()
    }

    fn check_online(&self, endpoint: &str) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport {
                endpoint: endpoint.to_string(),
                detail: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockNetworkApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkApi for MockNetworkApi {
    async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        self.check_online("/networks")?;
        Ok(self.remote.read().await.values().cloned().collect())
    }

    async fn get_network(&self, id: &str) -> Result<Option<Network>, ApiError> {
        self.check_online("/networks/{id}")?;
        Ok(self.remote.read().await.get(id).cloned())
    }

    async fn create_network(&self, draft: &NetworkDraft) -> Result<Network, ApiError> {
        self.check_online("/networks")?;
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let network = Network {
            id: id.clone(),
            name: draft.name.clone(),
            chain_id: draft.chain_id.clone(),
            description: draft.description.clone(),
            status: NetworkStatus::Created,
            token_economics: draft.token_economics.clone(),
            validator_requirements: draft.validator_requirements.clone(),
            governance_settings: draft.governance_settings.clone(),
            modules: draft.modules.clone(),
            deployed_environment: None,
            last_backup_at: None,
            created_at: now,
            updated_at: now,
            error: None,
            metrics: None,
            validators: None,
        };
        self.remote.write().await.insert(id, network.clone());
        Ok(network)
    }

    async fn update_network(&self, id: &str, patch: &NetworkPatch) -> Result<Network, ApiError> {
        self.check_online("/networks/{id}")?;
        let mut remote = self.remote.write().await;
        let network = remote.get_mut(id).ok_or_else(|| ApiError::NotFound {
            resource: format!("network {id}"),
        })?;
        patch.apply_to(network);
        network.updated_at = Utc::now();
        Ok(network.clone())
    }

    async fn delete_network(&self, id: &str) -> Result<(), ApiError> {
        self.check_online("/networks/{id}")?;
        self.remote.write().await.remove(id);
        Ok(())
    }

    async fn trigger_deploy(&self, id: &str, environment: &str) -> Result<(), ApiError> {
        self.check_online("/networks/{id}/deploy")?;
        self.deploy_calls
            .write()
            .await
            .push((id.to_string(), environment.to_string()));
        Ok(())
    }

    async fn create_backup(&self, id: &str) -> Result<BackupReceipt, ApiError> {
        self.check_online("/networks/{id}/backups")?;
        Ok(BackupReceipt {
            backup_id: format!("srv-backup-{id}-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            created_at: Some(Utc::now()),
        })
    }

    async fn trigger_restore(&self, id: &str, backup_id: &str) -> Result<(), ApiError> {
        self.check_online("/networks/{id}/restore")?;
        self.restore_calls
            .write()
            .await
            .push((id.to_string(), backup_id.to_string()));
        Ok(())
    }
}

// ===== Factories =====

/// Service over a fresh mock remote and the builtin fallback catalog.
pub fn create_test_service() -> (NetworkService, Arc<MockNetworkApi>) {
    let api = Arc::new(MockNetworkApi::new());
    let service = NetworkService::new(api.clone(), Arc::new(StaticCatalog::default()));
    (service, api)
}

/// Same as [`create_test_service`] with explicit lifecycle timing.
pub fn create_test_service_with_config(
    config: LifecycleConfig,
) -> (NetworkService, Arc<MockNetworkApi>) {
    let api = Arc::new(MockNetworkApi::new());
    let service =
        NetworkService::with_config(api.clone(), Arc::new(StaticCatalog::default()), config);
    (service, api)
}

/// Short lifecycle delays for paused-clock timer tests.
pub fn fast_config() -> LifecycleConfig {
    LifecycleConfig {
        deploy_delay: Duration::from_millis(500),
        restore_delay: Duration::from_millis(300),
    }
}

/// A complete draft with all nested sections present.
pub fn test_draft(name: &str) -> NetworkDraft {
    NetworkDraft {
        name: name.to_string(),
        chain_id: format!("{name}-1"),
        description: format!("{name} test network"),
        token_economics: TokenEconomics {
            token_name: "Test".to_string(),
            token_symbol: "TST".to_string(),
            total_supply: 21_000_000,
            inflation_rate: 0.05,
            community_tax: 0.02,
        },
        validator_requirements: ValidatorRequirements {
            min_stake: 1_000,
            max_validators: 10,
            unbonding_period_days: 7,
        },
        governance_settings: GovernanceSettings::default(),
        modules: ModuleSelection {
            enabled: vec!["staking".to_string(), "gov".to_string()],
        },
    }
}
