//! Network entity and request types shared across the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a managed network.
///
/// Transitions are driven by the lifecycle layer (`Created → Deploying →
/// Active`, `Active → Restoring → Active`); `Failed` and `Inactive` are only
/// ever reported by the deployment backend and persisted verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    /// Configured but never deployed.
    Created,
    /// Deployment in progress.
    Deploying,
    /// Running.
    Active,
    /// Configuration update in progress (backend-reported).
    Updating,
    /// Restore from backup in progress.
    Restoring,
    /// Deployment or runtime failure (backend-reported).
    Failed,
    /// Stopped (backend-reported).
    Inactive,
}

/// Token economics section of a network configuration.
///
/// Opaque to the lifecycle layer: persisted and replaced wholesale, never
/// inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenEconomics {
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub token_symbol: String,
    #[serde(default)]
    pub total_supply: u64,
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default)]
    pub community_tax: f64,
}

/// Validator requirements section of a network configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorRequirements {
    #[serde(default)]
    pub min_stake: u64,
    #[serde(default)]
    pub max_validators: u32,
    #[serde(default)]
    pub unbonding_period_days: u32,
}

/// Governance settings section of a network configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceSettings {
    #[serde(default)]
    pub voting_period_days: u32,
    #[serde(default)]
    pub quorum: f64,
    #[serde(default)]
    pub veto_threshold: f64,
    #[serde(default)]
    pub proposal_deposit: u64,
}

/// Cosmos-SDK module selection for a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSelection {
    /// Module identifiers enabled on this chain (e.g. `ibc`, `wasm`, `gov`).
    #[serde(default)]
    pub enabled: Vec<String>,
}

/// Runtime metrics reported by the monitoring collaborator.
///
/// Never written by the lifecycle layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    #[serde(default)]
    pub block_height: u64,
    #[serde(default)]
    pub transactions_per_second: f64,
    #[serde(default)]
    pub peer_count: u32,
    #[serde(default)]
    pub uptime_percent: f64,
}

/// Validator entry reported by the validator-view collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorInfo {
    pub moniker: String,
    pub operator_address: String,
    #[serde(default)]
    pub voting_power: u64,
    #[serde(default)]
    pub jailed: bool,
}

/// A configured (and optionally deployed) blockchain network record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Stable identifier, server-assigned or locally generated.
    pub id: String,
    pub name: String,
    pub chain_id: String,
    #[serde(default)]
    pub description: String,
    pub status: NetworkStatus,
    pub token_economics: TokenEconomics,
    pub validator_requirements: ValidatorRequirements,
    pub governance_settings: GovernanceSettings,
    pub modules: ModuleSelection,
    /// Target environment of the last deploy, absent before first deploy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_environment: Option<String>,
    #[serde(
        default,
        with = "crate::utils::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_backup_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
    /// Backend-reported error detail, set alongside a `Failed` status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<NetworkMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Vec<ValidatorInfo>>,
}

/// Complete configuration draft for creating a network.
///
/// All nested sections are required present, even if empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDraft {
    pub name: String,
    pub chain_id: String,
    #[serde(default)]
    pub description: String,
    pub token_economics: TokenEconomics,
    pub validator_requirements: ValidatorRequirements,
    pub governance_settings: GovernanceSettings,
    pub modules: ModuleSelection,
}

/// Shallow-merge patch for updating a network.
///
/// `None` fields are left untouched; nested sections are replaced wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_economics: Option<TokenEconomics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator_requirements: Option<ValidatorRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_settings: Option<GovernanceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModuleSelection>,
}

impl NetworkPatch {
    /// Applies the patch onto an existing record. Timestamps are the
    /// caller's concern.
    pub fn apply_to(&self, network: &mut Network) {
        if let Some(ref name) = self.name {
            network.name.clone_from(name);
        }
        if let Some(ref chain_id) = self.chain_id {
            network.chain_id.clone_from(chain_id);
        }
        if let Some(ref description) = self.description {
            network.description.clone_from(description);
        }
        if let Some(ref token_economics) = self.token_economics {
            network.token_economics.clone_from(token_economics);
        }
        if let Some(ref validator_requirements) = self.validator_requirements {
            network
                .validator_requirements
                .clone_from(validator_requirements);
        }
        if let Some(ref governance_settings) = self.governance_settings {
            network.governance_settings.clone_from(governance_settings);
        }
        if let Some(ref modules) = self.modules {
            network.modules.clone_from(modules);
        }
    }
}

/// Receipt returned by the remote backup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReceipt {
    pub backup_id: String,
    #[serde(
        default,
        with = "crate::utils::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}
