//! Fallback dataset abstraction.

use chrono::{DateTime, Utc};

use chainforge_api::{
    GovernanceSettings, ModuleSelection, Network, NetworkStatus, TokenEconomics, ValidatorInfo,
    ValidatorRequirements,
};

/// Read-only seed dataset used whenever the remote is unreachable.
///
/// The lifecycle layer never mutates the catalog; records taken from it are
/// cloned into the collection (merge-if-absent). Ships with
/// [`StaticCatalog`]; tests and embedded deployments may inject their own.
pub trait FallbackCatalog: Send + Sync {
    /// The full seed dataset.
    fn networks(&self) -> Vec<Network>;

    /// Looks up a single seed record by id.
    fn find(&self, id: &str) -> Option<Network> {
        self.networks().into_iter().find(|n| n.id == id)
    }
}

/// Built-in deterministic catalog of sample Cosmos-SDK networks.
///
/// Timestamps are fixed so repeated offline startups always present the
/// same data.
#[derive(Clone)]
pub struct StaticCatalog {
    networks: Vec<Network>,
}

impl StaticCatalog {
    /// Creates a catalog over the given seed records.
    #[must_use]
    pub fn new(networks: Vec<Network>) -> Self {
        Self { networks }
    }

    fn seeded_at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    fn sample_networks() -> Vec<Network> {
        // 2026-01-01T00:00:00Z and 2026-02-01T00:00:00Z
        let hub_created = Self::seeded_at(1_767_225_600);
        let osmo_created = Self::seeded_at(1_769_904_000);

        vec![
            Network {
                id: "cosmoshub-devnet".to_string(),
                name: "Cosmos Hub Devnet".to_string(),
                chain_id: "forgehub-1".to_string(),
                description: "Sample hub-style network for offline exploration".to_string(),
                status: NetworkStatus::Active,
                token_economics: TokenEconomics {
                    token_name: "Forge".to_string(),
                    token_symbol: "FORGE".to_string(),
                    total_supply: 1_000_000_000,
                    inflation_rate: 0.07,
                    community_tax: 0.02,
                },
                validator_requirements: ValidatorRequirements {
                    min_stake: 10_000,
                    max_validators: 100,
                    unbonding_period_days: 21,
                },
                governance_settings: GovernanceSettings {
                    voting_period_days: 14,
                    quorum: 0.4,
                    veto_threshold: 0.334,
                    proposal_deposit: 512,
                },
                modules: ModuleSelection {
                    enabled: vec![
                        "staking".to_string(),
                        "gov".to_string(),
                        "ibc".to_string(),
                        "distribution".to_string(),
                    ],
                },
                deployed_environment: Some("aws".to_string()),
                last_backup_at: None,
                created_at: hub_created,
                updated_at: hub_created,
                error: None,
                metrics: None,
                validators: Some(vec![ValidatorInfo {
                    moniker: "forge-sentinel".to_string(),
                    operator_address: "forgevaloper1qxy3mkp7s0d2vplc4ae8xh9t4w6u2m5rn8l0fz"
                        .to_string(),
                    voting_power: 250_000,
                    jailed: false,
                }]),
            },
            Network {
                id: "osmosis-testbed".to_string(),
                name: "Osmosis Testbed".to_string(),
                chain_id: "forgeswap-1".to_string(),
                description: "Sample AMM network draft, never deployed".to_string(),
                status: NetworkStatus::Created,
                token_economics: TokenEconomics {
                    token_name: "Swapcoin".to_string(),
                    token_symbol: "SWAP".to_string(),
                    total_supply: 500_000_000,
                    inflation_rate: 0.10,
                    community_tax: 0.05,
                },
                validator_requirements: ValidatorRequirements {
                    min_stake: 5_000,
                    max_validators: 50,
                    unbonding_period_days: 14,
                },
                governance_settings: GovernanceSettings {
                    voting_period_days: 7,
                    quorum: 0.334,
                    veto_threshold: 0.334,
                    proposal_deposit: 256,
                },
                modules: ModuleSelection {
                    enabled: vec!["staking".to_string(), "gov".to_string(), "wasm".to_string()],
                },
                deployed_environment: None,
                last_backup_at: None,
                created_at: osmo_created,
                updated_at: osmo_created,
                error: None,
                metrics: None,
                validators: None,
            },
        ]
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(Self::sample_networks())
    }
}

impl FallbackCatalog for StaticCatalog {
    fn networks(&self) -> Vec<Network> {
        self.networks.clone()
    }

    fn find(&self, id: &str) -> Option<Network> {
        self.networks.iter().find(|n| n.id == id).cloned()
    }
}
