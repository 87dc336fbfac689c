//! # chainforge-api
//!
//! Remote API abstraction for the ChainForge network platform: the domain
//! types for managed Cosmos-SDK networks, the [`NetworkApi`] boundary trait,
//! and a reqwest-backed [`RestNetworkApi`] implementation.
//!
//! The lifecycle layer (`chainforge-core`) depends only on [`NetworkApi`]
//! and treats every call as "may resolve with data or fail"; transient
//! failures ([`ApiError::is_transient`]) are retried here with exponential
//! backoff before they ever reach it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chainforge_api::{NetworkApi, RestNetworkApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = RestNetworkApi::new("https://forge.example.com/api")?
//!         .with_bearer_token("token");
//!     for network in api.list_networks().await? {
//!         println!("{} ({:?})", network.name, network.status);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod http;
mod rest;
mod traits;
mod types;
mod utils;

pub use error::{ApiError, Result};
pub use rest::RestNetworkApi;
pub use traits::NetworkApi;
pub use types::{
    BackupReceipt, GovernanceSettings, ModuleSelection, Network, NetworkDraft, NetworkMetrics,
    NetworkPatch, NetworkStatus, TokenEconomics, ValidatorInfo, ValidatorRequirements,
};
pub use utils::datetime;
