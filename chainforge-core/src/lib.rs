//! ChainForge Core Library
//!
//! Business logic for the ChainForge network platform, centered on the
//! Network Lifecycle Manager: the component that owns the collection of
//! managed Cosmos-SDK networks and mediates create/update/delete and
//! deploy/backup/restore against the remote API, degrading to optimistic
//! local bookkeeping whenever the remote is unreachable.
//!
//! The remote boundary ([`chainforge_api::NetworkApi`]) and the fallback
//! seed dataset ([`traits::FallbackCatalog`]) are injected, so frontends
//! and tests choose their own adapters.

pub mod error;
pub mod services;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{LifecycleConfig, NetworkService};
pub use traits::{FallbackCatalog, StaticCatalog};
