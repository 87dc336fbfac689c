//! Remote API boundary trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BackupReceipt, Network, NetworkDraft, NetworkPatch};

/// Remote network-platform API.
///
/// The lifecycle layer treats every method purely as "a call that may
/// resolve with data or fail"; the wire format is an implementation detail.
/// Ships with [`RestNetworkApi`](crate::RestNetworkApi); tests inject mock
/// implementations.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Fetch all networks.
    async fn list_networks(&self) -> Result<Vec<Network>>;

    /// Fetch a single network. `Ok(None)` means the remote is reachable but
    /// has no such record.
    async fn get_network(&self, id: &str) -> Result<Option<Network>>;

    /// Create a network from a complete draft. Returns the server-assigned
    /// record.
    async fn create_network(&self, draft: &NetworkDraft) -> Result<Network>;

    /// Apply a shallow-merge patch. Returns the authoritative updated record.
    async fn update_network(&self, id: &str, patch: &NetworkPatch) -> Result<Network>;

    /// Delete a network.
    async fn delete_network(&self, id: &str) -> Result<()>;

    /// Trigger a deployment to the named environment.
    async fn trigger_deploy(&self, id: &str, environment: &str) -> Result<()>;

    /// Create a backup and return its receipt.
    async fn create_backup(&self, id: &str) -> Result<BackupReceipt>;

    /// Trigger a restore from the named backup.
    async fn trigger_restore(&self, id: &str, backup_id: &str) -> Result<()>;
}
