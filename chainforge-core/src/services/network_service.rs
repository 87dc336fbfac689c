//! Network lifecycle service.
//!
//! Owns the authoritative in-memory collection of [`Network`] records and
//! the single "selected network" pointer, and mediates every mutating
//! operation against the remote API with a deterministic local fallback.
//!
//! Every remote failure except `update`'s missing-target case degrades into
//! an optimistic local mutation so the UI stays usable offline. Consistency
//! is maintained by re-deriving state from the collection by id rather than
//! through captured references; concurrent mutations on the same id are
//! last-write-wins by design.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use chainforge_api::{Network, NetworkApi, NetworkDraft, NetworkPatch, NetworkStatus};

use crate::error::{CoreError, CoreResult};
use crate::traits::FallbackCatalog;

/// Timing knobs for the simulated provisioning transitions.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Delay before a `Deploying` network flips to `Active`.
    pub deploy_delay: Duration,
    /// Delay before a `Restoring` network flips to `Active`.
    pub restore_delay: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            deploy_delay: Duration::from_secs(5),
            restore_delay: Duration::from_secs(3),
        }
    }
}

/// Collection state guarded by one lock so list and selection can never be
/// observed disagreeing.
#[derive(Default)]
struct Collection {
    networks: Vec<Network>,
    /// Id of the currently selected network; always refers to an entry in
    /// `networks` when set.
    selected: Option<String>,
    loaded: bool,
}

impl Collection {
    fn find(&self, id: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Network> {
        self.networks.iter_mut().find(|n| n.id == id)
    }

    /// Inserts or replaces, keeping exactly one entry per id.
    fn upsert(&mut self, network: Network) {
        match self.find_mut(&network.id) {
            Some(slot) => *slot = network,
            None => self.networks.push(network),
        }
    }

    /// Inserts only when the id is untracked, so a fresher concurrent entry
    /// is never overwritten with stale data. Returns the tracked record.
    fn insert_if_absent(&mut self, network: Network) -> Network {
        if let Some(existing) = self.find(&network.id) {
            return existing.clone();
        }
        self.networks.push(network.clone());
        network
    }
}

/// Pending auto-transition timers, keyed by network id.
///
/// The sequence number lets a finished task remove its own entry without
/// clobbering a newer timer that replaced it.
#[derive(Default)]
struct TimerRegistry {
    seq: u64,
    pending: HashMap<String, PendingTransition>,
}

struct PendingTransition {
    seq: u64,
    handle: JoinHandle<()>,
}

impl TimerRegistry {
    fn cancel(&mut self, id: &str) {
        if let Some(p) = self.pending.remove(id) {
            p.handle.abort();
        }
    }

    fn abort_all(&mut self) {
        for (_, p) in self.pending.drain() {
            p.handle.abort();
        }
    }
}

/// The Network Lifecycle Manager.
///
/// All mutating operations on managed networks go through this service;
/// consumers read snapshots via [`list`](Self::list) /
/// [`selected`](Self::selected) and never receive mutable references into
/// the collection.
pub struct NetworkService {
    api: Arc<dyn NetworkApi>,
    fallback: Arc<dyn FallbackCatalog>,
    config: LifecycleConfig,
    collection: Arc<RwLock<Collection>>,
    timers: Arc<Mutex<TimerRegistry>>,
}

impl NetworkService {
    /// Creates the service with default lifecycle timing.
    #[must_use]
    pub fn new(api: Arc<dyn NetworkApi>, fallback: Arc<dyn FallbackCatalog>) -> Self {
        Self::with_config(api, fallback, LifecycleConfig::default())
    }

    /// Creates the service with explicit lifecycle timing.
    #[must_use]
    pub fn with_config(
        api: Arc<dyn NetworkApi>,
        fallback: Arc<dyn FallbackCatalog>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            api,
            fallback,
            config,
            collection: Arc::new(RwLock::new(Collection::default())),
            timers: Arc::new(Mutex::new(TimerRegistry::default())),
        }
    }

    /// Lifecycle timing in effect.
    #[must_use]
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    // ===== Read accessors =====

    /// Returns a snapshot of the collection, triggering the initial remote
    /// fetch on first use. A failed initial fetch seeds the collection from
    /// the fallback catalog and is never surfaced.
    pub async fn list(&self) -> Vec<Network> {
        self.ensure_loaded().await;
        self.collection.read().await.networks.clone()
    }

    /// Returns the currently selected network, if any.
    pub async fn selected(&self) -> Option<Network> {
        let collection = self.collection.read().await;
        let id = collection.selected.as_deref()?;
        collection.find(id).cloned()
    }

    // ===== Lifecycle operations =====

    /// Creates a network from a complete draft.
    ///
    /// Attempts the remote create first; on failure the record is
    /// synthesized locally with a fresh id so the operation never fails
    /// outright. The returned network is already in the collection.
    pub async fn create(&self, draft: NetworkDraft) -> Network {
        self.ensure_loaded().await;

        let network = match self.api.create_network(&draft).await {
            Ok(network) => network,
            Err(e) => {
                log::warn!("Remote create failed, keeping network locally: {e}");
                let now = Utc::now();
                Network {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: draft.name,
                    chain_id: draft.chain_id,
                    description: draft.description,
                    status: NetworkStatus::Created,
                    token_economics: draft.token_economics,
                    validator_requirements: draft.validator_requirements,
                    governance_settings: draft.governance_settings,
                    modules: draft.modules,
                    deployed_environment: None,
                    last_backup_at: None,
                    created_at: now,
                    updated_at: now,
                    error: None,
                    metrics: None,
                    validators: None,
                }
            }
        };

        self.collection.write().await.upsert(network.clone());
        network
    }

    /// Returns the network for `id` and makes it the selection.
    ///
    /// Lookup order: collection, then remote; the fallback catalog is only
    /// consulted when the remote call fails. A reachable remote without the
    /// record is authoritative. A record found outside the collection is
    /// adopted merge-if-absent. The selection is updated regardless of
    /// outcome, so a miss clears it.
    pub async fn get(&self, id: &str) -> Option<Network> {
        self.ensure_loaded().await;

        {
            let mut collection = self.collection.write().await;
            if let Some(found) = collection.find(id).cloned() {
                collection.selected = Some(found.id.clone());
                return Some(found);
            }
        }

        let fetched = match self.api.get_network(id).await {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Remote lookup for {id} failed, checking fallback catalog: {e}");
                self.fallback.find(id)
            }
        };

        let mut collection = self.collection.write().await;
        match fetched {
            Some(network) => {
                let tracked = collection.insert_if_absent(network);
                collection.selected = Some(tracked.id.clone());
                Some(tracked)
            }
            None => {
                collection.selected = None;
                None
            }
        }
    }

    /// Applies a shallow-merge patch to an existing network.
    ///
    /// The only operation that surfaces a hard failure: a target absent
    /// from both the collection and the remote yields
    /// [`CoreError::NetworkNotFound`]. Remote persistence failure degrades
    /// to the local merge. If the target is selected, the selection
    /// observes the new value atomically with the collection entry.
    pub async fn update(&self, id: &str, patch: NetworkPatch) -> CoreResult<Network> {
        self.ensure_loaded().await;

        let existing = { self.collection.read().await.find(id).cloned() };
        let existing = match existing {
            Some(network) => network,
            None => match self.api.get_network(id).await {
                Ok(Some(network)) => network,
                Ok(None) => return Err(CoreError::NetworkNotFound(id.to_string())),
                Err(e) => {
                    log::warn!("Remote lookup for {id} failed during update: {e}");
                    return Err(CoreError::NetworkNotFound(id.to_string()));
                }
            },
        };

        let mut merged = existing;
        patch.apply_to(&mut merged);
        merged.updated_at = Utc::now();

        let network = match self.api.update_network(id, &patch).await {
            Ok(authoritative) => authoritative,
            Err(e) => {
                log::warn!("Remote update for {id} failed, applying patch locally: {e}");
                merged
            }
        };

        self.collection.write().await.upsert(network.clone());
        Ok(network)
    }

    /// Deletes a network.
    ///
    /// The remote call is fire-and-forget — local state is authoritative
    /// for UI purposes, so the record is removed (and any pending
    /// auto-transition cancelled) regardless of the remote outcome. A
    /// selection referring to the record is cleared.
    pub async fn delete(&self, id: &str) {
        self.ensure_loaded().await;

        if let Err(e) = self.api.delete_network(id).await {
            log::warn!("Remote delete for {id} failed, removing locally anyway: {e}");
        }

        if let Ok(mut timers) = self.timers.lock() {
            timers.cancel(id);
        }

        let mut collection = self.collection.write().await;
        collection.networks.retain(|n| n.id != id);
        if collection.selected.as_deref() == Some(id) {
            collection.selected = None;
        }
    }

    /// Starts a deployment to `environment`.
    ///
    /// The local transition to `Deploying` is optimistic and stands even if
    /// the remote trigger fails. Completion (`Deploying → Active`) fires
    /// after a fixed delay, applied by id so it cannot leak onto another
    /// record; a re-deploy restarts the delay.
    pub async fn deploy(&self, id: &str, environment: &str) -> CoreResult<Network> {
        self.ensure_loaded().await;

        let updated = {
            let mut collection = self.collection.write().await;
            let network = collection
                .find_mut(id)
                .ok_or_else(|| CoreError::NetworkNotFound(id.to_string()))?;
            network.status = NetworkStatus::Deploying;
            network.deployed_environment = Some(environment.to_string());
            network.updated_at = Utc::now();
            network.clone()
        };

        if let Err(e) = self.api.trigger_deploy(id, environment).await {
            log::warn!("Remote deploy trigger for {id} failed, continuing locally: {e}");
        }

        self.schedule_transition(id, NetworkStatus::Deploying, self.config.deploy_delay);
        Ok(updated)
    }

    /// Creates a backup and returns its identifier.
    ///
    /// Never changes `status`; only `last_backup_at` (and `updated_at`) are
    /// stamped. A failed remote call yields a locally issued, time-based
    /// identifier.
    pub async fn backup(&self, id: &str) -> CoreResult<String> {
        self.ensure_loaded().await;

        if self.collection.read().await.find(id).is_none() {
            return Err(CoreError::NetworkNotFound(id.to_string()));
        }

        let backup_id = match self.api.create_backup(id).await {
            Ok(receipt) => receipt.backup_id,
            Err(e) => {
                log::warn!("Remote backup for {id} failed, issuing local receipt: {e}");
                format!("local-{id}-{}", Utc::now().timestamp_millis())
            }
        };

        let mut collection = self.collection.write().await;
        if let Some(network) = collection.find_mut(id) {
            let now = Utc::now();
            network.last_backup_at = Some(now);
            network.updated_at = now;
        }

        Ok(backup_id)
    }

    /// Starts a restore from `backup_id`, symmetric to
    /// [`deploy`](Self::deploy): optimistic `Restoring` transition, logged
    /// remote trigger, delayed by-id completion back to `Active`.
    pub async fn restore(&self, id: &str, backup_id: &str) -> CoreResult<Network> {
        self.ensure_loaded().await;

        let updated = {
            let mut collection = self.collection.write().await;
            let network = collection
                .find_mut(id)
                .ok_or_else(|| CoreError::NetworkNotFound(id.to_string()))?;
            network.status = NetworkStatus::Restoring;
            network.updated_at = Utc::now();
            network.clone()
        };

        if let Err(e) = self.api.trigger_restore(id, backup_id).await {
            log::warn!("Remote restore trigger for {id} failed, continuing locally: {e}");
        }

        self.schedule_transition(id, NetworkStatus::Restoring, self.config.restore_delay);
        Ok(updated)
    }

    /// Persists a backend-reported status verbatim (e.g. `Failed` from the
    /// deployment backend), with an optional error detail.
    pub async fn apply_remote_status(
        &self,
        id: &str,
        status: NetworkStatus,
        error: Option<String>,
    ) -> CoreResult<()> {
        self.ensure_loaded().await;

        let mut collection = self.collection.write().await;
        let network = collection
            .find_mut(id)
            .ok_or_else(|| CoreError::NetworkNotFound(id.to_string()))?;
        network.status = status;
        network.error = error;
        network.updated_at = Utc::now();
        Ok(())
    }

    // ===== Internals =====

    /// Performs the initial remote fetch exactly once; the write lock held
    /// across the call serializes concurrent first users.
    async fn ensure_loaded(&self) {
        if self.collection.read().await.loaded {
            return;
        }

        let mut collection = self.collection.write().await;
        if collection.loaded {
            return;
        }

        match self.api.list_networks().await {
            Ok(remote) => {
                log::info!("Loaded {} networks from remote", remote.len());
                collection.networks = remote;
            }
            Err(e) => {
                let seed = self.fallback.networks();
                log::warn!(
                    "Initial network fetch failed, seeding {} networks from fallback catalog: {e}",
                    seed.len(),
                );
                collection.networks = seed;
            }
        }
        collection.loaded = true;
    }

    /// Schedules the delayed `pending → Active` completion for `id`,
    /// replacing (and aborting) any transition already pending for it.
    ///
    /// The completion applies by id and only if the status still matches
    /// the scheduled source state, so it is a no-op for deleted networks
    /// and for networks the backend moved elsewhere in the meantime.
    fn schedule_transition(&self, id: &str, pending: NetworkStatus, delay: Duration) {
        let Ok(mut timers) = self.timers.lock() else {
            log::error!("Transition timer registry poisoned, {id} will stay {pending:?}");
            return;
        };

        timers.seq += 1;
        let seq = timers.seq;

        let collection = Arc::clone(&self.collection);
        let registry = Arc::clone(&self.timers);
        let task_id = id.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut collection = collection.write().await;
                if let Some(network) = collection.find_mut(&task_id) {
                    if network.status == pending {
                        network.status = NetworkStatus::Active;
                        network.updated_at = Utc::now();
                        log::info!("Network {task_id} is now active");
                    }
                }
            }

            if let Ok(mut timers) = registry.lock() {
                if timers.pending.get(&task_id).is_some_and(|p| p.seq == seq) {
                    timers.pending.remove(&task_id);
                }
            }
        });

        if let Some(old) = timers
            .pending
            .insert(id.to_string(), PendingTransition { seq, handle })
        {
            old.handle.abort();
        }
    }
}

impl Drop for NetworkService {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            timers.abort_all();
        }
    }
}
