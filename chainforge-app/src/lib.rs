//! Platform-agnostic application bootstrap for ChainForge.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Every frontend constructs the state once at startup, runs
//! the startup sequence, and hands the lifecycle service to its views.

use std::sync::Arc;

use chainforge_api::{NetworkApi, RestNetworkApi};
use chainforge_core::error::{CoreError, CoreResult};
use chainforge_core::services::{LifecycleConfig, NetworkService};
use chainforge_core::traits::{FallbackCatalog, StaticCatalog};

/// Platform-agnostic application state.
pub struct AppState {
    /// Network lifecycle service
    pub network_service: Arc<NetworkService>,
}

impl AppState {
    /// Runs the startup sequence: the initial collection load.
    ///
    /// A remote failure here is already absorbed by the fallback seeding,
    /// so startup never fails on connectivity.
    pub async fn run_startup(&self) {
        let networks = self.network_service.list().await;
        log::info!("Startup complete, managing {} networks", networks.len());
    }
}

/// Builder for [`AppState`].
pub struct AppStateBuilder {
    api: Option<Arc<dyn NetworkApi>>,
    fallback: Option<Arc<dyn FallbackCatalog>>,
    config: LifecycleConfig,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: None,
            fallback: None,
            config: LifecycleConfig::default(),
        }
    }

    /// Injects the remote API adapter.
    #[must_use]
    pub fn api(mut self, api: Arc<dyn NetworkApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Convenience: wires the bundled REST adapter for the given base URL.
    pub fn rest_api(self, base_url: &str) -> CoreResult<Self> {
        let api = RestNetworkApi::new(base_url)?;
        Ok(self.api(Arc::new(api)))
    }

    /// Overrides the fallback catalog (defaults to the builtin samples).
    #[must_use]
    pub fn fallback(mut self, catalog: Arc<dyn FallbackCatalog>) -> Self {
        self.fallback = Some(catalog);
        self
    }

    /// Overrides the lifecycle timing.
    #[must_use]
    pub fn lifecycle_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if the remote API adapter is
    /// missing.
    pub fn build(self) -> CoreResult<AppState> {
        let api = self
            .api
            .ok_or_else(|| CoreError::ValidationError("remote API adapter is required".to_string()))?;
        let fallback = self
            .fallback
            .unwrap_or_else(|| Arc::new(StaticCatalog::default()));

        let network_service = Arc::new(NetworkService::with_config(api, fallback, self.config));

        Ok(AppState { network_service })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
