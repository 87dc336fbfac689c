//! Business logic service layer.

mod network_service;

pub use network_service::{LifecycleConfig, NetworkService};
