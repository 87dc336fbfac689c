//! Collaborator abstraction traits.

mod fallback_catalog;

pub use fallback_catalog::{FallbackCatalog, StaticCatalog};

// The remote API boundary lives in the library crate.
pub use chainforge_api::NetworkApi;
