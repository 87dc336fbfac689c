//! Unified error type definition.

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use chainforge_api::ApiError;

/// Core layer error type.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Target network absent from both the local collection and the remote.
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    /// Missing or inconsistent wiring (adapter injection).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Remote API error (converted from the API library).
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether this is expected behavior (missing resource, bad input) for
    /// log classification.
    ///
    /// Log at `warn` when this returns `true`, `error` otherwise.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NetworkNotFound(_) | Self::ValidationError(_) => true,
            Self::Api(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
