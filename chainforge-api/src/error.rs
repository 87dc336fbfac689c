//! Unified error type for remote network-platform calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced by a [`NetworkApi`](crate::NetworkApi) implementation.
///
/// # Transient errors
///
/// The following variants represent failures that may succeed on retry:
/// - [`Transport`](Self::Transport) — connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The built-in REST client automatically retries these with exponential
/// backoff. Callers in the lifecycle layer treat every variant as a signal
/// to fall back to local bookkeeping, so none of these should ever escape
/// to the UI uncaught.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum ApiError {
    /// A network-level error occurred (DNS failure, connection refused, etc.).
    #[error("Transport error on {endpoint}: {detail}")]
    Transport { endpoint: String, detail: String },

    /// The HTTP request timed out.
    #[error("Timeout on {endpoint}: {detail}")]
    Timeout { endpoint: String, detail: String },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("Rate limited on {endpoint}")]
    RateLimited {
        endpoint: String,
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
    },

    /// The requested resource does not exist on the remote (HTTP 404).
    #[error("Remote resource not found: {resource}")]
    NotFound { resource: String },

    /// The remote rejected the request (non-transient HTTP error status).
    #[error("API error {status} on {endpoint}: {message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Failed to parse the remote response body.
    #[error("Parse error on {endpoint}: {detail}")]
    Parse { endpoint: String, detail: String },

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Whether the error is transient and worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Whether the error is expected behavior (missing resource, rejected
    /// input) rather than an infrastructure fault, for log classification.
    ///
    /// Log at `warn` when this returns `true`, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Rejected { .. })
    }
}

/// Result alias for remote API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
