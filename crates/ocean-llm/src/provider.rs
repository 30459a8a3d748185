//! # Oracle Trait
//!
//! Core abstraction for the external text oracles. The classification and
//! scoring models both sit behind [`Oracle`], which exposes a single
//! blocking request/response call.
//!
//! Errors from this layer are *hard* faults (network, auth, protocol) and
//! propagate to abort the run. Malformed response *content* is not an error
//! here — the completion text is returned as-is and interpreted upstream.

use async_trait::async_trait;

/// Result type alias for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// An external text oracle invoked as a black box.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> OracleResult<String>;
}

/// Errors that can occur during oracle transport.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed at the protocol layer.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed (invalid or missing key).
    #[error("Auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Provider-specific error code.
        code: Option<String>,
        /// Whether the request could be retried.
        retryable: bool,
    },

    /// Oracle-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
