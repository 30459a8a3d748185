//! Pipeline error types.
//!
//! The taxonomy mirrors how failures surface to the user: configuration and
//! empty-input errors abort before any oracle call; oracle transport faults
//! abort the run; malformed oracle *responses* never appear here — they are
//! dropped and logged where they occur.

use ocean_core::RecordKind;
use thiserror::Error;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration-class error from core types (unsupported period/kind,
    /// start-after-end range, empty aggregation).
    #[error(transparent)]
    Core(#[from] ocean_core::CoreError),

    /// No records at all for the requested kind and scope. Distinguished
    /// from an empty period inside a longer range, which is skipped.
    #[error("no {kind} records to score for the requested scope")]
    EmptyInput {
        /// The requested record kind.
        kind: RecordKind,
    },

    /// Hard oracle transport fault (network, auth, protocol).
    #[error(transparent)]
    Oracle(#[from] ocean_llm::OracleError),

    /// Filesystem error while ingesting records or persisting artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in an ingestion file or persisted artifact.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
