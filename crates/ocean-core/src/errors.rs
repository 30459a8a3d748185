//! Core error types.

use thiserror::Error;

/// Errors produced by core types and operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An unrecognized period granularity string.
    #[error("unsupported period '{0}', expected one of: weekly, monthly, annually, lifetime")]
    UnsupportedPeriod(String),
    /// An unrecognized record kind string.
    #[error("unsupported data kind '{0}', expected one of: conversations, searches")]
    UnsupportedKind(String),
    /// A date range with a start after its end.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Requested start of the range.
        start: chrono::NaiveDate,
        /// Requested end of the range.
        end: chrono::NaiveDate,
    },
    /// Aggregation over an empty score sequence — there is no defined
    /// default at this layer.
    #[error("cannot average an empty sequence of scores")]
    EmptyAggregation,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
