//! # ocean-runtime
//!
//! The OCEAN scoring pipeline: temporal segmentation, token-budgeted
//! chunking, oracle-driven classification and scoring, and score
//! aggregation.
//!
//! Data flow per run: ingested records → [`ocean_core::RecordStore`] →
//! period segmentation → render to text → [`split`] oversized items →
//! [`chunk`] packing → classification oracle → high-signal [`classify`]
//! filter → scoring oracle → [`scorer`] aggregation → persisted
//! [`artifacts`].
//!
//! Everything runs strictly sequentially; the aggregation used throughout
//! is order-independent, so a concurrent fan-out over chunks would produce
//! identical results if one were ever substituted behind the oracle seam.

#![deny(unsafe_code)]

pub mod artifacts;
pub mod chunk;
pub mod classify;
pub mod errors;
pub mod ingest;
pub mod pipeline;
pub mod prompts;
pub mod scorer;
pub mod split;
pub mod tokens;

#[cfg(test)]
mod testutil;

pub use chunk::{Chunk, pack};
pub use classify::{ClassifiedChunk, classify_chunks, filter_high_signal};
pub use errors::{PipelineError, Result};
pub use ingest::load_records;
pub use pipeline::{Pipeline, PipelineConfig, RunOptions};
pub use scorer::score_chunks;
pub use split::{split_all, split_oversized};
pub use tokens::{HeuristicTokenCounter, TokenCounter};
