//! # ocean-core
//!
//! Foundation types for the OCEAN trait-scoring pipeline.
//!
//! This crate provides the shared vocabulary that all other ocean crates
//! depend on:
//!
//! - **Records**: [`record::Record`] enum with `Conversation` and
//!   `SearchHistory` variants, selected by an explicit [`record::RecordKind`]
//! - **Store**: [`store::RecordStore`], a date-ordered append-only collection
//!   with range queries
//! - **Periods**: [`period::Granularity`] and [`period::segment`], calendar
//!   segmentation of a date range
//! - **Scores**: [`score::ScoreVector`] with elementwise averaging, and
//!   [`score::TraitLevel`] qualitative signal levels
//! - **Errors**: [`errors::CoreError`] hierarchy via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other ocean crates.

#![deny(unsafe_code)]

pub mod errors;
pub mod period;
pub mod record;
pub mod score;
pub mod store;

pub use errors::{CoreError, Result};
pub use period::{Granularity, Period, segment};
pub use record::{ChatMessage, Conversation, Record, RecordKind, SearchEntry, SearchHistory};
pub use score::{ScoreVector, TraitLevel, average};
pub use store::RecordStore;
