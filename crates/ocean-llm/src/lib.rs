//! # ocean-llm
//!
//! Oracle abstraction and HTTP transport for the OCEAN pipeline.
//!
//! The pipeline talks to its classification and scoring oracles through the
//! narrow [`Oracle`] trait — one prompt in, one completion text out. The
//! concrete [`OpenAiOracle`] sends non-streaming chat-completion requests to
//! an OpenAI-compatible endpoint. Because the trait is this small, a
//! concurrent fan-out (or a test double) can be substituted without touching
//! any aggregation logic.

#![deny(unsafe_code)]

pub mod error_parsing;
pub mod extract;
pub mod openai;
pub mod provider;

pub use extract::{ExtractedJson, extract_trailing_json};
pub use openai::{OpenAiOracle, OracleConfig};
pub use provider::{Oracle, OracleError, OracleResult};
