//! Chunk classification and the high-signal filter.
//!
//! Each chunk goes to the classification oracle once, sequentially. The
//! response must carry one qualitative level per trait; anything else is a
//! malformed response and drops that chunk from further processing — logged
//! and counted, never raised. Chunks with no trait labeled `high` are then
//! filtered out before the more expensive scoring oracle is invoked, a
//! cost-control policy rather than a correctness requirement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use ocean_core::score::TRAITS;
use ocean_core::{RecordKind, TraitLevel};
use ocean_llm::{Oracle, extract_trailing_json};

use crate::chunk::Chunk;
use crate::errors::Result;
use crate::prompts;

/// One chunk with its classification output — the persisted artifact shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedChunk {
    /// The chunk text that was classified.
    pub text: String,
    /// One signal level per trait.
    pub labels: BTreeMap<String, TraitLevel>,
    /// The oracle's free-text reasoning.
    pub rationale: String,
}

impl ClassifiedChunk {
    /// Whether any trait carries a strong signal.
    #[must_use]
    pub fn has_high_signal(&self) -> bool {
        self.labels.values().any(|level| level.is_high())
    }
}

/// Parse a label map out of an extracted JSON object.
///
/// Requires a valid level for every trait; returns `None` otherwise so the
/// caller can treat the response as malformed.
fn parse_labels(object: &Value) -> Option<BTreeMap<String, TraitLevel>> {
    let obj = object.as_object()?;
    let mut labels = BTreeMap::new();
    for trait_name in TRAITS {
        let level = obj.get(trait_name)?.as_str().and_then(TraitLevel::parse)?;
        let _ = labels.insert(trait_name.to_string(), level);
    }
    Some(labels)
}

/// Classify every chunk with the oracle, dropping malformed responses.
///
/// Transport faults propagate and abort the run; malformed response content
/// only costs the offending chunk. Emitted and dropped counts are logged so
/// silent data loss stays observable.
pub async fn classify_chunks(
    oracle: &dyn Oracle,
    chunks: &[Chunk],
    kind: RecordKind,
) -> Result<Vec<ClassifiedChunk>> {
    let mut classified = Vec::with_capacity(chunks.len());
    let mut dropped = 0usize;

    for chunk in chunks {
        let prompt = prompts::classification_prompt(kind, &chunk.text);
        let completion = oracle.complete(&prompt).await?;

        let Some(extracted) = extract_trailing_json(&completion) else {
            warn!("classification response had no JSON object, dropping chunk");
            dropped += 1;
            continue;
        };
        let Some(labels) = parse_labels(&extracted.object) else {
            warn!("classification response had no valid trait levels, dropping chunk");
            dropped += 1;
            continue;
        };

        debug!(rationale = %extracted.rationale, "classified chunk");
        classified.push(ClassifiedChunk {
            text: chunk.text.clone(),
            labels,
            rationale: extracted.rationale,
        });
    }

    info!(
        emitted = classified.len(),
        dropped, "classification complete"
    );
    Ok(classified)
}

/// Keep only chunks with at least one trait labeled `high`.
#[must_use]
pub fn filter_high_signal(classified: Vec<ClassifiedChunk>) -> Vec<ClassifiedChunk> {
    classified
        .into_iter()
        .filter(ClassifiedChunk::has_high_signal)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
