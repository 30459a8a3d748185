//! Prompt assembly for the classification and scoring oracles.
//!
//! Templates ship as compile-time markdown files with `{text}`, `{markers}`
//! and `{labels}` placeholders; trait-marker reference sets ship as
//! compile-time JSON, one set per record kind. The literal prompt wording is
//! interface material, not pipeline logic — the pipeline only relies on the
//! JSON output contract stated at the end of each template.

use std::collections::BTreeMap;

use ocean_core::{RecordKind, TraitLevel};

const CLASSIFY_CONVERSATIONS_TEMPLATE: &str = include_str!("prompts/classify_conversations.md");
const CLASSIFY_SEARCHES_TEMPLATE: &str = include_str!("prompts/classify_searches.md");
const SCORE_TEMPLATE: &str = include_str!("prompts/score.md");

const CONVERSATION_MARKERS: &str = include_str!("../assets/markers_conversations.json");
const SEARCH_MARKERS: &str = include_str!("../assets/markers_searches.json");

/// The trait-marker reference set for a record kind, as raw JSON text.
#[must_use]
pub fn markers_for(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Conversations => CONVERSATION_MARKERS,
        RecordKind::Searches => SEARCH_MARKERS,
    }
}

/// Build the classification prompt for one chunk.
#[must_use]
pub fn classification_prompt(kind: RecordKind, text: &str) -> String {
    let template = match kind {
        RecordKind::Conversations => CLASSIFY_CONVERSATIONS_TEMPLATE,
        RecordKind::Searches => CLASSIFY_SEARCHES_TEMPLATE,
    };
    template
        .replace("{markers}", markers_for(kind))
        .replace("{text}", text)
}

/// Build the scoring prompt for one classified chunk.
#[must_use]
pub fn score_prompt(text: &str, labels: &BTreeMap<String, TraitLevel>) -> String {
    let labels_json = serde_json::to_string(labels).unwrap_or_default();
    SCORE_TEMPLATE
        .replace("{labels}", &labels_json)
        .replace("{text}", text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
