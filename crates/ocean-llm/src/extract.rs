//! JSON extraction from oracle completion text.
//!
//! Both oracles are asked to end their answer with a flat JSON object, but
//! they reason in free text around it and occasionally drift from the
//! format. This module pulls the trailing object out of the completion and
//! keeps the full text as the rationale. A completion with no parseable
//! object yields `None` — never an error — so the caller can drop that
//! chunk's contribution and continue.

use serde_json::Value;
use tracing::info;

/// A JSON object extracted from a completion, plus the surrounding text.
#[derive(Debug, Clone)]
pub struct ExtractedJson {
    /// The parsed trailing object.
    pub object: Value,
    /// The full completion text, trimmed — the oracle's reasoning.
    pub rationale: String,
}

/// Extract the trailing JSON object from a completion.
///
/// The expected payload is a flat object (trait name → value), so the last
/// `{` .. last `}` span is the candidate. Literal `\n` sequences are
/// unescaped first; some models double-escape newlines inside prose.
///
/// Returns `None` (with a logged diagnostic) when the completion has no
/// brace pair or the span is not valid JSON.
#[must_use]
pub fn extract_trailing_json(answer: &str) -> Option<ExtractedJson> {
    let text = answer.replace("\\n", "\n");

    let (Some(start), Some(end)) = (text.rfind('{'), text.rfind('}')) else {
        info!("completion does not include a JSON object");
        return None;
    };
    if start >= end {
        info!("completion does not include a JSON object");
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(object) => Some(ExtractedJson {
            object,
            rationale: text.trim().to_string(),
        }),
        Err(error) => {
            info!(%error, "completion JSON failed to parse");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trailing_object_after_prose() {
        let answer = "The user plans ahead and keeps lists.\n{\"conscientiousness\": \"high\"}";
        let extracted = extract_trailing_json(answer).unwrap();
        assert_eq!(extracted.object["conscientiousness"], "high");
        assert!(extracted.rationale.contains("plans ahead"));
    }

    #[test]
    fn unescapes_literal_newlines() {
        let answer = "reasoning\\n{\"openness\": \"low\"}";
        let extracted = extract_trailing_json(answer).unwrap();
        assert_eq!(extracted.object["openness"], "low");
    }

    #[test]
    fn no_braces_yields_none() {
        assert!(extract_trailing_json("no json here at all").is_none());
    }

    #[test]
    fn reversed_braces_yield_none() {
        assert!(extract_trailing_json("} backwards {").is_none());
    }

    #[test]
    fn malformed_object_yields_none() {
        assert!(extract_trailing_json("text {not: valid json}").is_none());
    }

    #[test]
    fn bare_object_with_no_prose() {
        let extracted = extract_trailing_json("{\"neuroticism\": \"0.3\"}").unwrap();
        assert_eq!(extracted.object["neuroticism"], "0.3");
        assert_eq!(extracted.rationale, "{\"neuroticism\": \"0.3\"}");
    }

    #[test]
    fn empty_completion_yields_none() {
        assert!(extract_trailing_json("").is_none());
    }
}
