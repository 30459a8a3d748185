//! Numeric trait scoring.
//!
//! High-signal chunks go to the scoring oracle one at a time; each response
//! carries one numeric value per trait which must parse into `[0, 1]`. The
//! chunk scores are then averaged into a single period score. A period whose
//! filter left zero qualifying chunks gets the neutral vector without any
//! oracle call — that is the only layer with a defined default.

use tracing::{debug, info, warn};

use ocean_core::score::average;
use ocean_core::ScoreVector;
use ocean_llm::{Oracle, extract_trailing_json};

use crate::classify::ClassifiedChunk;
use crate::errors::Result;
use crate::prompts;

/// Score the given chunks and average them into one vector.
///
/// Zero input chunks yield [`ScoreVector::neutral`] with no oracle call.
/// Malformed responses drop that chunk's contribution (logged); transport
/// faults propagate. With exactly one usable score, that score is returned
/// directly rather than averaged.
pub async fn score_chunks(oracle: &dyn Oracle, chunks: &[ClassifiedChunk]) -> Result<ScoreVector> {
    if chunks.is_empty() {
        info!("no qualifying chunks to score, using the neutral default");
        return Ok(ScoreVector::neutral());
    }

    let mut scores = Vec::with_capacity(chunks.len());
    let mut dropped = 0usize;

    for chunk in chunks {
        let prompt = prompts::score_prompt(&chunk.text, &chunk.labels);
        let completion = oracle.complete(&prompt).await?;

        let Some(extracted) = extract_trailing_json(&completion) else {
            warn!("score response had no JSON object, dropping chunk");
            dropped += 1;
            continue;
        };
        let Some(score) = ScoreVector::from_json_object(&extracted.object) else {
            warn!("score response had no parseable trait scores, dropping chunk");
            dropped += 1;
            continue;
        };

        debug!(rationale = %extracted.rationale, "scored chunk");
        scores.push(score);
    }

    info!(scored = scores.len(), dropped, "scoring complete");

    if scores.len() == 1 {
        return Ok(scores[0]);
    }
    Ok(average(&scores)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedOracle;
    use ocean_core::TraitLevel;
    use ocean_core::score::TRAITS;

    fn chunk(text: &str) -> ClassifiedChunk {
        ClassifiedChunk {
            text: text.into(),
            labels: TRAITS
                .iter()
                .map(|&name| (name.to_string(), TraitLevel::High))
                .collect(),
            rationale: String::new(),
        }
    }

    fn score_response(value: &str) -> String {
        format!(
            r#"reasoning {{"openness": "{value}", "conscientiousness": "{value}", "extraversion": "{value}", "agreeableness": "{value}", "neuroticism": "{value}"}}"#
        )
    }

    #[tokio::test]
    async fn empty_input_yields_neutral_without_oracle_call() {
        let oracle = ScriptedOracle::new(vec![]);
        let score = score_chunks(&oracle, &[]).await.unwrap();
        assert_eq!(score, ScoreVector::neutral());
    }

    #[tokio::test]
    async fn single_chunk_score_is_returned_directly() {
        let oracle = ScriptedOracle::new(vec![score_response("0.8")]);
        let score = score_chunks(&oracle, &[chunk("a")]).await.unwrap();
        assert_eq!(score.openness, 0.8);
        assert_eq!(oracle.remaining(), 0);
    }

    #[tokio::test]
    async fn multiple_chunk_scores_are_averaged() {
        let oracle = ScriptedOracle::new(vec![score_response("0.2"), score_response("0.8")]);
        let score = score_chunks(&oracle, &[chunk("a"), chunk("b")]).await.unwrap();
        assert_eq!(score.openness, 0.5);
        assert_eq!(score.neuroticism, 0.5);
    }

    #[tokio::test]
    async fn malformed_score_drops_that_chunk() {
        let oracle = ScriptedOracle::new(vec!["gibberish".into(), score_response("0.6")]);
        let score = score_chunks(&oracle, &[chunk("a"), chunk("b")]).await.unwrap();
        assert_eq!(score.openness, 0.6);
    }

    #[tokio::test]
    async fn all_scores_malformed_is_an_aggregation_error() {
        let oracle = ScriptedOracle::new(vec!["gibberish".into()]);
        let err = score_chunks(&oracle, &[chunk("a")]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::errors::PipelineError::Core(ocean_core::CoreError::EmptyAggregation)
        ));
    }

    #[tokio::test]
    async fn out_of_range_score_is_malformed() {
        let oracle = ScriptedOracle::new(vec![score_response("1.7"), score_response("0.4")]);
        let score = score_chunks(&oracle, &[chunk("a"), chunk("b")]).await.unwrap();
        assert_eq!(score.openness, 0.4);
    }
}
