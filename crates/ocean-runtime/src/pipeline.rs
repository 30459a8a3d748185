//! Run orchestration.
//!
//! The pipeline walks one (kind, granularity) pair through the full state
//! machine: load persisted state, resolve the effective date range, iterate
//! periods, and for each period with records — render, split, pack,
//! classify, filter, score — then fold the period scores into a run score
//! and merge it with the persisted one. Strictly sequential: one period at
//! a time, one oracle call at a time.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use ocean_core::score::average;
use ocean_core::{CoreError, Granularity, Record, RecordKind, RecordStore, ScoreVector, segment};
use ocean_llm::Oracle;

use crate::artifacts;
use crate::chunk;
use crate::classify;
use crate::errors::{PipelineError, Result};
use crate::scorer;
use crate::split;
use crate::tokens::TokenCounter;

/// Sizing knobs for chunk construction.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Token budget per chunk.
    pub max_input_tokens: usize,
    /// Safety buffer for oversized-item splitting.
    pub split_margin: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: 3076,
            split_margin: 50,
        }
    }
}

/// What to score and where to put the artifacts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Record kind to process.
    pub kind: RecordKind,
    /// Period granularity.
    pub granularity: Granularity,
    /// Explicit start override; data-derived oldest date otherwise.
    pub start_date: Option<NaiveDate>,
    /// Explicit end override; data-derived newest date otherwise.
    pub end_date: Option<NaiveDate>,
    /// Root directory for persisted artifacts.
    pub save_path: PathBuf,
}

/// The scoring pipeline: oracles, token counter, and sizing config.
pub struct Pipeline {
    classifier: Arc<dyn Oracle>,
    scorer: Arc<dyn Oracle>,
    counter: Arc<dyn TokenCounter>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators.
    #[must_use]
    pub fn new(
        classifier: Arc<dyn Oracle>,
        scorer: Arc<dyn Oracle>,
        counter: Arc<dyn TokenCounter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            scorer,
            counter,
            config,
        }
    }

    /// Run the full state machine over `store` and return the merged score.
    ///
    /// # Errors
    ///
    /// Fails fast — before any oracle call — on an empty store, an empty
    /// effective range, or a start date after the end date. Oracle transport
    /// faults and artifact I/O errors abort the run; malformed oracle
    /// responses only drop the affected chunk.
    pub async fn run(&self, store: &RecordStore, opts: &RunOptions) -> Result<ScoreVector> {
        let save_dir = opts
            .save_path
            .join(opts.kind.as_str())
            .join(opts.granularity.as_str());

        let prior = artifacts::load_latest(&save_dir)?;

        let Some((oldest, newest)) = store.bounds() else {
            return Err(PipelineError::EmptyInput { kind: opts.kind });
        };
        // Explicit overrides take precedence over data-derived bounds.
        let start = opts.start_date.unwrap_or(oldest);
        let end = opts.end_date.unwrap_or(newest);
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end }.into());
        }

        let periods = segment(start, end, opts.granularity)?;
        info!(
            kind = %opts.kind,
            granularity = %opts.granularity,
            %start,
            %end,
            periods = periods.len(),
            records = store.len(),
            "starting run"
        );

        let mut period_scores = Vec::new();
        for period in &periods {
            let period_id = period.id();
            let records = store.range(period.start, period.end);
            if records.is_empty() {
                info!(period = %period_id, "no records in period, skipping");
                continue;
            }

            info!(period = %period_id, records = records.len(), "processing period");
            let score = self
                .score_period(&records, opts.kind, &save_dir, &period_id)
                .await?;
            artifacts::save_json(&save_dir.join(format!("{period_id}.json")), &score)?;
            info!(period = %period_id, ?score, "period scored");
            period_scores.push(score);
        }

        if period_scores.is_empty() {
            // The store had records, but none fell inside the requested
            // range — the run as a whole had nothing to score.
            return Err(PipelineError::EmptyInput { kind: opts.kind });
        }

        let run_score = if period_scores.len() == 1 {
            period_scores[0]
        } else {
            average(&period_scores)?
        };

        let final_score = match prior {
            Some(previous) => {
                let merged = run_score.merge(previous);
                info!(?previous, ?run_score, ?merged, "merged with persisted score");
                merged
            }
            None => {
                info!(?run_score, "no persisted score found, adopting run score");
                run_score
            }
        };

        artifacts::save_json(&save_dir.join(artifacts::LATEST_FILE), &final_score)?;
        Ok(final_score)
    }

    /// Score one period's records: render → split → pack → classify →
    /// filter → score.
    async fn score_period(
        &self,
        records: &[&Record],
        kind: RecordKind,
        save_dir: &std::path::Path,
        period_id: &str,
    ) -> Result<ScoreVector> {
        // Conversations are re-ordered by their canonical participant key so
        // chunk contents are reproducible regardless of ingestion order.
        // Search histories stay in date order. The sort is stable, so
        // same-key records keep their date order.
        let mut ordered: Vec<&Record> = records.to_vec();
        if kind == RecordKind::Conversations {
            ordered.sort_by_key(|record| record.sort_key());
        }

        let texts: Vec<String> = ordered.iter().map(|record| record.render()).collect();

        let items = split::split_all(
            &texts,
            self.config.max_input_tokens,
            self.config.split_margin,
            &*self.counter,
        );
        debug!(
            records = texts.len(),
            items = items.len(),
            budget = self.config.max_input_tokens,
            "split oversized items"
        );

        let chunks = chunk::pack(&items, self.config.max_input_tokens, &*self.counter);
        info!(
            items = items.len(),
            chunks = chunks.len(),
            "packed items into chunks"
        );

        let classified = classify::classify_chunks(&*self.classifier, &chunks, kind).await?;
        artifacts::save_json(
            &save_dir.join(format!("{period_id}_classification_results.json")),
            &classified,
        )?;

        let total = classified.len();
        let high = classify::filter_high_signal(classified);
        info!(
            high = high.len(),
            total, "chunks with at least one high-signal trait"
        );

        scorer::score_chunks(&*self.scorer, &high).await
    }
}
