//! End-to-end pipeline tests with scripted oracles.
//!
//! Each test builds a store inline, runs the full orchestrator against
//! temp-dir artifacts, and asserts on both the returned score and the
//! persisted files.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use ocean_core::{
    Granularity, Record, RecordKind, RecordStore, ScoreVector, SearchEntry, SearchHistory,
};
use ocean_llm::{Oracle, OracleError, OracleResult};
use ocean_runtime::{
    HeuristicTokenCounter, Pipeline, PipelineConfig, PipelineError, RunOptions,
};

/// Replays scripted completions and counts calls.
struct TestOracle {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl TestOracle {
    fn new(responses: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for TestOracle {
    async fn complete(&self, _prompt: &str) -> OracleResult<String> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OracleError::Other {
                message: "test oracle exhausted".into(),
            })
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn search_record(day: NaiveDate) -> Record {
    Record::SearchHistory(SearchHistory {
        date: day,
        entries: vec![SearchEntry {
            hour: "10".into(),
            title: "planning a surprise party".into(),
        }],
    })
}

fn classification_response(openness: &str, rest: &str) -> String {
    format!(
        r#"The text shows clear signals. {{"openness": "{openness}", "conscientiousness": "{rest}", "extraversion": "{rest}", "agreeableness": "{rest}", "neuroticism": "{rest}"}}"#
    )
}

fn score_response(value: &str) -> String {
    format!(
        r#"Scores follow from the levels. {{"openness": "{value}", "conscientiousness": "{value}", "extraversion": "{value}", "agreeableness": "{value}", "neuroticism": "{value}"}}"#
    )
}

fn uniform(v: f64) -> ScoreVector {
    ScoreVector::from_array([v; 5])
}

fn pipeline(classifier: &Arc<TestOracle>, scorer: &Arc<TestOracle>) -> Pipeline {
    Pipeline::new(
        classifier.clone(),
        scorer.clone(),
        Arc::new(HeuristicTokenCounter::default()),
        PipelineConfig::default(),
    )
}

fn options(kind: RecordKind, granularity: Granularity, save_path: &Path) -> RunOptions {
    RunOptions {
        kind,
        granularity,
        start_date: None,
        end_date: None,
        save_path: save_path.to_path_buf(),
    }
}

#[tokio::test]
async fn empty_store_is_rejected_before_any_oracle_call() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec![]);
    let scorer = TestOracle::new(vec![]);
    let store = RecordStore::new();

    let err = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::EmptyInput { .. }));
    assert_eq!(classifier.calls(), 0);
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn single_period_run_persists_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec![classification_response("high", "low")]);
    let scorer = TestOracle::new(vec![score_response("0.8")]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 10)));

    let score = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap();

    assert_eq!(score, uniform(0.8));
    assert_eq!(classifier.calls(), 1);
    assert_eq!(scorer.calls(), 1);

    let save_dir = dir.path().join("searches").join("lifetime");
    let period_id = "2024-01-10-TO-2024-01-10";
    assert!(save_dir.join(format!("{period_id}.json")).exists());
    assert!(
        save_dir
            .join(format!("{period_id}_classification_results.json"))
            .exists()
    );

    let latest: ScoreVector =
        serde_json::from_str(&std::fs::read_to_string(save_dir.join("latest.json")).unwrap())
            .unwrap();
    assert_eq!(latest, uniform(0.8));
}

#[tokio::test]
async fn no_high_signal_yields_neutral_without_scoring_call() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec![classification_response("medium", "low")]);
    let scorer = TestOracle::new(vec![]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 10)));

    let score = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap();

    assert_eq!(score, ScoreVector::neutral());
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn malformed_classification_degrades_to_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec!["no json in this answer".into()]);
    let scorer = TestOracle::new(vec![]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 10)));

    let score = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap();

    // The only chunk was dropped as malformed: zero qualifying chunks is
    // the neutral default, not an error.
    assert_eq!(score, ScoreVector::neutral());
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn merge_with_persisted_score_is_two_element_average() {
    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().join("searches").join("lifetime");
    std::fs::create_dir_all(&save_dir).unwrap();
    std::fs::write(
        save_dir.join("latest.json"),
        serde_json::to_string_pretty(&uniform(0.4)).unwrap(),
    )
    .unwrap();

    let classifier = TestOracle::new(vec![classification_response("high", "low")]);
    let scorer = TestOracle::new(vec![score_response("0.6")]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 10)));

    let score = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap();

    assert_eq!(score, uniform(0.5));

    let latest: ScoreVector =
        serde_json::from_str(&std::fs::read_to_string(save_dir.join("latest.json")).unwrap())
            .unwrap();
    assert_eq!(latest, uniform(0.5));
}

#[tokio::test]
async fn empty_periods_are_skipped_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    // Two records two months apart; the middle monthly period is empty.
    let classifier = TestOracle::new(vec![
        classification_response("high", "low"),
        classification_response("high", "low"),
    ]);
    let scorer = TestOracle::new(vec![score_response("0.2"), score_response("0.8")]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 5)));
    store.insert(search_record(date(2024, 3, 5)));

    let mut opts = options(RecordKind::Searches, Granularity::Monthly, dir.path());
    opts.start_date = Some(date(2024, 1, 1));
    opts.end_date = Some(date(2024, 3, 15));

    let score = pipeline(&classifier, &scorer)
        .run(&store, &opts)
        .await
        .unwrap();

    // Two scored periods averaged; the empty one contributed nothing.
    assert_eq!(score, uniform(0.5));

    let save_dir = dir.path().join("searches").join("monthly");
    assert!(save_dir.join("2024-01-01-TO-2024-02-01.json").exists());
    assert!(save_dir.join("2024-03-01-TO-2024-03-15.json").exists());
    assert!(!save_dir.join("2024-02-01-TO-2024-03-01.json").exists());
    assert!(
        !save_dir
            .join("2024-02-01-TO-2024-03-01_classification_results.json")
            .exists()
    );
}

#[tokio::test]
async fn range_with_no_records_is_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec![]);
    let scorer = TestOracle::new(vec![]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 6, 1)));

    let mut opts = options(RecordKind::Searches, Granularity::Weekly, dir.path());
    opts.start_date = Some(date(2020, 1, 1));
    opts.end_date = Some(date(2020, 2, 1));

    let err = pipeline(&classifier, &scorer)
        .run(&store, &opts)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::EmptyInput { .. }));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn start_after_end_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = TestOracle::new(vec![]);
    let scorer = TestOracle::new(vec![]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 6, 1)));

    let mut opts = options(RecordKind::Searches, Granularity::Weekly, dir.path());
    opts.start_date = Some(date(2024, 7, 1));
    opts.end_date = Some(date(2024, 6, 1));

    let err = pipeline(&classifier, &scorer)
        .run(&store, &opts)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Core(ocean_core::CoreError::InvalidDateRange { .. })
    ));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn oracle_transport_fault_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    // Exhausted script → transport-class error on the first call.
    let classifier = TestOracle::new(vec![]);
    let scorer = TestOracle::new(vec![]);

    let mut store = RecordStore::new();
    store.insert(search_record(date(2024, 1, 10)));

    let err = pipeline(&classifier, &scorer)
        .run(
            &store,
            &options(RecordKind::Searches, Granularity::Lifetime, dir.path()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Oracle(_)));
}
