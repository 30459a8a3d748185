//! # ocean
//!
//! OCEAN trait-scoring CLI — estimates five-factor personality scores from
//! dated chat or search-history records, period by period, using external
//! classification and scoring oracles.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;

use ocean_core::{Granularity, RecordKind};
use ocean_llm::{OpenAiOracle, OracleConfig};
use ocean_runtime::{HeuristicTokenCounter, Pipeline, PipelineConfig, RunOptions, load_records};
use ocean_settings::{OceanSettings, load_settings, load_settings_from_path};

/// OCEAN trait scorer.
#[derive(Parser, Debug)]
#[command(
    name = "ocean",
    about = "Estimate OCEAN personality-trait scores from dated text records"
)]
struct Cli {
    /// Directory containing the record JSON files.
    #[arg(short = 'd', long)]
    data_dir: PathBuf,

    /// Scoring period: weekly, monthly, annually, or lifetime.
    #[arg(short = 'p', long)]
    period: String,

    /// Record kind: conversations or searches.
    #[arg(short = 't', long = "type")]
    kind: String,

    /// Start date override in YYYY-MM-DD format (defaults to the oldest
    /// record date).
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// End date override in YYYY-MM-DD format (defaults to the newest
    /// record date).
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Directory for generated artifacts (defaults to the settings value).
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Path to a settings JSON file (defaults to `~/.ocean/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// Initialize the tracing subscriber: compact format to stderr, level from
/// `RUST_LOG` with an `info` fallback.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();
    // try_init is a no-op if a subscriber is already set
    let _ = subscriber.try_init();
}

fn load_effective_settings(cli: &Cli) -> Result<OceanSettings> {
    match &cli.settings {
        Some(path) => load_settings_from_path(path),
        None => load_settings(),
    }
    .context("failed to load settings")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Validate period and kind before touching any data.
    let granularity: Granularity = cli.period.parse()?;
    let kind: RecordKind = cli.kind.parse()?;

    let settings = load_effective_settings(&cli)?;
    let Some(api_key) = settings.oracle.api_key.clone() else {
        bail!("no oracle API key configured — set OCEAN_API_KEY or OPENAI_API_KEY");
    };

    tracing::info!(
        %kind,
        %granularity,
        data_dir = %cli.data_dir.display(),
        budget = settings.tokens.max_input_tokens,
        "ocean starting"
    );

    let client = reqwest::Client::new();
    let classifier = Arc::new(OpenAiOracle::with_client(
        OracleConfig {
            base_url: settings.oracle.base_url.clone(),
            model: settings.oracle.classify_model.clone(),
            api_key: api_key.clone(),
        },
        client.clone(),
    ));
    let scorer = Arc::new(OpenAiOracle::with_client(
        OracleConfig {
            base_url: settings.oracle.base_url.clone(),
            model: settings.oracle.score_model.clone(),
            api_key,
        },
        client,
    ));

    let store = load_records(&cli.data_dir, kind)
        .with_context(|| format!("failed to ingest records from {}", cli.data_dir.display()))?;

    let pipeline = Pipeline::new(
        classifier,
        scorer,
        Arc::new(HeuristicTokenCounter::new(settings.tokens.chars_per_token)),
        PipelineConfig {
            max_input_tokens: settings.tokens.max_input_tokens,
            split_margin: settings.tokens.split_margin,
        },
    );

    let opts = RunOptions {
        kind,
        granularity,
        start_date: cli.start_date,
        end_date: cli.end_date,
        save_path: cli
            .save_path
            .unwrap_or_else(|| PathBuf::from(&settings.output.save_path)),
    };

    let score = pipeline.run(&store, &opts).await?;
    println!("{}", serde_json::to_string_pretty(&score)?);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
