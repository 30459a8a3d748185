//! Persisted run artifacts.
//!
//! Every artifact is pretty-printed UTF-8 JSON under
//! `{save_path}/{kind}/{granularity}/`: one classification-results file and
//! one score file per processed period, plus `latest.json`, the running
//! merged score loaded at the start of a run and overwritten at the end.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use ocean_core::ScoreVector;

use crate::errors::Result;

/// File name of the running merged score.
pub const LATEST_FILE: &str = "latest.json";

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    debug!(?path, "saved artifact");
    Ok(())
}

/// Load the previously persisted merged score, if one exists.
pub fn load_latest(dir: &Path) -> Result<Option<ScoreVector>> {
    let path = dir.join(LATEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let score: ScoreVector = serde_json::from_str(&content)?;
    debug!(?path, "loaded persisted score");
    Ok(Some(score))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
