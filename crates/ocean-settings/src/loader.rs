//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`OceanSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::OceanSettings;

/// Resolve the path to the settings file (`~/.ocean/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".ocean").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<OceanSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<OceanSettings> {
    let defaults = serde_json::to_value(OceanSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: OceanSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Integers must parse and fall within their allowed range; invalid values
/// are silently ignored (falling back to file/default).
pub fn apply_env_overrides(settings: &mut OceanSettings) {
    // ── Token settings ──────────────────────────────────────────────
    if let Some(v) = read_env_usize("OCEAN_MAX_INPUT_TOKENS", 256, 1_000_000) {
        settings.tokens.max_input_tokens = v;
    }
    if let Some(v) = read_env_usize("OCEAN_SPLIT_MARGIN", 0, 10_000) {
        settings.tokens.split_margin = v;
    }
    if let Some(v) = read_env_usize("OCEAN_CHARS_PER_TOKEN", 1, 64) {
        settings.tokens.chars_per_token = v;
    }

    // ── Oracle settings ─────────────────────────────────────────────
    if let Some(v) = read_env_string("OCEAN_BASE_URL") {
        settings.oracle.base_url = v;
    }
    if let Some(v) = read_env_string("OCEAN_CLASSIFY_MODEL") {
        settings.oracle.classify_model = v;
    }
    if let Some(v) = read_env_string("OCEAN_SCORE_MODEL") {
        settings.oracle.score_model = v;
    }
    if let Some(v) = read_env_string("OCEAN_API_KEY").or_else(|| read_env_string("OPENAI_API_KEY"))
    {
        settings.oracle.api_key = Some(v);
    }

    // ── Output settings ─────────────────────────────────────────────
    if let Some(v) = read_env_string("OCEAN_SAVE_PATH") {
        settings.output.save_path = v;
    }
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    parse_usize_range(&std::env::var(name).ok()?, min, max)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
