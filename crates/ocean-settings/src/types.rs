//! Settings type definitions with compiled defaults.

use serde::{Deserialize, Serialize};

/// Root settings for the OCEAN pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OceanSettings {
    /// Token budget and sizing knobs.
    pub tokens: TokenSettings,
    /// Oracle transport configuration.
    pub oracle: OracleSettings,
    /// Output and artifact configuration.
    pub output: OutputSettings,
}

/// Token budget and text-sizing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenSettings {
    /// Maximum tokens a single chunk should carry — the model-context
    /// budget reserved for record text.
    pub max_input_tokens: usize,
    /// Safety buffer subtracted from the character budget when splitting
    /// oversized items, absorbing tokenizer non-linearity.
    pub split_margin: usize,
    /// Characters-per-token ratio of the heuristic counter.
    pub chars_per_token: usize,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            max_input_tokens: 3076,
            split_margin: 50,
            chars_per_token: 4,
        }
    }
}

/// Oracle transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OracleSettings {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model used for qualitative trait classification.
    pub classify_model: String,
    /// Model used for numeric trait scoring.
    pub score_model: String,
    /// API key. Usually supplied via `OCEAN_API_KEY` / `OPENAI_API_KEY`
    /// rather than the settings file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            classify_model: "gpt-3.5-turbo-1106".to_string(),
            score_model: "gpt-4".to_string(),
            api_key: None,
        }
    }
}

/// Output and artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    /// Directory where per-period artifacts and `latest.json` are written.
    pub save_path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            save_path: "ocean_output".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
