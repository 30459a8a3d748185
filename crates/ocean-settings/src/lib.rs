//! # ocean-settings
//!
//! Configuration management with layered sources for the OCEAN pipeline.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`OceanSettings::default()`]
//! 2. **User file** — `~/.ocean/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `OCEAN_*` overrides (highest priority)
//!
//! The oracle API key is never written back to disk; it is read from
//! `OCEAN_API_KEY` (or `OPENAI_API_KEY`) at load time.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{OceanSettings, OracleSettings, OutputSettings, TokenSettings};
