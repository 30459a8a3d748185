//! Trait score vectors and aggregation.
//!
//! A [`ScoreVector`] carries one score in `[0, 1]` per OCEAN trait. Using a
//! struct with exactly five fields (rather than an open map) guarantees every
//! vector has the same key set, which is what makes elementwise averaging
//! well-defined everywhere it is used.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CoreError, Result};

/// The five OCEAN trait names, in canonical order.
pub const TRAITS: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

/// Qualitative signal strength assigned to a trait by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitLevel {
    /// No indication of the trait at all.
    None,
    /// Barely noticeable.
    Low,
    /// Somewhat noticeable.
    Medium,
    /// Very noticeable.
    High,
}

impl TraitLevel {
    /// Parse a level case-insensitively. Returns `None` for anything that is
    /// not one of the four defined levels.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Whether this level counts as a strong signal.
    #[must_use]
    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

/// One score per OCEAN trait, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    /// Openness to experience.
    pub openness: f64,
    /// Conscientiousness.
    pub conscientiousness: f64,
    /// Extraversion.
    pub extraversion: f64,
    /// Agreeableness.
    pub agreeableness: f64,
    /// Neuroticism.
    pub neuroticism: f64,
}

impl ScoreVector {
    /// The neutral vector: 0.5 for every trait. Used when a period has no
    /// chunk with a strong enough signal to score.
    #[must_use]
    pub fn neutral() -> Self {
        Self::from_array([0.5; 5])
    }

    /// Build from an array in canonical [`TRAITS`] order.
    #[must_use]
    pub fn from_array(values: [f64; 5]) -> Self {
        Self {
            openness: values[0],
            conscientiousness: values[1],
            extraversion: values[2],
            agreeableness: values[3],
            neuroticism: values[4],
        }
    }

    /// Values in canonical [`TRAITS`] order.
    #[must_use]
    pub fn to_array(self) -> [f64; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    /// Extract a score vector from a JSON object keyed by trait name.
    ///
    /// Values may be JSON numbers or numeric strings (the scoring oracle
    /// returns strings). Returns `None` when any trait is missing,
    /// unparseable, or outside `[0, 1]` — the caller treats that as a
    /// malformed response.
    #[must_use]
    pub fn from_json_object(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut values = [0.0f64; 5];
        for (slot, trait_name) in values.iter_mut().zip(TRAITS) {
            let raw = obj.get(trait_name)?;
            let score = match raw {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                _ => return None,
            };
            if !(0.0..=1.0).contains(&score) {
                return None;
            }
            *slot = score;
        }
        Some(Self::from_array(values))
    }

    /// Merge a new run's score with a previously persisted one.
    ///
    /// A plain two-element average: the new run contributes half of the
    /// updated total, the prior cumulative value the other half.
    #[must_use]
    pub fn merge(self, prior: Self) -> Self {
        mean(&[self, prior])
    }
}

/// Round to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Elementwise mean of a non-empty slice, rounded to two decimals.
fn mean(scores: &[ScoreVector]) -> ScoreVector {
    let mut sums = [0.0f64; 5];
    for score in scores {
        for (sum, value) in sums.iter_mut().zip(score.to_array()) {
            *sum += value;
        }
    }
    let n = scores.len() as f64;
    ScoreVector::from_array(sums.map(|sum| round2(sum / n)))
}

/// Elementwise arithmetic mean over matching trait keys, rounded to two
/// decimal places. Order-independent: any permutation of the input yields
/// the same result.
///
/// # Errors
///
/// Returns [`CoreError::EmptyAggregation`] for an empty input — there is no
/// defined default at this layer.
pub fn average(scores: &[ScoreVector]) -> Result<ScoreVector> {
    if scores.is_empty() {
        return Err(CoreError::EmptyAggregation);
    }
    Ok(mean(scores))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
