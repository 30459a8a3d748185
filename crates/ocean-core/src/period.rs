//! Calendar period segmentation.
//!
//! Splits an overall date range into contiguous sub-ranges at a configured
//! granularity. Monthly and annual steps are calendar-aware: Jan 31 + one
//! month lands on Feb 28/29, not a fixed day count.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};

use crate::errors::{CoreError, Result};

/// Period granularity for segmenting a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Seven-day steps.
    Weekly,
    /// One calendar month steps.
    Monthly,
    /// One calendar year steps.
    Annually,
    /// No segmentation — the whole range is a single period.
    Lifetime,
}

impl Granularity {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Annually => "annually",
            Self::Lifetime => "lifetime",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "annually" => Ok(Self::Annually),
            "lifetime" => Ok(Self::Lifetime),
            other => Err(CoreError::UnsupportedPeriod(other.to_string())),
        }
    }
}

/// A closed date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl Period {
    /// Derived identifier, used to name persisted artifacts.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-TO-{}", self.start, self.end)
    }
}

/// Advance a date by one granularity step.
///
/// Returns `None` only on date overflow at the far end of the representable
/// range; callers clip to the requested end in that case.
fn advance(date: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Weekly => date.checked_add_days(Days::new(7)),
        Granularity::Monthly => date.checked_add_months(Months::new(1)),
        Granularity::Annually => date.checked_add_months(Months::new(12)),
        Granularity::Lifetime => None,
    }
}

/// Segment `[start, end]` into contiguous periods at the given granularity.
///
/// The final period is clipped so its end equals `end` exactly. A degenerate
/// `start == end` range yields one single-day period. `Lifetime` yields the
/// whole range as one period.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateRange`] when `start > end`.
pub fn segment(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Result<Vec<Period>> {
    if start > end {
        return Err(CoreError::InvalidDateRange { start, end });
    }
    if granularity == Granularity::Lifetime || start == end {
        return Ok(vec![Period { start, end }]);
    }

    let mut periods = Vec::new();
    let mut current = start;
    while current < end {
        let next = advance(current, granularity).map_or(end, |d| d.min(end));
        periods.push(Period {
            start: current,
            end: next,
        });
        current = next;
    }
    Ok(periods)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
