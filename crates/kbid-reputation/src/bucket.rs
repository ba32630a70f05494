// crates/kbid-reputation/src/bucket.rs
//
// Threshold banding shared by every platform scorer.
//
// A raw metric maps to points through ascending half-open bands
// `[lo, hi)`; anything at or above the last bound lands in the inclusive
// top band. Ages are banded in days below a platform-specific switch point
// and in years (days / 365) at or above it, so the switch value itself is
// always scored by the year bands.

use chrono::{DateTime, Utc};

/// Days per year when converting ages for the year bands.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Ascending bands over a metric.
#[derive(Debug, Clone, Copy)]
pub struct Bands<T: 'static> {
    /// `(exclusive upper bound, points)` pairs in ascending bound order.
    pub cuts: &'static [(T, u32)],
    /// Points for values at or above the last bound.
    pub top: u32,
}

impl<T: PartialOrd + Copy + 'static> Bands<T> {
    pub fn score(&self, value: T) -> u32 {
        self.cuts
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|&(_, points)| points)
            .unwrap_or(self.top)
    }
}

/// Account or credential age bands with a days-to-years switch.
#[derive(Debug, Clone, Copy)]
pub struct AgeBands {
    /// Ages strictly below this many days use `days`; the rest use `years`.
    pub year_switch_days: f64,
    /// Bands over whole days, applied to ages in `[0, year_switch_days)`.
    pub days: Bands<f64>,
    /// Bands over fractional years, applied to ages `>= year_switch_days`.
    pub years: Bands<f64>,
}

impl AgeBands {
    pub fn score(&self, age_days: f64) -> u32 {
        let age_days = age_days.max(0.0);
        if age_days < self.year_switch_days {
            self.days.score(age_days)
        } else {
            self.years.score(age_days / DAYS_PER_YEAR)
        }
    }
}

/// Whole days elapsed from `then` to `now`, truncated. Future times count as 0.
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days().max(0)
}
