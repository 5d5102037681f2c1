//! Trailing-window selection.
//!
//! A report request may carry a trailing day count. The count is clamped to
//! [0, 3650]; zero (or anything negative/absent) means "all time". The
//! cutoff is evaluated against a caller-supplied `today` so that report
//! output is deterministic under test.

use chrono::{Duration, NaiveDate};

/// Largest accepted trailing-window day count (ten years).
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Effective trailing-day filter for one report invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    days: u32,
    cutoff: Option<NaiveDate>,
}

impl Window {
    /// Clamp a requested day count and fix the cutoff date.
    ///
    /// Absent or negative requests normalize to 0 (no filter); requests
    /// above [`MAX_WINDOW_DAYS`] saturate. An active window keeps facts
    /// dated on or after `today - days`.
    pub fn clamp(requested: Option<i64>, today: NaiveDate) -> Self {
        let days = requested.unwrap_or(0).clamp(0, MAX_WINDOW_DAYS) as u32;
        let cutoff = (days > 0).then(|| today - Duration::days(days as i64));
        Self { days, cutoff }
    }

    /// Whether a trailing-day filter is in effect.
    pub fn is_active(&self) -> bool {
        self.days > 0
    }

    /// The clamped day count (0 = all time).
    pub fn days(&self) -> u32 {
        self.days
    }

    /// The clamped day count for payload echo: `None` means all time.
    pub fn effective_days(&self) -> Option<u32> {
        self.is_active().then_some(self.days)
    }

    /// Whether a fact on `date` falls inside the window. Always true for
    /// an inactive window; the cutoff itself is inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.cutoff.map_or(true, |cutoff| date >= cutoff)
    }
}
