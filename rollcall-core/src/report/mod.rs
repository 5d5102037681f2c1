//! Attendance report engine.
//!
//! Pure computation turning the raw attendance log into the derived series,
//! summary, and distribution consumed by every renderer (terminal, JSON,
//! CSV). Four stages, each a stateless pass over in-memory data:
//!
//! ```text
//! facts ──(window filter)──► daily classify ──► series enrich ──► summary
//! facts ──(window filter)──► distribution
//! ```
//!
//! The engine performs no I/O, holds no state between calls, and is
//! infallible: every coercion and empty-input case has a defined value.
//! Feeding it identical inputs with an identical `today` produces identical
//! output, which is why the evaluation date is a parameter rather than a
//! clock read.

pub mod daily;
pub mod distribution;
pub mod series;
pub mod summary;
pub mod window;

pub use daily::DailyRow;
pub use distribution::{DistributionBucket, DISTRIBUTION_CAP};
pub use series::{SeriesRow, ROLLING_WINDOW};
pub use summary::Summary;
pub use window::{Window, MAX_WINDOW_DAYS};

use crate::types::{AttendanceFact, EventFact};
use chrono::NaiveDate;
use serde::Serialize;

/// Round to one decimal place, half away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Complete report output: the payload every renderer consumes verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Effective clamped window; `None` means all time
    pub window_days: Option<u32>,
    /// Aggregate scalars
    pub summary: Summary,
    /// Enriched daily rows, ascending by date
    pub series: Vec<SeriesRow>,
    /// Per-person attendance distribution, ascending by `events`
    pub distribution: Vec<DistributionBucket>,
}

/// Generate the full report from materialized facts.
///
/// `facts` must be the complete, unfiltered history: the first-occurrence
/// classification is a lifetime property, so windowing happens inside the
/// engine rather than upstream. `requested_days` is clamped per
/// [`Window::clamp`]; `today` anchors the trailing window.
pub fn generate(
    facts: &[AttendanceFact],
    events: &[EventFact],
    requested_days: Option<i64>,
    today: NaiveDate,
) -> DashboardReport {
    let window = Window::clamp(requested_days, today);

    let rows = daily::classify(facts, events, &window);
    let series = series::enrich(rows);
    let summary = summary::reduce(&series, facts, &window);
    let distribution = distribution::build(facts, &window);

    tracing::debug!(
        window_days = window.days(),
        series_rows = series.len(),
        buckets = distribution.len(),
        "Generated attendance report"
    );

    DashboardReport {
        window_days: window.effective_days(),
        summary,
        series,
        distribution,
    }
}
