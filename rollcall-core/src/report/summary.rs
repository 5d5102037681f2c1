//! Summary reduction over the enriched series.

use crate::types::AttendanceFact;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use super::round1;
use super::series::SeriesRow;
use super::window::Window;

/// Aggregate scalars for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// First row date in the series, if any
    pub from: Option<NaiveDate>,
    /// Last row date in the series, if any
    pub to: Option<NaiveDate>,
    /// Count of rows with at least one attendee
    pub event_days: u32,
    /// Sum of daily distinct-person totals across event days
    pub total_attendances: u64,
    /// `total_attendances / event_days`, one decimal, 0 when empty
    pub avg_per_event_day: f64,
    /// Date of the busiest day; earliest wins ties
    pub peak_day: Option<NaiveDate>,
    /// Total on the peak day
    pub peak_total: u32,
    /// First-time count on the peak day
    pub peak_first_time: u32,
    /// Repeat count on the peak day
    pub peak_repeat: u32,
    /// Distinct tokens with at least one in-window fact
    pub unique_people_in_window: u64,
    /// Distinct tokens over the full history
    pub unique_people_all_time: u64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            event_days: 0,
            total_attendances: 0,
            avg_per_event_day: 0.0,
            peak_day: None,
            peak_total: 0,
            peak_first_time: 0,
            peak_repeat: 0,
            unique_people_in_window: 0,
            unique_people_all_time: 0,
        }
    }
}

/// Reduce the enriched series (plus the raw fact set) to summary scalars.
///
/// `total_attendances` sums `total` over event days only. That equals the
/// final cumulative only when every row has a positive total; callers must
/// not assume the two agree in general.
pub fn reduce(series: &[SeriesRow], facts: &[AttendanceFact], window: &Window) -> Summary {
    let mut summary = Summary {
        from: series.first().map(|r| r.day),
        to: series.last().map(|r| r.day),
        ..Summary::default()
    };

    for row in series {
        if row.total > 0 {
            summary.event_days += 1;
            summary.total_attendances += row.total as u64;
        }
        // Strictly greater: the earliest maximum wins ties.
        if row.total > summary.peak_total {
            summary.peak_day = Some(row.day);
            summary.peak_total = row.total;
            summary.peak_first_time = row.first_time;
            summary.peak_repeat = row.repeat;
        }
    }

    if summary.event_days > 0 {
        summary.avg_per_event_day =
            round1(summary.total_attendances as f64 / summary.event_days as f64);
    }

    let mut all_time: HashSet<&str> = HashSet::new();
    let mut in_window: HashSet<&str> = HashSet::new();
    for fact in facts {
        all_time.insert(fact.token.as_str());
        if window.contains(fact.date) {
            in_window.insert(fact.token.as_str());
        }
    }
    summary.unique_people_all_time = all_time.len() as u64;
    summary.unique_people_in_window = in_window.len() as u64;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttendanceFact;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn row(day: u32, total: u32) -> SeriesRow {
        SeriesRow {
            day: d(day),
            event_name: None,
            total,
            first_time: total,
            repeat: 0,
            cumulative: 0,
            avg7: None,
        }
    }

    fn all_time() -> Window {
        Window::clamp(None, d(31))
    }

    #[test]
    fn test_empty_series_yields_defaults() {
        let summary = reduce(&[], &[], &all_time());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.avg_per_event_day, 0.0);
        assert_eq!(summary.peak_day, None);
    }

    #[test]
    fn test_single_row_summary() {
        let facts: Vec<AttendanceFact> = (0..5)
            .map(|i| AttendanceFact::new(format!("t{i}"), d(1)))
            .collect();
        let summary = reduce(&[row(1, 5)], &facts, &all_time());

        assert_eq!(summary.from, Some(d(1)));
        assert_eq!(summary.to, Some(d(1)));
        assert_eq!(summary.event_days, 1);
        assert_eq!(summary.total_attendances, 5);
        assert_eq!(summary.avg_per_event_day, 5.0);
        assert_eq!(summary.peak_day, Some(d(1)));
        assert_eq!(summary.peak_total, 5);
        assert_eq!(summary.unique_people_all_time, 5);
    }

    #[test]
    fn test_peak_tie_keeps_earliest_date() {
        let series = vec![row(1, 3), row(5, 7), row(9, 7), row(12, 2)];
        let summary = reduce(&series, &[], &all_time());
        assert_eq!(summary.peak_day, Some(d(5)));
        assert_eq!(summary.peak_total, 7);
    }

    #[test]
    fn test_avg_per_event_day_rounds() {
        // 3 + 4 = 7 over 2 event days -> 3.5
        let summary = reduce(&[row(1, 3), row(2, 4)], &[], &all_time());
        assert_eq!(summary.avg_per_event_day, 3.5);

        // 1 + 1 + 2 = 4 over 3 -> 1.333... -> 1.3
        let summary = reduce(&[row(1, 1), row(2, 1), row(3, 2)], &[], &all_time());
        assert_eq!(summary.avg_per_event_day, 1.3);
    }

    #[test]
    fn test_unique_people_window_vs_all_time() {
        let facts = vec![
            AttendanceFact::new("old", d(1)),
            AttendanceFact::new("new", d(20)),
            AttendanceFact::new("both", d(1)),
            AttendanceFact::new("both", d(20)),
        ];
        let window = Window::clamp(Some(15), d(30));
        let summary = reduce(&[], &facts, &window);
        assert_eq!(summary.unique_people_all_time, 3);
        assert_eq!(summary.unique_people_in_window, 2);
    }
}
