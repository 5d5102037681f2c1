//! Series enrichment: cumulative totals and the rolling event-day average.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::VecDeque;

use super::daily::DailyRow;
use super::round1;

/// Number of most-recent event days the rolling average covers.
pub const ROLLING_WINDOW: usize = 7;

/// A classified day enriched with running aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    /// Calendar day
    pub day: NaiveDate,
    /// Collapsed event name for this day, if any
    pub event_name: Option<String>,
    /// Distinct tokens attending this day
    pub total: u32,
    /// Distinct first-time tokens
    pub first_time: u32,
    /// Distinct repeat tokens
    pub repeat: u32,
    /// Running sum of `total` up to and including this row
    pub cumulative: u64,
    /// Mean of the last <=7 positive totals, one decimal; `None` on a
    /// zero-activity row, which is never itself part of the window
    pub avg7: Option<f64>,
}

/// Thread cumulative totals and the rolling average through the rows.
///
/// Single left-to-right scan over ascending rows. The rolling queue holds
/// at most [`ROLLING_WINDOW`] totals and only rows with `total > 0` enter
/// it; a zero-total row leaves the queue untouched and reports no average.
pub fn enrich(rows: Vec<DailyRow>) -> Vec<SeriesRow> {
    let mut cumulative = 0u64;
    let mut recent: VecDeque<u32> = VecDeque::with_capacity(ROLLING_WINDOW + 1);

    rows.into_iter()
        .map(|row| {
            cumulative += row.total as u64;

            let avg7 = if row.total > 0 {
                recent.push_back(row.total);
                if recent.len() > ROLLING_WINDOW {
                    recent.pop_front();
                }
                let sum: u64 = recent.iter().map(|&t| t as u64).sum();
                Some(round1(sum as f64 / recent.len() as f64))
            } else {
                None
            };

            SeriesRow {
                day: row.day,
                event_name: row.event_name,
                total: row.total,
                first_time: row.first_time,
                repeat: row.repeat,
                cumulative,
                avg7,
            }
        })
        .collect()
}
