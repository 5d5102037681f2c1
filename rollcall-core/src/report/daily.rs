//! Daily first-time/repeat classification.
//!
//! Produces one row per in-window date with at least one attendance fact,
//! splitting that day's distinct tokens into first-timers and repeats.
//! "First-time" is a lifetime property: the first-occurrence index is built
//! over the full, unfiltered fact set regardless of any window, so a person
//! whose earlier visits were filtered out still classifies as a repeat.

use crate::types::{AttendanceFact, EventFact};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::window::Window;

/// One in-window date with per-category distinct-person counts.
///
/// `first_time + repeat == total` for every row: the two categories split
/// the same token set against the same index with no overlap or omission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    /// Calendar day
    pub day: NaiveDate,
    /// Collapsed event name for this day, if any
    pub event_name: Option<String>,
    /// Distinct tokens attending this day
    pub total: u32,
    /// Distinct tokens whose lifetime-earliest attendance is this day
    pub first_time: u32,
    /// Distinct tokens with a strictly earlier lifetime attendance
    pub repeat: u32,
}

/// Earliest attendance date per token over the full history.
///
/// Every token present anywhere in the input appears in the index, and its
/// entry never postdates any of that token's attendance dates.
pub fn first_occurrence_index(facts: &[AttendanceFact]) -> HashMap<&str, NaiveDate> {
    let mut index: HashMap<&str, NaiveDate> = HashMap::new();
    for fact in facts {
        index
            .entry(fact.token.as_str())
            .and_modify(|earliest| {
                if fact.date < *earliest {
                    *earliest = fact.date;
                }
            })
            .or_insert(fact.date);
    }
    index
}

/// Collapse event facts to one name per date.
///
/// Tie-break: the lexicographically greatest name wins. Deterministic so
/// that a one-to-many join can never inflate downstream counts.
pub fn collapse_event_names(events: &[EventFact]) -> HashMap<NaiveDate, &str> {
    let mut names: HashMap<NaiveDate, &str> = HashMap::new();
    for event in events {
        names
            .entry(event.date)
            .and_modify(|name| {
                if event.name.as_str() > *name {
                    *name = event.name.as_str();
                }
            })
            .or_insert(event.name.as_str());
    }
    names
}

/// Classify every in-window date into a [`DailyRow`], ascending by date.
///
/// Dates with no in-window facts never appear; there is no zero-fill for
/// calendar gaps.
pub fn classify(facts: &[AttendanceFact], events: &[EventFact], window: &Window) -> Vec<DailyRow> {
    // Index over the FULL set; the window only narrows candidate dates.
    let firsts = first_occurrence_index(facts);
    let names = collapse_event_names(events);

    let mut tokens_by_day: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for fact in facts.iter().filter(|f| window.contains(f.date)) {
        tokens_by_day
            .entry(fact.date)
            .or_default()
            .insert(fact.token.as_str());
    }

    tokens_by_day
        .into_iter()
        .map(|(day, tokens)| {
            let total = tokens.len() as u32;
            let mut first_time = 0u32;
            for token in &tokens {
                // The index entry exists and is <= day by construction, so
                // "not equal" can only mean strictly earlier.
                if firsts.get(token) == Some(&day) {
                    first_time += 1;
                }
            }
            DailyRow {
                day,
                event_name: names.get(&day).map(|name| name.to_string()),
                total,
                first_time,
                repeat: total - first_time,
            }
        })
        .collect()
}
