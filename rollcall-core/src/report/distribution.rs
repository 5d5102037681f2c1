//! Per-person attendance-count distribution with long-tail capping.

use crate::types::AttendanceFact;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::window::Window;

/// Distinct-day counts at or above this value collapse into one bucket.
pub const DISTRIBUTION_CAP: u32 = 20;

/// People grouped by how many distinct event-days they attended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    /// Distinct-day count, or [`DISTRIBUTION_CAP`] for the overflow bucket
    pub events: u32,
    /// Number of people with exactly this count (or at/above the cap)
    pub people: u64,
    /// Display label: the count, or `"20+"` for the overflow bucket
    pub label: String,
}

/// Group people by their in-window distinct-attended-day count.
///
/// Buckets are ascending by `events`. There is no zero bucket: only tokens
/// with at least one in-window fact are considered. Counts at or above
/// [`DISTRIBUTION_CAP`] merge into a single trailing bucket labeled `"20+"`,
/// emitted only when such counts exist.
pub fn build(facts: &[AttendanceFact], window: &Window) -> Vec<DistributionBucket> {
    let mut days_per_token: HashMap<&str, HashSet<NaiveDate>> = HashMap::new();
    for fact in facts.iter().filter(|f| window.contains(f.date)) {
        days_per_token
            .entry(fact.token.as_str())
            .or_default()
            .insert(fact.date);
    }

    let mut people_by_count: BTreeMap<u32, u64> = BTreeMap::new();
    for days in days_per_token.values() {
        *people_by_count.entry(days.len() as u32).or_default() += 1;
    }

    let mut buckets = Vec::with_capacity(people_by_count.len());
    let mut overflow = 0u64;
    for (&events, &people) in &people_by_count {
        if events >= DISTRIBUTION_CAP {
            overflow += people;
        } else {
            buckets.push(DistributionBucket {
                events,
                people,
                label: events.to_string(),
            });
        }
    }
    if overflow > 0 {
        buckets.push(DistributionBucket {
            events: DISTRIBUTION_CAP,
            people: overflow,
            label: format!("{DISTRIBUTION_CAP}+"),
        });
    }
    buckets
}
