//! Mascot leaderboard: attendance rate per population.
//!
//! A simple join-and-sort kept deliberately outside the report engine.
//! Points are `1000 * attendees / population`, two decimals, with a zero
//! population scoring zero rather than dividing.

use serde::Serialize;

/// One ranked mascot group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// Mascot group name
    pub mascot_name: String,
    /// Display emoji (may be empty)
    pub emoji: String,
    /// Attendance rows credited to this mascot
    pub attendees: i64,
    /// Group population
    pub population: i64,
    /// `1000 * attendees / population`, two decimals
    pub points: f64,
}

impl LeaderboardRow {
    pub fn new(mascot_name: String, emoji: String, attendees: i64, population: i64) -> Self {
        Self {
            points: points(attendees, population),
            mascot_name,
            emoji,
            attendees,
            population,
        }
    }

    /// Share of the population that attended at least once, as a percentage.
    pub fn coverage_pct(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            100.0 * self.attendees as f64 / self.population as f64
        }
    }
}

/// Leaderboard points for a group.
pub fn points(attendees: i64, population: i64) -> f64 {
    if population == 0 {
        return 0.0;
    }
    let raw = 1000.0 * attendees as f64 / population as f64;
    (raw * 100.0).round() / 100.0
}

/// Order rows by points descending; ties break on name so output is stable.
pub fn rank(mut rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    rows.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.mascot_name.cmp(&b.mascot_name))
    });
    rows
}
