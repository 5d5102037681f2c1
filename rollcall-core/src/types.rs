//! Core domain types for rollcall
//!
//! These types represent the materialized attendance log that every
//! computation consumes. Facts are immutable: nothing in this crate
//! deletes or rewrites a fact once it is recorded.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Token** | Opaque person identifier, stable across all time |
//! | **Event-day** | A calendar date with at least one attendance fact |
//! | **First-time** | An attendance on the token's lifetime-earliest date |
//! | **Repeat** | An attendance strictly after the token's earliest date |
//! | **Window** | A trailing-day filter applied before aggregation |
//! | **Mascot** | A group a person belongs to, ranked on the leaderboard |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded attendance: a person (token) was present on a date.
///
/// Multiple facts may share a date (many people) or a token (many days).
/// Calendar day only; there is no time component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceFact {
    /// Opaque person identifier
    pub token: String,
    /// Calendar day of the attendance
    pub date: NaiveDate,
}

impl AttendanceFact {
    pub fn new(token: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            token: token.into(),
            date,
        }
    }
}

/// A named occasion on a calendar day.
///
/// The upstream source may yield more than one row per date; the report
/// engine collapses them to a single deterministic name before joining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFact {
    /// Calendar day of the event
    pub date: NaiveDate,
    /// Display label for the occasion
    pub name: String,
}

impl EventFact {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// A person's mascot membership (leaderboard input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Opaque person identifier
    pub token: String,
    /// Name of the mascot group this person belongs to
    pub mascot: String,
}

/// A mascot group with its population (leaderboard input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mascot {
    /// Unique mascot name
    pub name: String,
    /// Display emoji (may be empty)
    pub emoji: String,
    /// Group population, used as the leaderboard denominator
    pub population: i64,
}
