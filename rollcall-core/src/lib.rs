//! # rollcall-core
//!
//! Core library for rollcall - attendance analytics over an event log.
//!
//! This library provides:
//! - Domain types for attendance and event facts
//! - SQLite storage layer with migrations
//! - CSV ingest with upstream validation
//! - The pure report engine (daily first-time/repeat split, rolling
//!   event-day average, cumulative totals, per-person distribution)
//! - Renderers for the JSON/CSV report payload
//! - The mascot leaderboard
//!
//! ## Architecture
//!
//! The report engine is a pure function over materialized facts: commands
//! fetch the full attendance history from the database, then call
//! [`report::generate`] with an injectable evaluation date. Storage and
//! presentation never leak into the engine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rollcall_core::{report, Config, Database};
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let facts = db.attendance_facts().expect("fetch attendance");
//! let events = db.event_facts().expect("fetch events");
//! let today = chrono::Local::now().date_naive();
//! let dashboard = report::generate(&facts, &events, Some(90), today);
//! println!("{} event days", dashboard.summary.event_days);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod leaderboard;
pub mod logging;
pub mod render;
pub mod report;
pub mod types;
