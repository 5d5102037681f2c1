//! Database layer for rollcall
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository pattern for inserts and fact materialization

pub mod repo;
pub mod schema;

pub use repo::Database;
