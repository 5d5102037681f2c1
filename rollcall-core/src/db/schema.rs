//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    -- Attendance log: one row per recorded presence. The engine counts
    -- distinct tokens per day, so the pair is unique and repeat imports
    -- are no-ops.
    CREATE TABLE IF NOT EXISTS attendances (
        token   TEXT NOT NULL,
        date    TEXT NOT NULL,
        PRIMARY KEY (token, date)
    );

    CREATE INDEX IF NOT EXISTS idx_attendances_date ON attendances(date);

    -- Named occasions. More than one row per date is tolerated; the report
    -- engine collapses to one name deterministically.
    CREATE TABLE IF NOT EXISTS events (
        event_date  TEXT NOT NULL,
        event_name  TEXT NOT NULL,
        PRIMARY KEY (event_date, event_name)
    );

    -- Leaderboard inputs
    CREATE TABLE IF NOT EXISTS people (
        token   TEXT PRIMARY KEY,
        mascot  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS mascots (
        mascot_name TEXT PRIMARY KEY,
        emoji       TEXT NOT NULL DEFAULT '',
        population  INTEGER NOT NULL
    );
    "#,
];

/// Run all pending migrations on the connection
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current >= SCHEMA_VERSION {
        tracing::debug!(version = current, "Schema is up to date");
        return Ok(());
    }

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version <= current {
            continue;
        }
        tracing::info!(version, "Applying schema migration");
        conn.execute_batch(migration)?;
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}
