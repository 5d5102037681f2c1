//! Database repository layer
//!
//! Provides insert operations and fact materialization. The report engine
//! never touches the database: commands materialize the full fact sets
//! here, then hand them to `report::generate`.

use crate::error::Result;
use crate::leaderboard::{self, LeaderboardRow};
use crate::types::{AttendanceFact, EventFact, Mascot, Person};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Database handle with a single pooled connection
pub struct Database {
    conn: Mutex<Connection>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for better concurrency
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Attendance operations
    // ============================================

    /// Record an attendance fact. Returns false when the (token, date)
    /// pair was already present.
    pub fn insert_attendance(&self, fact: &AttendanceFact) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO attendances (token, date) VALUES (?1, ?2)",
            params![fact.token, fact.date.format(DATE_FORMAT).to_string()],
        )?;
        Ok(changed > 0)
    }

    /// Materialize the full attendance history, ordered by date then token.
    pub fn attendance_facts(&self) -> Result<Vec<AttendanceFact>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT token, date FROM attendances ORDER BY date ASC, token ASC")?;
        let facts = stmt
            .query_map([], |row| {
                let token: String = row.get(0)?;
                let date: String = row.get(1)?;
                Ok(AttendanceFact {
                    token,
                    date: parse_date(&date)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(facts)
    }

    // ============================================
    // Event operations
    // ============================================

    /// Record a named occasion. Returns false on an exact duplicate.
    pub fn insert_event(&self, event: &EventFact) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO events (event_date, event_name) VALUES (?1, ?2)",
            params![event.date.format(DATE_FORMAT).to_string(), event.name],
        )?;
        Ok(changed > 0)
    }

    /// Materialize all event facts, ordered by date then name.
    pub fn event_facts(&self) -> Result<Vec<EventFact>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT event_date, event_name FROM events ORDER BY event_date ASC, event_name ASC")?;
        let events = stmt
            .query_map([], |row| {
                let date: String = row.get(0)?;
                let name: String = row.get(1)?;
                Ok(EventFact {
                    date: parse_date(&date)?,
                    name,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    // ============================================
    // Leaderboard inputs
    // ============================================

    /// Insert or update a person's mascot membership
    pub fn upsert_person(&self, person: &Person) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO people (token, mascot) VALUES (?1, ?2)
            ON CONFLICT(token) DO UPDATE SET mascot = excluded.mascot
            "#,
            params![person.token, person.mascot],
        )?;
        Ok(())
    }

    /// Insert or update a mascot group
    pub fn upsert_mascot(&self, mascot: &Mascot) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO mascots (mascot_name, emoji, population) VALUES (?1, ?2, ?3)
            ON CONFLICT(mascot_name) DO UPDATE SET
                emoji = excluded.emoji,
                population = excluded.population
            "#,
            params![mascot.name, mascot.emoji, mascot.population],
        )?;
        Ok(())
    }

    /// Compute the mascot leaderboard: attendance rows joined to mascot
    /// populations, ranked by points descending.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT p.mascot, m.emoji, COUNT(a.token) AS attendees, m.population
            FROM attendances a
            JOIN people p ON p.token = a.token
            JOIN mascots m ON m.mascot_name = p.mascot
            GROUP BY p.mascot, m.emoji, m.population
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                let mascot_name: String = row.get(0)?;
                let emoji: String = row.get(1)?;
                let attendees: i64 = row.get(2)?;
                let population: i64 = row.get(3)?;
                Ok(LeaderboardRow::new(mascot_name, emoji, attendees, population))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(leaderboard::rank(rows))
    }
}
