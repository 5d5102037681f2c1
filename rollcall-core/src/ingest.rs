//! CSV ingest for attendance and event rows.
//!
//! Validation happens here, upstream of the report engine: the engine
//! assumes well-formed facts, so a bad date or empty token fails the whole
//! import with a line-numbered error instead of being tolerated downstream.
//!
//! Formats:
//! - attendance: `token,date` (tokens must not contain commas)
//! - events: `date,name` (the name is the raw remainder of the line, so it
//!   may contain commas)
//!
//! An optional header line matching the expected columns is skipped, as are
//! blank lines.

use crate::error::{Error, Result};
use crate::types::{AttendanceFact, EventFact, Mascot, Person};
use chrono::NaiveDate;
use std::io::BufRead;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn import_error(line: usize, message: impl Into<String>) -> Error {
    Error::Import {
        line,
        message: message.into(),
    }
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| import_error(line, format!("invalid date {value:?}, expected YYYY-MM-DD")))
}

/// Parse `token,date` attendance rows.
pub fn parse_attendance_csv<R: BufRead>(reader: R) -> Result<Vec<AttendanceFact>> {
    let mut facts = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 1 && line.eq_ignore_ascii_case("token,date") {
            continue;
        }

        let mut parts = line.split(',');
        let token = parts.next().unwrap_or_default().trim();
        let date = parts.next().unwrap_or_default().trim();
        if parts.next().is_some() {
            return Err(import_error(line_no, "expected exactly two fields: token,date"));
        }
        if token.is_empty() {
            return Err(import_error(line_no, "empty token"));
        }
        if date.is_empty() {
            return Err(import_error(line_no, "missing date field"));
        }

        facts.push(AttendanceFact::new(token, parse_date(date, line_no)?));
    }

    Ok(facts)
}

/// Parse `date,name` event rows.
pub fn parse_events_csv<R: BufRead>(reader: R) -> Result<Vec<EventFact>> {
    let mut events = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 1 && line.eq_ignore_ascii_case("date,event_name") {
            continue;
        }

        // Split on the first comma only; event names may contain commas.
        let (date, name) = line
            .split_once(',')
            .ok_or_else(|| import_error(line_no, "expected two fields: date,name"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(import_error(line_no, "empty event name"));
        }

        events.push(EventFact::new(parse_date(date.trim(), line_no)?, name));
    }

    Ok(events)
}

/// Parse `token,mascot` membership rows (leaderboard input).
pub fn parse_people_csv<R: BufRead>(reader: R) -> Result<Vec<Person>> {
    let mut people = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 1 && line.eq_ignore_ascii_case("token,mascot") {
            continue;
        }

        let (token, mascot) = line
            .split_once(',')
            .ok_or_else(|| import_error(line_no, "expected two fields: token,mascot"))?;
        let (token, mascot) = (token.trim(), mascot.trim());
        if token.is_empty() || mascot.is_empty() {
            return Err(import_error(line_no, "empty token or mascot"));
        }

        people.push(Person {
            token: token.to_string(),
            mascot: mascot.to_string(),
        });
    }

    Ok(people)
}

/// Parse `mascot,emoji,population` rows (leaderboard input). The emoji
/// field may be empty.
pub fn parse_mascots_csv<R: BufRead>(reader: R) -> Result<Vec<Mascot>> {
    let mut mascots = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 1 && line.eq_ignore_ascii_case("mascot,emoji,population") {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(import_error(
                line_no,
                "expected three fields: mascot,emoji,population",
            ));
        }
        if fields[0].is_empty() {
            return Err(import_error(line_no, "empty mascot name"));
        }
        let population: i64 = fields[2]
            .parse()
            .map_err(|_| import_error(line_no, format!("invalid population {:?}", fields[2])))?;

        mascots.push(Mascot {
            name: fields[0].to_string(),
            emoji: fields[1].to_string(),
            population,
        });
    }

    Ok(mascots)
}
