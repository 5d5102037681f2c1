//! Integration tests for the rollcall storage and report pipeline
//!
//! These tests run against an in-memory database to verify the end-to-end
//! flow: ingest -> storage -> fact materialization -> report engine.

use chrono::NaiveDate;
use rollcall_core::db::Database;
use rollcall_core::types::{AttendanceFact, EventFact, Mascot, Person};
use rollcall_core::{ingest, render, report};
use std::io::Cursor;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn seeded_db() -> Database {
    let db = Database::open_in_memory().expect("open in-memory db");
    db.migrate().expect("migrate schema");

    let facts = [
        ("ana", d(2024, 9, 5)),
        ("ana", d(2024, 9, 12)),
        ("ben", d(2024, 9, 12)),
        ("ben", d(2024, 9, 19)),
        ("cal", d(2024, 9, 19)),
        ("dia", d(2024, 9, 19)),
    ];
    for (token, date) in facts {
        assert!(db
            .insert_attendance(&AttendanceFact::new(token, date))
            .expect("insert attendance"));
    }

    db.insert_event(&EventFact::new(d(2024, 9, 12), "Trivia Night"))
        .expect("insert event");
    db.insert_event(&EventFact::new(d(2024, 9, 19), "Board Games"))
        .expect("insert event");

    db
}

// ============================================
// Storage round trips
// ============================================

#[test]
fn test_facts_materialize_in_date_order() {
    let db = seeded_db();
    let facts = db.attendance_facts().expect("fetch facts");

    assert_eq!(facts.len(), 6);
    assert!(facts.windows(2).all(|w| w[0].date <= w[1].date));

    let events = db.event_facts().expect("fetch events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "Trivia Night");
}

#[test]
fn test_open_creates_parent_directories_and_persists() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("data.db");

    {
        let db = Database::open(&path).expect("open db");
        db.migrate().expect("migrate schema");
        db.insert_attendance(&AttendanceFact::new("ana", d(2024, 9, 5)))
            .expect("insert attendance");
    }

    let db = Database::open(&path).expect("reopen db");
    db.migrate().expect("migrate again");
    assert_eq!(db.attendance_facts().expect("fetch").len(), 1);
}

#[test]
fn test_duplicate_attendance_is_ignored() {
    let db = seeded_db();
    let dup = AttendanceFact::new("ana", d(2024, 9, 5));
    assert!(!db.insert_attendance(&dup).expect("insert duplicate"));
    assert_eq!(db.attendance_facts().expect("fetch").len(), 6);
}

// ============================================
// End-to-end report
// ============================================

#[test]
fn test_report_from_stored_facts() {
    let db = seeded_db();
    let facts = db.attendance_facts().expect("fetch facts");
    let events = db.event_facts().expect("fetch events");

    let dashboard = report::generate(&facts, &events, None, d(2024, 10, 1));

    assert_eq!(dashboard.series.len(), 3);
    for row in &dashboard.series {
        assert_eq!(row.first_time + row.repeat, row.total);
    }

    // 2024-09-19: cal and dia are new, ben returns.
    let last = &dashboard.series[2];
    assert_eq!(last.event_name.as_deref(), Some("Board Games"));
    assert_eq!((last.total, last.first_time, last.repeat), (3, 2, 1));
    assert_eq!(last.cumulative, 6);

    assert_eq!(dashboard.summary.peak_day, Some(d(2024, 9, 19)));
    assert_eq!(dashboard.summary.total_attendances, 6);
    assert_eq!(dashboard.summary.avg_per_event_day, 2.0);
    assert_eq!(dashboard.summary.unique_people_all_time, 4);

    // Distribution partitions the token set: ana and ben on 2 days,
    // cal and dia on 1.
    let people: u64 = dashboard.distribution.iter().map(|b| b.people).sum();
    assert_eq!(people, 4);
    assert_eq!(dashboard.distribution[0].events, 1);
    assert_eq!(dashboard.distribution[0].people, 2);
    assert_eq!(dashboard.distribution[1].events, 2);
    assert_eq!(dashboard.distribution[1].people, 2);
}

#[test]
fn test_windowed_report_keeps_lifetime_classification() {
    let db = seeded_db();
    let facts = db.attendance_facts().expect("fetch facts");
    let events = db.event_facts().expect("fetch events");

    // 10-day window from Sep 23 cuts off at Sep 13 inclusive, keeping only
    // Sep 19 -- but ben still counts as a repeat there because the
    // first-occurrence index covers the full history.
    let dashboard = report::generate(&facts, &events, Some(10), d(2024, 9, 23));

    assert_eq!(dashboard.window_days, Some(10));
    assert_eq!(dashboard.series.len(), 1);
    let row = &dashboard.series[0];
    assert_eq!(row.day, d(2024, 9, 19));
    assert_eq!((row.total, row.first_time, row.repeat), (3, 2, 1));
    assert_eq!(dashboard.summary.unique_people_in_window, 3);
    assert_eq!(dashboard.summary.unique_people_all_time, 4);

    // One day wider: the inclusive cutoff lands exactly on Sep 12 and that
    // row re-enters the series.
    let dashboard = report::generate(&facts, &events, Some(11), d(2024, 9, 23));
    assert_eq!(dashboard.series.len(), 2);
    assert_eq!(dashboard.series[0].day, d(2024, 9, 12));
    assert_eq!(dashboard.summary.unique_people_in_window, 4);
}

#[test]
fn test_ingest_to_report_pipeline() {
    let db = Database::open_in_memory().expect("open in-memory db");
    db.migrate().expect("migrate schema");

    let attendance = "token,date\nana,2024-01-01\nana,2024-01-08\nben,2024-01-08\n";
    let events = "date,event_name\n2024-01-08,Game Night\n";

    for fact in ingest::parse_attendance_csv(Cursor::new(attendance)).expect("parse attendance") {
        db.insert_attendance(&fact).expect("insert");
    }
    for event in ingest::parse_events_csv(Cursor::new(events)).expect("parse events") {
        db.insert_event(&event).expect("insert");
    }

    let facts = db.attendance_facts().expect("fetch facts");
    let dashboard = report::generate(
        &facts,
        &db.event_facts().expect("fetch events"),
        None,
        d(2024, 2, 1),
    );

    assert_eq!(dashboard.summary.unique_people_all_time, 2);
    assert_eq!(dashboard.series[1].event_name.as_deref(), Some("Game Night"));

    let csv = render::to_csv(&dashboard);
    assert!(csv.starts_with(render::CSV_HEADER));
    assert!(csv.contains("2024-01-08,Game Night,1,1,2,1.5,3"));
}

// ============================================
// Leaderboard
// ============================================

#[test]
fn test_leaderboard_ranking() {
    let db = seeded_db();

    for (token, mascot) in [("ana", "Owls"), ("ben", "Owls"), ("cal", "Foxes")] {
        db.upsert_person(&Person {
            token: token.into(),
            mascot: mascot.into(),
        })
        .expect("upsert person");
    }
    // dia has no mascot membership and drops out of the join.
    db.upsert_mascot(&Mascot {
        name: "Owls".into(),
        emoji: "\u{1F989}".into(),
        population: 40,
    })
    .expect("upsert mascot");
    db.upsert_mascot(&Mascot {
        name: "Foxes".into(),
        emoji: "\u{1F98A}".into(),
        population: 10,
    })
    .expect("upsert mascot");

    let rows = db.leaderboard().expect("leaderboard");
    assert_eq!(rows.len(), 2);

    // Owls: 4 attendance rows / 40 -> 100 points.
    // Foxes: 1 attendance row / 10 -> 100 points. Tie breaks on name.
    assert_eq!(rows[0].mascot_name, "Foxes");
    assert_eq!(rows[0].attendees, 1);
    assert_eq!(rows[0].points, 100.0);
    assert_eq!(rows[1].mascot_name, "Owls");
    assert_eq!(rows[1].attendees, 4);
    assert_eq!(rows[1].points, 100.0);
}
