//! rollcall-report - attendance dashboard CLI
//!
//! Prints the attendance report (daily first-time/repeat split, rolling
//! event-day average, per-person distribution) for the stored log, or
//! exports it as JSON/CSV.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rollcall_core::report::{self, DashboardReport};
use rollcall_core::{render, Config, Database};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rollcall-report")]
#[command(about = "Attendance dashboard - first-time vs repeat over time")]
#[command(version)]
struct Args {
    /// Trailing window in days (0 = all time; clamped to 3650)
    #[arg(long)]
    days: Option<i64>,

    /// Export format (json, csv); omit for the terminal view
    #[arg(long)]
    export: Option<String>,

    /// Database path override (default: XDG data dir)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Evaluate the window against this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = rollcall_core::logging::init(&config.logging).ok();

    let db_path = args.db.unwrap_or_else(Config::database_path);
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;

    let facts = db.attendance_facts().context("failed to load attendance facts")?;
    let events = db.event_facts().context("failed to load event facts")?;

    let days = args.days.or_else(|| {
        (config.report.default_window_days > 0)
            .then_some(config.report.default_window_days as i64)
    });
    let today = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let dashboard = report::generate(&facts, &events, days, today);

    match args.export.as_deref() {
        Some("json") => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        Some("csv") => print!("{}", render::to_csv(&dashboard)),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'json' or 'csv'", other),
        None => print_terminal(&dashboard),
    }

    Ok(())
}

fn print_terminal(dashboard: &DashboardReport) {
    let window = match dashboard.window_days {
        Some(days) => format!("last {} days", days),
        None => "all time".to_string(),
    };

    println!();
    println!("ATTENDANCE DASHBOARD ({})", window);
    println!("{}", "-".repeat(60));

    let summary = &dashboard.summary;
    if dashboard.series.is_empty() {
        println!("  No attendance data yet.");
        println!();
        return;
    }

    println!(
        "   Range: {} -> {}",
        summary.from.map(|d| d.to_string()).unwrap_or_default(),
        summary.to.map(|d| d.to_string()).unwrap_or_default(),
    );
    println!(
        "   Event days: {:<8} Total attendances: {}",
        summary.event_days, summary.total_attendances
    );
    println!(
        "   Avg/event day: {:<6} Unique people: {} in window / {} all time",
        summary.avg_per_event_day,
        summary.unique_people_in_window,
        summary.unique_people_all_time
    );
    if let Some(peak) = summary.peak_day {
        println!(
            "   Peak day: {} ({} total: {} first-time, {} repeat)",
            peak, summary.peak_total, summary.peak_first_time, summary.peak_repeat
        );
    }
    println!();

    // Most recent days first, like the dashboard table.
    println!(
        "   {:<12} {:<24} {:>7} {:>7} {:>6} {:>6} {:>6}",
        "Date", "Event", "Repeat", "First", "Total", "Avg7", "Cum"
    );
    for row in dashboard.series.iter().rev().take(14) {
        let avg7 = row.avg7.map(|v| v.to_string()).unwrap_or_default();
        println!(
            "   {:<12} {:<24} {:>7} {:>7} {:>6} {:>6} {:>6}",
            row.day.to_string(),
            row.event_name.as_deref().unwrap_or(""),
            row.repeat,
            row.first_time,
            row.total,
            avg7,
            row.cumulative,
        );
    }
    println!();

    if !dashboard.distribution.is_empty() {
        println!("   Events attended per person:");
        for bucket in &dashboard.distribution {
            println!(
                "   {:>4} event{}: {} people",
                bucket.label,
                if bucket.events == 1 { " " } else { "s" },
                bucket.people
            );
        }
        println!();
    }
}
