//! rollcall-leaderboard - mascot rankings by attendance rate
//!
//! Points = 1000 * attendees / population. A simple join and sort over the
//! stored tables; none of the report engine is involved.

use anyhow::{Context, Result};
use clap::Parser;
use rollcall_core::{Config, Database};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rollcall-leaderboard")]
#[command(about = "Mascot leaderboard - attendance rate per population")]
#[command(version)]
struct Args {
    /// Print JSON instead of the terminal table
    #[arg(long)]
    json: bool,

    /// Database path override (default: XDG data dir)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = rollcall_core::logging::init(&config.logging).ok();

    let db_path = args.db.unwrap_or_else(Config::database_path);
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;

    let rows = db.leaderboard().context("failed to compute leaderboard")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No leaderboard data yet.");
        return Ok(());
    }

    println!();
    println!("MASCOT LEADERBOARD");
    println!(
        "   {:<4} {:<16} {:>8} {:>10} {:>11} {:>9}",
        "Rank", "Mascot", "Points", "Attendees", "Population", "Coverage"
    );
    for (i, row) in rows.iter().enumerate() {
        let name = if row.emoji.is_empty() {
            row.mascot_name.clone()
        } else {
            format!("{} {}", row.emoji, row.mascot_name)
        };
        println!(
            "   #{:<3} {:<16} {:>8.2} {:>10} {:>11} {:>8.1}%",
            i + 1,
            name,
            row.points,
            row.attendees,
            row.population,
            row.coverage_pct(),
        );
    }
    println!();

    Ok(())
}
