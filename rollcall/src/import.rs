//! rollcall-import - load attendance CSV files into the database
//!
//! Validates rows before anything is written: a malformed line fails the
//! whole file with its line number, so the stored log never holds facts
//! the report engine would have to second-guess.

use anyhow::{Context, Result};
use clap::Parser;
use rollcall_core::{ingest, Config, Database};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rollcall-import")]
#[command(about = "Import attendance, event, and mascot CSV files")]
#[command(version)]
struct Args {
    /// Attendance files (token,date)
    #[arg(long)]
    attendance: Vec<PathBuf>,

    /// Event files (date,name)
    #[arg(long)]
    events: Vec<PathBuf>,

    /// People files (token,mascot)
    #[arg(long)]
    people: Vec<PathBuf>,

    /// Mascot files (mascot,emoji,population)
    #[arg(long)]
    mascots: Vec<PathBuf>,

    /// Database path override (default: XDG data dir)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.attendance.is_empty()
        && args.events.is_empty()
        && args.people.is_empty()
        && args.mascots.is_empty()
    {
        anyhow::bail!("nothing to import; pass --attendance, --events, --people, or --mascots");
    }

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = rollcall_core::logging::init(&config.logging).ok();

    let db_path = args.db.unwrap_or_else(Config::database_path);
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;

    for path in &args.attendance {
        let facts = ingest::parse_attendance_csv(open(path)?)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let mut inserted = 0usize;
        for fact in &facts {
            if db.insert_attendance(fact)? {
                inserted += 1;
            }
        }
        tracing::info!(file = %path.display(), rows = facts.len(), inserted, "Imported attendance");
        println!(
            "{}: {} attendance rows ({} new, {} already present)",
            path.display(),
            facts.len(),
            inserted,
            facts.len() - inserted
        );
    }

    for path in &args.events {
        let events = ingest::parse_events_csv(open(path)?)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let mut inserted = 0usize;
        for event in &events {
            if db.insert_event(event)? {
                inserted += 1;
            }
        }
        println!(
            "{}: {} event rows ({} new)",
            path.display(),
            events.len(),
            inserted
        );
    }

    for path in &args.people {
        let people = ingest::parse_people_csv(open(path)?)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        for person in &people {
            db.upsert_person(person)?;
        }
        println!("{}: {} people", path.display(), people.len());
    }

    for path in &args.mascots {
        let mascots = ingest::parse_mascots_csv(open(path)?)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        for mascot in &mascots {
            db.upsert_mascot(mascot)?;
        }
        println!("{}: {} mascots", path.display(), mascots.len());
    }

    Ok(())
}
