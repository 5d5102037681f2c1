//! Renderers for the report payload.
//!
//! Renderers consume [`DashboardReport`](crate::report::DashboardReport)
//! fields verbatim and carry no business logic. JSON comes straight from
//! the payload's `Serialize` impl; this module covers the CSV table.

use crate::report::DashboardReport;

/// CSV header for the series export.
pub const CSV_HEADER: &str = "date,event_name,repeat,first_time,total,avg7_event_days,cumulative";

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(&['"', ',', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the series as a CSV table, one row per entry in chronological
/// order. A row without an average gets an empty cell, not a zero.
pub fn to_csv(report: &DashboardReport) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for row in &report.series {
        let event_name = row.event_name.as_deref().unwrap_or("");
        let avg7 = row.avg7.map(|v| v.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.day.format("%Y-%m-%d"),
            csv_escape(event_name),
            row.repeat,
            row.first_time,
            row.total,
            avg7,
            row.cumulative,
        ));
    }

    out
}
