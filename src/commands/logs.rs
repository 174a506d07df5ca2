//! `pcec logs` - print server log records.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use colored::{ColoredString, Colorize};

use crate::client::{client_for, LogRecord};

/// How often `--follow` polls the controller for new records.
const FOLLOW_INTERVAL: Duration = Duration::from_secs(2);

/// Prints pending log records; the controller drains its buffer on every
/// fetch, so `--follow` just keeps fetching.
pub fn execute(url: Option<String>, follow: bool) -> Result<()> {
    let client = client_for(url)?;

    let records = client.fetch_logs()?;
    if records.is_empty() && !follow {
        println!("{} No log records", "ℹ".blue());
        return Ok(());
    }
    for record in &records {
        print_record(record);
    }

    while follow {
        std::thread::sleep(FOLLOW_INTERVAL);
        for record in &client.fetch_logs()? {
            print_record(record);
        }
    }
    Ok(())
}

fn print_record(record: &LogRecord) {
    let time = record
        .timestamp()
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    println!(
        "{} {:7} {}",
        time.dimmed(),
        level_colored(&record.level),
        record.message
    );
}

fn level_colored(level: &str) -> ColoredString {
    match level {
        "WARN" | "WARNING" => level.yellow(),
        "ERROR" | "SEVERE" | "FATAL" => level.red(),
        _ => level.green(),
    }
}
