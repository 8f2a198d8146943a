// Tender file loader.
//
// The tender spreadsheet is exported to a JSON array of column-keyed rows
// before it reaches us. Large exports take a while to parse, so the caller
// gets a spinner.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::record::{TenderRecord, TenderRow};

/// Load every row from the tender export at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<TenderRow>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading tenders from {}...", path.display()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = read_rows(path);
    pb.finish_and_clear();

    let rows = result?;
    info!(path = %path.display(), rows = rows.len(), "Loaded tender rows");
    Ok(rows)
}

fn read_rows(path: &Path) -> Result<Vec<TenderRow>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tender file {}", path.display()))?;
    parse_rows(&json).with_context(|| format!("Invalid tender file {}", path.display()))
}

/// Parse tender rows from a JSON array of objects.
pub fn parse_rows(json: &str) -> Result<Vec<TenderRow>> {
    serde_json::from_str(json).context("Expected a JSON array of tender rows")
}

/// Load the tender export and reduce every row to a `TenderRecord`.
pub fn load_records(path: &Path) -> Result<Vec<TenderRecord>> {
    let rows = load_rows(path)?;
    Ok(rows.iter().map(TenderRecord::from_row).collect())
}
