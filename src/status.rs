// System status display: which input and output documents exist and what
// they contain.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::leads::loader;
use crate::leads::models::EnrichedDataset;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("{}", leads_line(&config.leads_path));

    match file_size(&config.tenders_path) {
        Some(size) => println!("Tenders: {} ({})", config.tenders_path.display(), size),
        None => {
            println!("Tenders: not found at {}", config.tenders_path.display());
            println!("  Export the tender spreadsheet to JSON first");
        }
    }

    match fs::read_to_string(&config.output_path)
        .ok()
        .and_then(|json| serde_json::from_str::<EnrichedDataset>(&json).ok())
    {
        Some(enriched) => println!(
            "Enriched leads: {} (generated {}, {} matched, {} with signals)",
            config.output_path.display(),
            enriched.generated_date,
            enriched.matched_with_tenderned,
            enriched.enriched_with_signals
        ),
        None => {
            println!("Enriched leads: not generated yet");
            println!("  Run `leadhub enrich` to build it");
        }
    }

    match file_size(&config.tender_export_path) {
        Some(size) => println!(
            "Tender export: {} ({})",
            config.tender_export_path.display(),
            size
        ),
        None => println!("Tender export: not generated yet"),
    }

    Ok(())
}

/// One status line for the leads document. A file that exists but does not
/// parse is reported, not treated as a failure.
fn leads_line(path: &Path) -> String {
    let Some(size) = file_size(path) else {
        return format!(
            "Leads: not found at {}\n  Set LEADHUB_LEADS_PATH to the registry leads document",
            path.display()
        );
    };
    match loader::load_leads(path) {
        Ok(dataset) => {
            let mut line = format!(
                "Leads: {} ({}) - {} organizations, {} algorithms",
                path.display(),
                size,
                dataset.leads.len(),
                dataset.total_algorithms
            );
            if let Some(date) = &dataset.generated_date {
                line.push_str(&format!("\n  Registry import generated {date}"));
            }
            line
        }
        Err(e) => format!("Leads: {} ({}) - unreadable: {e:#}", path.display(), size),
    }
}

fn file_size(path: &Path) -> Option<String> {
    fs::metadata(path).ok().map(|m| format_bytes(m.len()))
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
