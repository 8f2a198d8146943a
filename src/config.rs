use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Every path has a default matching the dashboard's project layout. The
/// .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Algorithm-registry leads document (input)
    pub leads_path: PathBuf,
    /// Tender rows exported from the spreadsheet (input)
    pub tenders_path: PathBuf,
    /// Enriched leads document (output)
    pub output_path: PathBuf,
    /// Strict tender list for the browser (output)
    pub tender_export_path: PathBuf,
    /// Directory for shortlist exports
    pub export_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            leads_path: path_var("LEADHUB_LEADS_PATH", "src/data.json"),
            tenders_path: path_var("LEADHUB_TENDERS_PATH", "public/tenderned_data.json"),
            output_path: path_var("LEADHUB_OUTPUT_PATH", "src/data_enriched.json"),
            tender_export_path: path_var("LEADHUB_TENDER_EXPORT_PATH", "src/tenders.json"),
            export_dir: path_var("LEADHUB_EXPORT_DIR", "exports"),
        })
    }

    /// Check that the leads document exists.
    /// Call this before any operation that reads registry leads.
    pub fn require_leads(&self) -> Result<()> {
        if !self.leads_path.exists() {
            anyhow::bail!(
                "Leads file not found at {}.\n\
                 Set LEADHUB_LEADS_PATH in your .env file (see .env.example).",
                self.leads_path.display()
            );
        }
        Ok(())
    }

    /// Check that the tender export exists.
    /// Call this before any operation that reads tender rows.
    pub fn require_tenders(&self) -> Result<()> {
        if !self.tenders_path.exists() {
            anyhow::bail!(
                "Tender file not found at {}.\n\
                 Export the tender spreadsheet to JSON and set LEADHUB_TENDERS_PATH.",
                self.tenders_path.display()
            );
        }
        Ok(())
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
