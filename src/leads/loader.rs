// Leads document loader.
//
// Reads the registry leads JSON and rejects documents the enrichment
// pipeline cannot honor. This is the only place a bad leads file fails.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::models::{LeadDataset, MAX_LEAD_SCORE};

/// Load and validate the leads document at `path`.
pub fn load_leads(path: &Path) -> Result<LeadDataset> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read leads file {}", path.display()))?;
    let dataset =
        parse_leads(&json).with_context(|| format!("Invalid leads file {}", path.display()))?;

    info!(
        path = %path.display(),
        leads = dataset.leads.len(),
        algorithms = dataset.total_algorithms,
        "Loaded registry leads"
    );
    Ok(dataset)
}

/// Parse a leads document from a JSON string.
pub fn parse_leads(json: &str) -> Result<LeadDataset> {
    let dataset: LeadDataset = serde_json::from_str(json).context("Malformed leads JSON")?;

    if let Some(lead) = dataset
        .leads
        .iter()
        .find(|lead| lead.lead_score > MAX_LEAD_SCORE)
    {
        anyhow::bail!(
            "Lead {:?} has lead_score {} (must be 0-{MAX_LEAD_SCORE})",
            lead.name,
            lead.lead_score
        );
    }

    Ok(dataset)
}
