// Algorithm-registry import: turns the published-algorithms CSV into the
// leads document that enrichment reads.
//
// Rows are grouped per organization in first-seen order. Each organization
// gets algorithm counts, publication dates, category tallies and contact
// details. It is then scored, typed by name and given a priority tier.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use regex_lite::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::models::{Lead, LeadDataset, LeadPriority, RegistryAttributes, MAX_LEAD_SCORE};
use crate::tenders::export::parse_publication_date;

/// Substrings in an algorithm's name or summary that mark it high-risk.
/// Plain substring test, so "ai" also hits inside longer words.
const HIGH_RISK_TERMS: [&str; 5] = ["ai", "machine learning", "deep learning", "neural", "algoritm"];

const RIJK_TERMS: [&str; 7] = ["ministerie", "rijks", "belasting", "uwv", "svb", "duo", "cjib"];
const ZBO_TERMS: [&str; 4] = ["autoriteit", "college", "raad", "bureau"];

/// Algorithms previewed per lead.
const RECENT_ALGORITHMS: usize = 3;

const EMAIL_PATTERN: &str = r"[\w.+-]+@[\w-]+\.[\w.-]+";

/// One published algorithm as exported by the registry. Only the columns
/// the import reads are listed; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryRow {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description_short: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub publication_category: Option<String>,
    /// Impact assessments on file (IAMA and similar)
    #[serde(default)]
    pub impacttoetsen: Option<String>,
    #[serde(default)]
    pub publication_dt: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Trimmed cell text. Blank cells and pandas-style "nan" are absent.
fn filled(cell: &Option<String>) -> Option<&str> {
    cell.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "nan")
}

impl RegistryRow {
    pub fn is_impactful(&self) -> bool {
        filled(&self.publication_category)
            .is_some_and(|c| c.to_lowercase().contains("impactvolle"))
    }

    pub fn is_high_risk(&self) -> bool {
        [&self.name, &self.description_short]
            .into_iter()
            .filter_map(filled)
            .any(|text| {
                let text = text.to_lowercase();
                HIGH_RISK_TERMS.iter().any(|term| text.contains(term))
            })
    }

    pub fn has_iama(&self) -> bool {
        filled(&self.impacttoetsen).is_some()
    }

    pub fn publication_date(&self) -> Option<NaiveDate> {
        filled(&self.publication_dt).and_then(parse_publication_date)
    }
}

/// Short reference to one algorithm, for the lead preview.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmRef {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub category: String,
}

/// Everything the registry says about one organization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationSummary {
    pub name: String,
    pub algorithm_count: u32,
    pub impactful_count: u32,
    pub high_risk_count: u32,
    pub has_iama: bool,
    pub latest_date: Option<NaiveDate>,
    pub first_date: Option<NaiveDate>,
    pub categories: IndexMap<String, u32>,
    pub contact_emails: BTreeSet<String>,
    pub websites: BTreeSet<String>,
    pub algorithms: Vec<AlgorithmRef>,
}

impl OrganizationSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Most recently published algorithms first. Undated ones go last and
    /// keep their registry order.
    pub fn recent_algorithms(&self, limit: usize) -> Vec<&AlgorithmRef> {
        let mut sorted: Vec<&AlgorithmRef> = self.algorithms.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }
}

/// Group registry rows per organization, in first-seen order.
///
/// Rows without an organization are skipped.
pub fn summarize(rows: &[RegistryRow]) -> Result<IndexMap<String, OrganizationSummary>> {
    let email = Regex::new(EMAIL_PATTERN).context("Bad email pattern")?;
    let mut orgs: IndexMap<String, OrganizationSummary> = IndexMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(org) = filled(&row.organization) else {
            skipped += 1;
            continue;
        };
        let summary = orgs
            .entry(org.to_string())
            .or_insert_with(|| OrganizationSummary::new(org));

        summary.algorithm_count += 1;
        if row.is_impactful() {
            summary.impactful_count += 1;
        }
        if row.is_high_risk() {
            summary.high_risk_count += 1;
        }
        if row.has_iama() {
            summary.has_iama = true;
        }

        let date = row.publication_date();
        if let Some(date) = date {
            summary.latest_date = Some(summary.latest_date.map_or(date, |d| d.max(date)));
            summary.first_date = Some(summary.first_date.map_or(date, |d| d.min(date)));
        }

        let category = filled(&row.category);
        if let Some(category) = category {
            *summary.categories.entry(category.to_string()).or_insert(0) += 1;
        }

        if let Some(raw) = filled(&row.contact_email).filter(|raw| raw.contains('@')) {
            if let Some(found) = email.find(raw) {
                summary.contact_emails.insert(found.as_str().to_lowercase());
            }
        }
        if let Some(site) = filled(&row.website).filter(|site| site.starts_with("http")) {
            summary.websites.insert(site.to_string());
        }

        summary.algorithms.push(AlgorithmRef {
            name: filled(&row.name).unwrap_or_default().to_string(),
            date,
            category: category.unwrap_or_default().to_string(),
        });
    }

    if skipped > 0 {
        debug!(skipped, "Registry rows without an organization");
    }
    Ok(orgs)
}

/// Registry lead score, 0-100.
///
/// Algorithm volume, impactful and high-risk algorithms each add points up
/// to their own cap. A missing impact assessment next to impactful
/// algorithms adds 10. Publishing in 2025 or later adds 10, in 2024 adds 5.
pub fn registry_lead_score(org: &OrganizationSummary) -> u32 {
    let mut score = org.algorithm_count.saturating_mul(3).min(30);
    score += org.impactful_count.saturating_mul(6).min(30);
    score += org.high_risk_count.saturating_mul(4).min(20);

    if !org.has_iama && org.impactful_count > 0 {
        score += 10;
    }

    score += match org.latest_date.map(|d| d.year()) {
        Some(year) if year >= 2025 => 10,
        Some(2024) => 5,
        _ => 0,
    };

    score.min(MAX_LEAD_SCORE)
}

/// Organization type from keywords in its name. First hit wins.
pub fn infer_org_type(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.contains("gemeente") {
        "Gemeente"
    } else if RIJK_TERMS.iter().any(|t| name.contains(t)) {
        "Rijk"
    } else if name.contains("provincie") {
        "Provincie"
    } else if ZBO_TERMS.iter().any(|t| name.contains(t)) {
        "ZBO"
    } else {
        "Overig"
    }
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Turn an organization summary into a lead.
pub fn to_lead(org: &OrganizationSummary) -> Lead {
    let score = registry_lead_score(org);

    let recent: Vec<Value> = org
        .recent_algorithms(RECENT_ALGORITHMS)
        .into_iter()
        .map(|a| {
            json!({
                "name": a.name,
                "date": format_date(a.date),
                "category": a.category,
            })
        })
        .collect();

    let mut extra = Map::new();
    extra.insert("contact_emails".to_string(), json!(org.contact_emails));
    extra.insert("websites".to_string(), json!(org.websites));
    extra.insert("recent_algorithms".to_string(), Value::Array(recent));

    Lead {
        name: org.name.clone(),
        lead_score: score,
        registry: RegistryAttributes {
            org_type: Some(infer_org_type(&org.name).to_string()),
            algorithm_count: Some(org.algorithm_count),
            impactful_count: Some(org.impactful_count),
            high_risk_count: Some(org.high_risk_count),
            has_iama: Some(org.has_iama),
            latest_date: format_date(org.latest_date),
            first_date: format_date(org.first_date),
            priority: Some(LeadPriority::from_score(score).as_str().to_string()),
            categories: Some(org.categories.clone()),
            extra,
        },
    }
}

/// Build the leads document from registry rows, highest score first.
pub fn build_dataset(
    rows: &[RegistryRow],
    source_file: Option<String>,
    generated: NaiveDateTime,
) -> Result<LeadDataset> {
    let orgs = summarize(rows)?;
    let mut leads: Vec<Lead> = orgs.values().map(to_lead).collect();
    // Stable: equal scores keep registry order
    leads.sort_by(|a, b| b.lead_score.cmp(&a.lead_score));

    info!(
        algorithms = rows.len(),
        organizations = leads.len(),
        "Built leads from the algorithm registry"
    );

    Ok(LeadDataset {
        generated_date: Some(generated.format("%Y-%m-%d %H:%M").to_string()),
        source_file,
        total_leads: leads.len(),
        total_algorithms: rows.len() as u64,
        leads,
    })
}

/// Parse registry rows from CSV with a header line.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RegistryRow>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<RegistryRow>, csv::Error>>()
        .context("Malformed registry CSV")
}

/// Load the registry CSV export at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<RegistryRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open registry export {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("Invalid registry export {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "Loaded registry rows");
    Ok(rows)
}
