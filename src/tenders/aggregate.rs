// Per-organization tender aggregation.
//
// Groups tender records by normalized organization name and counts how many
// fall into each keyword category. The result is an insertion-ordered map:
// the matcher walks it in order and keeps the first of equal-scoring
// profiles, so iteration order is part of the observable behavior.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use super::keywords::{classify, KeywordSets};
use super::record::TenderRecord;

/// Tenders published in this year or later count as recent activity.
pub const RECENT_YEAR_THRESHOLD: i32 = 2023;

/// Aggregated tender activity for one organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationProfile {
    /// Organization name as first seen, original casing
    pub original: String,
    pub total: u32,
    pub ai: u32,
    pub governance: u32,
    pub ict: u32,
    /// Distinct tender years at or after `RECENT_YEAR_THRESHOLD`
    pub recent_years: BTreeSet<String>,
}

impl OrganizationProfile {
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            ..Default::default()
        }
    }
}

/// Profiles keyed by normalized organization name, in first-seen order.
pub type ProfileIndex = IndexMap<String, OrganizationProfile>;

/// Join key for organization names: lower-cased and trimmed.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

/// Build one profile per organization from the full tender set.
///
/// Records without an organization name contribute nothing.
pub fn aggregate(records: &[TenderRecord], keywords: &KeywordSets) -> ProfileIndex {
    let keywords = keywords.lowercased();
    let mut profiles = ProfileIndex::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(name) = record.organization() else {
            skipped += 1;
            continue;
        };

        let profile = profiles
            .entry(normalize_name(name))
            .or_insert_with(|| OrganizationProfile::new(name));

        profile.total += 1;

        let categories = classify(record, &keywords);
        if categories.ai {
            profile.ai += 1;
        }
        if categories.governance {
            profile.governance += 1;
        }
        if categories.ict {
            profile.ict += 1;
        }

        if let Some(year) = record.recent_year(RECENT_YEAR_THRESHOLD) {
            profile.recent_years.insert(year);
        }
    }

    if skipped > 0 {
        debug!(skipped, "Tender records without an organization name");
    }
    info!(
        records = records.len(),
        organizations = profiles.len(),
        "Aggregated tenders per organization"
    );

    profiles
}
