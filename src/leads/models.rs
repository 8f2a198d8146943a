// Lead data models: the algorithm-registry input and the enriched output.
//
// Leads carry a handful of typed registry attributes that the scoring and
// shortlist code reads. Every other key in the source document is kept in
// `extra` and written back out untouched, so the dashboard sees the same
// record it fed in plus the tender fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Highest lead score, both for registry input and after blending.
pub const MAX_LEAD_SCORE: u32 = 100;

/// Keys written by a previous enrichment run. They are stripped from the
/// passthrough attributes so a re-run recomputes them instead of emitting
/// them twice.
pub const ENRICHMENT_KEYS: [&str; 6] = [
    "tender_count",
    "tender_ai",
    "tender_governance",
    "tender_ict",
    "buying_signal",
    "lead_score_original",
];

/// The leads document produced from the algorithm registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub total_leads: usize,
    #[serde(default)]
    pub total_algorithms: u64,
    pub leads: Vec<Lead>,
}

/// One organization from the algorithm registry, treated as a sales prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    /// Registry-derived score, 0-100
    pub lead_score: u32,
    #[serde(flatten)]
    pub registry: RegistryAttributes,
}

/// Registry attributes shared by the input lead and the enriched output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryAttributes {
    /// Organization type as labelled by the registry import (Gemeente, ZBO, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impactful_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_risk_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_iama: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<IndexMap<String, u32>>,
    /// Everything else the registry import wrote (contacts, websites, recent algorithms)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistryAttributes {
    /// Copy of these attributes with stale enrichment keys removed.
    pub fn without_enrichment(&self) -> Self {
        let mut attrs = self.clone();
        for key in ENRICHMENT_KEYS {
            attrs.extra.remove(key);
        }
        attrs
    }

    pub fn algorithm_count(&self) -> u32 {
        self.algorithm_count.unwrap_or(0)
    }

    pub fn impactful_count(&self) -> u32 {
        self.impactful_count.unwrap_or(0)
    }

    pub fn high_risk_count(&self) -> u32 {
        self.high_risk_count.unwrap_or(0)
    }

    /// A missing IAMA flag is read as "present", which withholds the
    /// missing-assessment bonus rather than granting it on absent data.
    pub fn has_iama(&self) -> bool {
        self.has_iama.unwrap_or(true)
    }

    /// Lower-cased organization type, empty when unknown.
    pub fn org_type_lower(&self) -> String {
        self.org_type.as_deref().unwrap_or("").to_lowercase()
    }
}

/// A lead after tender enrichment.
///
/// `lead_score_original` is always the input score; `lead_score` never
/// drops below it and never exceeds 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLead {
    pub name: String,
    #[serde(flatten)]
    pub registry: RegistryAttributes,
    pub tender_count: u32,
    pub tender_ai: u32,
    pub tender_governance: u32,
    pub tender_ict: u32,
    /// Inferred purchase intent, 0-15
    pub buying_signal: u32,
    pub lead_score_original: u32,
    pub lead_score: u32,
    /// A tender profile was matched, whether or not it passed the gate
    #[serde(skip)]
    pub matched: bool,
    /// The matched profile passed the materialization gate
    #[serde(skip)]
    pub enriched: bool,
}

/// The document written for the dashboard after enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedDataset {
    pub generated_date: String,
    pub total_leads: usize,
    pub total_algorithms: u64,
    pub matched_with_tenderned: usize,
    pub enriched_with_signals: usize,
    pub leads: Vec<EnrichedLead>,
}

/// Priority tier derived from a lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadPriority {
    Low,
    Medium,
    Warm,
    Hot,
}

impl LeadPriority {
    /// Determine the tier from a lead score (0-100).
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => LeadPriority::Hot,
            s if s >= 50 => LeadPriority::Warm,
            s if s >= 30 => LeadPriority::Medium,
            _ => LeadPriority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadPriority::Low => "Low",
            LeadPriority::Medium => "Medium",
            LeadPriority::Warm => "Warm",
            LeadPriority::Hot => "Hot",
        }
    }
}

impl std::fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let raw = json!({
            "name": "Gemeente Utrecht",
            "lead_score": 60,
            "type": "Gemeente",
            "algorithm_count": 12,
            "contact_emails": ["info@utrecht.nl"],
        });
        let lead: Lead = serde_json::from_value(raw).unwrap();
        assert_eq!(lead.registry.org_type.as_deref(), Some("Gemeente"));
        assert_eq!(lead.registry.algorithm_count(), 12);

        let back = serde_json::to_value(&lead).unwrap();
        assert_eq!(back["contact_emails"], json!(["info@utrecht.nl"]));
        assert_eq!(back["lead_score"], json!(60));
        assert!(back.get("impactful_count").is_none());
    }

    #[test]
    fn test_without_enrichment_drops_stale_tender_keys() {
        let raw = json!({
            "name": "Gemeente Delft",
            "lead_score": 40,
            "tender_count": 3,
            "buying_signal": 8,
            "lead_score_original": 36,
            "websites": ["https://delft.nl"],
        });
        let lead: Lead = serde_json::from_value(raw).unwrap();
        let clean = lead.registry.without_enrichment();
        assert!(!clean.extra.contains_key("tender_count"));
        assert!(!clean.extra.contains_key("buying_signal"));
        assert!(!clean.extra.contains_key("lead_score_original"));
        assert!(clean.extra.contains_key("websites"));
    }

    #[test]
    fn test_missing_iama_reads_as_present() {
        let attrs = RegistryAttributes::default();
        assert!(attrs.has_iama());
        assert_eq!(attrs.algorithm_count(), 0);
        assert_eq!(attrs.org_type_lower(), "");
    }

    #[test]
    fn test_priority_boundaries() {
        assert_eq!(LeadPriority::from_score(70), LeadPriority::Hot);
        assert_eq!(LeadPriority::from_score(69), LeadPriority::Warm);
        assert_eq!(LeadPriority::from_score(50), LeadPriority::Warm);
        assert_eq!(LeadPriority::from_score(30), LeadPriority::Medium);
        assert_eq!(LeadPriority::from_score(29), LeadPriority::Low);
        assert_eq!(LeadPriority::Hot.to_string(), "Hot");
    }
}
