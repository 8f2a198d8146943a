// Keyword classifier for tender records.
//
// Each category is an independent substring test against the record's
// lower-cased search text. No tokenization or stemming, so short keywords
// match inside longer words ("ai" in "maaibeheer"). That
// over-matching is a known property of the enrichment signal and the
// strict export in `export.rs` exists for the cases where it matters.

use serde::Serialize;

use super::record::TenderRecord;

const AI_KEYWORDS: [&str; 10] = [
    "ai",
    "artificial intelligence",
    "kunstmatige intelligentie",
    "algoritme",
    "algorithm",
    "machine learning",
    "deep learning",
    "neural",
    "chatbot",
    "llm",
];

const GOVERNANCE_KEYWORDS: [&str; 10] = [
    "governance",
    "compliance",
    "gdpr",
    "avg",
    "privacy",
    "informatiebeveiliging",
    "security",
    "audit",
    "risk",
    "risico",
];

const ICT_KEYWORDS: [&str; 8] = [
    "ict",
    "software",
    "saas",
    "cloud",
    "digitalisering",
    "informatisering",
    "applicatie",
    "systeem",
];

/// Keyword lists per category. `classify` expects lower-case terms; build
/// custom sets with `new` or call `lowercased` once before a run.
#[derive(Debug, Clone)]
pub struct KeywordSets {
    pub ai: Vec<String>,
    pub governance: Vec<String>,
    pub ict: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            ai: owned(&AI_KEYWORDS),
            governance: owned(&GOVERNANCE_KEYWORDS),
            ict: owned(&ICT_KEYWORDS),
        }
    }
}

impl KeywordSets {
    pub fn new(ai: Vec<String>, governance: Vec<String>, ict: Vec<String>) -> Self {
        Self {
            ai: lower(&ai),
            governance: lower(&governance),
            ict: lower(&ict),
        }
    }

    /// Copy with every term lower-cased.
    pub fn lowercased(&self) -> Self {
        Self::new(self.ai.clone(), self.governance.clone(), self.ict.clone())
    }
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn lower(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| t.to_lowercase()).collect()
}

/// Category membership of one tender. Categories are not exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Categories {
    pub ai: bool,
    pub governance: bool,
    pub ict: bool,
}

/// Classify a tender against every category independently.
pub fn classify(record: &TenderRecord, keywords: &KeywordSets) -> Categories {
    let text = record.search_text();
    Categories {
        ai: matches_any(&text, &keywords.ai),
        governance: matches_any(&text, &keywords.governance),
        ict: matches_any(&text, &keywords.ict),
    }
}

/// True when any keyword occurs as a substring of `text`. Both sides are
/// expected lower-case already.
pub fn matches_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| text.contains(kw.as_str()))
}
