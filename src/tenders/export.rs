// Strict tender export for the browser tender explorer.
//
// The enrichment classifier is a loose substring test. For the list a
// person actually reads we want fewer false positives, so this module uses
// word-boundary patterns, rejects text that hits a known false-positive
// word ("maaibeheer", "chair", ...), and assigns each tender a single
// category in priority order.
//
// regex-lite only knows ASCII: `\b`, `\w` and `(?i)` treat accented
// letters as non-word characters. A pattern anchored with `\b` can
// therefore fire right after an "é" inside a word, and `\w+` stops at the
// first "ë". Tender text is mostly plain Dutch, so this is accepted.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::record::{columns, TenderRow};
use crate::output::truncate_chars;

const AI_PATTERNS: [&str; 28] = [
    r"\bartificial intelligence\b",
    r"\bkunstmatige intelligentie\b",
    r"\bmachine learning\b",
    r"\bdeep learning\b",
    r"\bneural network\b",
    r"\bneurale netwerk\b",
    r"\bchatbot\b",
    r"\bllm\b",
    r"\blarge language model\b",
    r"\bgeneratieve ai\b",
    r"\bgenerativ\w* ai\b",
    r"\bai(?:-|\s)systeem\b",
    r"\bai(?:-|\s)oplossing\b",
    r"\bai(?:-|\s)toepassing\b",
    r"\bai(?:-|\s)model\b",
    r"\bpredictive analytics\b",
    r"\bvoorspellende analyse\b",
    r"\bautomatische besluitvorming\b",
    r"\balgoritm\w+\b",
    r"\bdata science\b",
    r"\bcomputer vision\b",
    r"\bbeeld\s?herkenning\b",
    r"\bspraakherkenning\b",
    r"\bnatural language\b",
    r"\bnlp\b",
    r"\brobotics?\b",
    r"\brobotic process automation\b",
    r"\brpa\b",
];

const GOVERNANCE_PATTERNS: [&str; 19] = [
    r"\bgovernance\b",
    r"\bcompliance\b",
    r"\bgdpr\b",
    r"\bavg\b",
    r"\bprivacy\b",
    r"\binformatiebeveiliging\b",
    r"\binformation security\b",
    r"\bcyber\s?security\b",
    r"\baudit\b",
    r"\brisk management\b",
    r"\brisicobeheer\b",
    r"\bdata protection\b",
    r"\bgegevensbescherming\b",
    r"\beu ai act\b",
    r"\bai act\b",
    r"\biama\b",
    r"\bbia\b",
    r"\bdpia\b",
    r"\bdata protection impact\b",
];

const ICT_PATTERNS: [&str; 15] = [
    r"\bsoftware ontwikkeling\b",
    r"\bsoftware development\b",
    r"\bsaas\b",
    r"\bcloud computing\b",
    r"\bcloud platform\b",
    r"\bdigitalisering\b",
    r"\bdigitale transformatie\b",
    r"\bict infrastructuur\b",
    r"\bict dienstverlening\b",
    r"\bdata platform\b",
    r"\bdata warehouse\b",
    r"\bbusiness intelligence\b",
    r"\banalytics platform\b",
    r"\berp systeem\b",
    r"\bcrm systeem\b",
];

/// Any of these anywhere in the text disqualifies the tender.
const EXCLUDE_PATTERNS: [&str; 13] = [
    r"\bmaai",
    r"\bordermail\b",
    r"\bmail\b",
    r"\bdetail\b",
    r"\baircondition",
    r"\bairco\b",
    r"\brepair\b",
    r"\bchair\b",
    r"\bstair\b",
    r"\bfair\b",
    r"\bpair\b",
    r"\bhair\b",
    r"\bdair\b",
];

/// Exported descriptions are cut to this many characters.
pub const DESCRIPTION_LIMIT: usize = 300;

/// Single category assigned by the strict classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TenderCategory {
    #[serde(rename = "AI")]
    Ai,
    Governance,
    #[serde(rename = "ICT")]
    Ict,
}

/// Compiled word-boundary patterns per category.
pub struct StrictClassifier {
    ai: Vec<Regex>,
    governance: Vec<Regex>,
    ict: Vec<Regex>,
    exclude: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).with_context(|| format!("Bad pattern {p}")))
        .collect()
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

impl StrictClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ai: compile(&AI_PATTERNS)?,
            governance: compile(&GOVERNANCE_PATTERNS)?,
            ict: compile(&ICT_PATTERNS)?,
            exclude: compile(&EXCLUDE_PATTERNS)?,
        })
    }

    /// Category for `text`, AI before Governance before ICT.
    pub fn categorize(&self, text: &str) -> Option<TenderCategory> {
        let text = text.to_lowercase();
        if any_match(&self.exclude, &text) {
            return None;
        }
        if any_match(&self.ai, &text) {
            Some(TenderCategory::Ai)
        } else if any_match(&self.governance, &text) {
            Some(TenderCategory::Governance)
        } else if any_match(&self.ict, &text) {
            Some(TenderCategory::Ict)
        } else {
            None
        }
    }
}

/// Search text for the strict classifier.
pub fn export_search_text(row: &TenderRow) -> String {
    [
        columns::TENDER_NAME,
        columns::SHORT_DESCRIPTION,
        columns::ASSIGNMENT_DESCRIPTION,
    ]
    .iter()
    .map(|column| row.text(column).unwrap_or_default())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Parse a publication date in the formats the tender export uses.
pub fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// One tender as shown in the browser list. Field names follow the source
/// columns so the explorer can keep using them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedTender {
    #[serde(rename = "ID publicatie")]
    pub publication_id: Option<Value>,
    #[serde(rename = "Publicatiedatum")]
    pub publication_date: Option<String>,
    #[serde(rename = "Naam Aanbestedende dienst")]
    pub authority: Option<String>,
    #[serde(rename = "Naam aanbesteding")]
    pub tender_name: Option<String>,
    #[serde(rename = "Korte beschrijving opdracht")]
    pub short_description: String,
    #[serde(rename = "Geraamde waarde in EUR")]
    pub estimated_value: Option<Value>,
    #[serde(rename = "URL TenderNed")]
    pub url: Option<String>,
    pub category: TenderCategory,
    pub year: Option<i32>,
}

impl ExportedTender {
    fn from_row(row: &TenderRow, category: TenderCategory) -> Self {
        let date = row
            .text(columns::PUBLICATION_DATE)
            .and_then(|raw| parse_publication_date(&raw));
        let description = row.text(columns::SHORT_DESCRIPTION).unwrap_or_default();

        Self {
            publication_id: row.value(columns::PUBLICATION_ID).cloned(),
            publication_date: date.map(|d| d.format("%Y-%m-%d").to_string()),
            authority: row.text(columns::AUTHORITY_NAME),
            tender_name: row.text(columns::TENDER_NAME),
            short_description: truncate_chars(&description, DESCRIPTION_LIMIT),
            estimated_value: row.value(columns::ESTIMATED_VALUE).cloned(),
            url: row.text(columns::TENDERNED_URL),
            category,
            year: date.map(|d| d.year()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportStats {
    pub total: usize,
    pub ai: usize,
    pub governance: usize,
    pub ict: usize,
    pub years: Vec<i32>,
    pub organizations: usize,
}

impl ExportStats {
    fn from_tenders(tenders: &[ExportedTender]) -> Self {
        let count = |category: TenderCategory| tenders.iter().filter(|t| t.category == category).count();
        let years: BTreeSet<i32> = tenders.iter().filter_map(|t| t.year).collect();
        let organizations: BTreeSet<&str> = tenders
            .iter()
            .filter_map(|t| t.authority.as_deref())
            .collect();

        Self {
            total: tenders.len(),
            ai: count(TenderCategory::Ai),
            governance: count(TenderCategory::Governance),
            ict: count(TenderCategory::Ict),
            years: years.into_iter().collect(),
            organizations: organizations.len(),
        }
    }
}

/// The `tenders.json` document.
#[derive(Debug, Clone, Serialize)]
pub struct TenderExport {
    pub generated_date: String,
    pub stats: ExportStats,
    pub tenders: Vec<ExportedTender>,
}

/// Classify every row and keep the relevant ones.
pub fn build_export(
    rows: &[TenderRow],
    classifier: &StrictClassifier,
    generated: NaiveDate,
) -> TenderExport {
    let tenders: Vec<ExportedTender> = rows
        .iter()
        .filter_map(|row| {
            let category = classifier.categorize(&export_search_text(row))?;
            Some(ExportedTender::from_row(row, category))
        })
        .collect();

    let stats = ExportStats::from_tenders(&tenders);
    info!(
        rows = rows.len(),
        relevant = stats.total,
        ai = stats.ai,
        governance = stats.governance,
        ict = stats.ict,
        "Built strict tender export"
    );

    TenderExport {
        generated_date: generated.format("%Y-%m-%d").to_string(),
        stats,
        tenders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> StrictClassifier {
        StrictClassifier::new().unwrap()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert!(StrictClassifier::new().is_ok());
    }

    #[test]
    fn test_word_boundaries_block_substring_hits() {
        let c = classifier();
        assert_eq!(c.categorize("Onderhoud van de aanplant"), None);
        assert_eq!(c.categorize("Inkoop van een chatbot"), Some(TenderCategory::Ai));
    }

    #[test]
    fn test_priority_is_ai_then_governance_then_ict() {
        let c = classifier();
        assert_eq!(
            c.categorize("SaaS oplossing met DPIA en machine learning"),
            Some(TenderCategory::Ai)
        );
        assert_eq!(
            c.categorize("SaaS oplossing met DPIA"),
            Some(TenderCategory::Governance)
        );
        assert_eq!(c.categorize("SaaS oplossing"), Some(TenderCategory::Ict));
    }

    #[test]
    fn test_exclusion_rejects_whole_text() {
        let c = classifier();
        assert_eq!(c.categorize("Maaibeheer met algoritmes voor routeplanning"), None);
        assert_eq!(c.categorize("Repair of office chair, privacy screen"), None);
    }

    #[test]
    fn test_hyphenated_ai_phrases() {
        let c = classifier();
        assert_eq!(c.categorize("Een AI-toepassing voor vergunningen"), Some(TenderCategory::Ai));
        assert_eq!(c.categorize("Nieuw ai model"), Some(TenderCategory::Ai));
    }

    #[test]
    fn test_publication_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_publication_date("2024-03-15"), expected);
        assert_eq!(parse_publication_date("15-03-2024"), expected);
        assert_eq!(parse_publication_date("2024-03-15T09:30:00"), expected);
        assert_eq!(parse_publication_date("2024-03-15T09:30:00.000Z"), expected);
        assert_eq!(parse_publication_date("maart 2024"), None);
    }

    #[test]
    fn test_word_boundaries_are_ascii_only() {
        let c = classifier();
        // "é" is not a word character, so "\bmaai" matches mid-word
        assert_eq!(c.categorize("Chatbot voor het cafémaaibeleid"), None);
        // "\balgoritm\w+\b" stops at "ë" and still finds a boundary there
        assert_eq!(c.categorize("Algoritmeën register"), Some(TenderCategory::Ai));
        // without the accent there is no boundary before "maai"
        assert_eq!(c.categorize("Chatbot voor het cafemaaibeleid"), Some(TenderCategory::Ai));
    }
}
