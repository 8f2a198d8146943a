// Tender rows and the normalized record the enrichment pipeline reads.
//
// A `TenderRow` is one spreadsheet row as exported to JSON: column name to
// cell value. `TenderRecord` pulls out the handful of columns enrichment
// needs, with the organization fallback chain made explicit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source column names in the tender export.
pub mod columns {
    pub const CONTRACTING_AUTHORITY: &str = "Aanbestedende dienst";
    pub const ORGANIZATION_NAME: &str = "Naam organisatie";
    pub const ASSIGNMENT_NAME: &str = "Naam opdracht";
    pub const DESCRIPTION: &str = "Omschrijving";
    pub const SUBJECT: &str = "Onderwerp";
    pub const TITLE: &str = "Titel";
    pub const CPV_DESCRIPTION: &str = "CPV-code omschrijving";
    pub const YEAR: &str = "Jaar";
    pub const PUBLICATION_DATE: &str = "Publicatiedatum";

    pub const PUBLICATION_ID: &str = "ID publicatie";
    pub const AUTHORITY_NAME: &str = "Naam Aanbestedende dienst";
    pub const TENDER_NAME: &str = "Naam aanbesteding";
    pub const SHORT_DESCRIPTION: &str = "Korte beschrijving opdracht";
    pub const ASSIGNMENT_DESCRIPTION: &str = "Omschrijving opdracht";
    pub const ESTIMATED_VALUE: &str = "Geraamde waarde in EUR";
    pub const TENDERNED_URL: &str = "URL TenderNed";
}

/// One raw tender row, keyed by source column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenderRow(pub Map<String, Value>);

impl TenderRow {
    /// Cell as text. Null, missing and empty cells are `None`; numbers are
    /// rendered without a fraction when they are integral.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.0.get(column)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(render_number(n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Cell as its original JSON value, `None` when missing or null.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.0.get(column).filter(|v| !v.is_null())
    }
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// One procurement notice, reduced to the fields enrichment reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenderRecord {
    /// Primary organization column
    pub contracting_authority: Option<String>,
    /// Fallback organization column
    pub organization_name: Option<String>,
    pub assignment_name: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub title: Option<String>,
    pub cpv_description: Option<String>,
    /// Explicit year column
    pub year: Option<String>,
    pub publication_date: Option<String>,
}

impl TenderRecord {
    pub fn from_row(row: &TenderRow) -> Self {
        Self {
            contracting_authority: row.text(columns::CONTRACTING_AUTHORITY),
            organization_name: row.text(columns::ORGANIZATION_NAME),
            assignment_name: row.text(columns::ASSIGNMENT_NAME),
            description: row.text(columns::DESCRIPTION),
            subject: row.text(columns::SUBJECT),
            title: row.text(columns::TITLE),
            cpv_description: row.text(columns::CPV_DESCRIPTION),
            year: row.text(columns::YEAR),
            publication_date: row.text(columns::PUBLICATION_DATE),
        }
    }

    /// Organization name: primary column, then fallback, then nothing.
    /// Blank names count as missing.
    pub fn organization(&self) -> Option<&str> {
        [&self.contracting_authority, &self.organization_name]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|name| !name.trim().is_empty())
    }

    /// The classified text fields joined with single spaces, lower-cased.
    /// The organization name is not part of it.
    pub fn search_text(&self) -> String {
        [
            &self.assignment_name,
            &self.description,
            &self.subject,
            &self.title,
            &self.cpv_description,
        ]
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// Tender year as text: the year column, else the first four
    /// characters of the publication date.
    pub fn year_text(&self) -> Option<String> {
        if let Some(year) = self.year.as_deref().filter(|y| !y.trim().is_empty()) {
            return Some(year.trim().to_string());
        }
        let date = self.publication_date.as_deref()?.trim();
        let prefix: String = date.chars().take(4).collect();
        (!prefix.is_empty()).then_some(prefix)
    }

    /// The tender year when it parses and is at least `threshold`.
    /// Malformed years yield `None`.
    pub fn recent_year(&self, threshold: i32) -> Option<String> {
        let year = self.year_text()?;
        let parsed: i32 = year.parse().ok()?;
        (parsed >= threshold).then_some(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> TenderRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_render_without_fraction() {
        let r = row(json!({"Jaar": 2024, "Waarde": 2024.0, "Ratio": 0.5}));
        assert_eq!(r.text("Jaar").as_deref(), Some("2024"));
        assert_eq!(r.text("Waarde").as_deref(), Some("2024"));
        assert_eq!(r.text("Ratio").as_deref(), Some("0.5"));
        assert_eq!(r.text("Missing"), None);
    }

    #[test]
    fn test_organization_falls_back_past_empty_primary() {
        let r = row(json!({"Aanbestedende dienst": "", "Naam organisatie": "Gemeente Ede"}));
        let record = TenderRecord::from_row(&r);
        assert_eq!(record.organization(), Some("Gemeente Ede"));
    }

    #[test]
    fn test_blank_organization_is_missing() {
        let record = TenderRecord {
            contracting_authority: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(record.organization(), None);
    }

    #[test]
    fn test_search_text_excludes_organization() {
        let record = TenderRecord {
            contracting_authority: Some("Gemeente AI-stad".into()),
            title: Some("Wegonderhoud".into()),
            cpv_description: Some("Bouw".into()),
            ..Default::default()
        };
        assert_eq!(record.search_text(), "   wegonderhoud bouw");
    }

    #[test]
    fn test_year_prefers_explicit_column() {
        let record = TenderRecord {
            year: Some("2023".into()),
            publication_date: Some("2025-02-01".into()),
            ..Default::default()
        };
        assert_eq!(record.recent_year(2023).as_deref(), Some("2023"));
    }

    #[test]
    fn test_year_from_publication_date() {
        let record = TenderRecord {
            publication_date: Some("2025-02-01".into()),
            ..Default::default()
        };
        assert_eq!(record.recent_year(2023).as_deref(), Some("2025"));
    }

    #[test]
    fn test_malformed_or_old_year_is_skipped() {
        let garbled = TenderRecord {
            publication_date: Some("01-02-2025".into()),
            ..Default::default()
        };
        assert_eq!(garbled.recent_year(2023), None);

        let old = TenderRecord {
            year: Some("2019".into()),
            ..Default::default()
        };
        assert_eq!(old.recent_year(2023), None);
        assert_eq!(TenderRecord::default().recent_year(2023), None);
    }
}
