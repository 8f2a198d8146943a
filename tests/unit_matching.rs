// Unit tests for tender aggregation and lead-to-profile matching.
//
// Tests the join between registry lead names and aggregated tender
// profiles: the direct containment test, the prefix-stripped core-name
// fallback, score-based selection and first-seen tie-breaking.

use leadhub::scoring::matcher::{best_match, core_name, MatchPath, MatchWeights};
use leadhub::tenders::aggregate::{aggregate, normalize_name, OrganizationProfile, ProfileIndex};
use leadhub::tenders::keywords::KeywordSets;
use leadhub::tenders::loader::parse_rows;
use leadhub::tenders::record::TenderRecord;

fn profile(original: &str, total: u32, ai: u32, governance: u32, ict: u32) -> OrganizationProfile {
    OrganizationProfile {
        original: original.to_string(),
        total,
        ai,
        governance,
        ict,
        ..Default::default()
    }
}

fn index(profiles: Vec<OrganizationProfile>) -> ProfileIndex {
    profiles
        .into_iter()
        .map(|p| (normalize_name(&p.original), p))
        .collect()
}

fn records(json: &str) -> Vec<TenderRecord> {
    parse_rows(json)
        .unwrap()
        .iter()
        .map(TenderRecord::from_row)
        .collect()
}

// ============================================================
// Aggregation feeding the matcher
// ============================================================

#[test]
fn aggregated_ai_tender_builds_recent_profile() {
    let tenders = records(
        r#"[{
            "Naam organisatie": "Gemeente Utrecht",
            "Omschrijving": "Inzet van AI voor fraude detectie",
            "Jaar": 2024
        }]"#,
    );
    let profiles = aggregate(&tenders, &KeywordSets::default());

    let p = &profiles["gemeente utrecht"];
    assert_eq!(p.original, "Gemeente Utrecht");
    assert_eq!(p.total, 1);
    assert_eq!(p.ai, 1);
    assert_eq!(p.governance, 0);
    assert_eq!(p.ict, 0);
    assert!(p.recent_years.contains("2024"));
    assert_eq!(p.recent_years.len(), 1);
}

#[test]
fn authority_column_wins_over_organization_column() {
    let tenders = records(
        r#"[
            {"Aanbestedende dienst": "Gemeente Zwolle", "Naam organisatie": "Zwolle BV", "Titel": "Cloud migratie"},
            {"Aanbestedende dienst": "  ", "Naam organisatie": "Gemeente Zwolle", "Titel": "Privacy audit"}
        ]"#,
    );
    let profiles = aggregate(&tenders, &KeywordSets::default());

    assert_eq!(profiles.len(), 1);
    let p = &profiles["gemeente zwolle"];
    assert_eq!(p.total, 2);
    assert_eq!(p.ict, 1);
    assert_eq!(p.governance, 1);
}

#[test]
fn old_tenders_count_but_are_not_recent() {
    let tenders = records(
        r#"[
            {"Aanbestedende dienst": "Provincie Utrecht", "Publicatiedatum": "2021-05-01"},
            {"Aanbestedende dienst": "Provincie Utrecht", "Publicatiedatum": "2023-09-12"}
        ]"#,
    );
    let profiles = aggregate(&tenders, &KeywordSets::default());

    let p = &profiles["provincie utrecht"];
    assert_eq!(p.total, 2);
    let years: Vec<&str> = p.recent_years.iter().map(String::as_str).collect();
    assert_eq!(years, vec!["2023"]);
}

// ============================================================
// best_match: the two qualification paths
// ============================================================

#[test]
fn exact_name_matches_directly() {
    let profiles = index(vec![profile("Gemeente Utrecht", 1, 1, 0, 0)]);
    let found = best_match("Gemeente Utrecht", &profiles, &MatchWeights::default()).unwrap();

    assert_eq!(found.key, "gemeente utrecht");
    assert_eq!(found.path, MatchPath::Direct);
    // 1 tender + 1 AI tender * 10
    assert_eq!(found.score, 11);
}

#[test]
fn province_without_prefix_in_tender_data_still_matches() {
    // The lead name contains the key, so the direct test already accepts it
    let profiles = index(vec![profile("Zuid-Holland", 3, 0, 1, 0)]);
    let found = best_match("Provincie Zuid-Holland", &profiles, &MatchWeights::default()).unwrap();

    assert_eq!(found.key, "zuid-holland");
    assert_eq!(found.profile.original, "Zuid-Holland");
    assert_eq!(found.path, MatchPath::Direct);
}

#[test]
fn reordered_name_matches_through_core_name() {
    let profiles = index(vec![profile("Den Haag Gemeente", 2, 0, 0, 1)]);
    let found = best_match("Gemeente Den Haag", &profiles, &MatchWeights::default()).unwrap();

    assert_eq!(found.key, "den haag gemeente");
    assert_eq!(found.path, MatchPath::CoreName);
}

#[test]
fn lead_name_is_normalized_before_matching() {
    let profiles = index(vec![profile("Gemeente Utrecht", 1, 0, 0, 0)]);
    let found = best_match("  GEMEENTE Utrecht ", &profiles, &MatchWeights::default());
    assert!(found.is_some());
}

#[test]
fn unrelated_lead_has_no_match() {
    let profiles = index(vec![
        profile("Gemeente Utrecht", 4, 1, 0, 0),
        profile("Rijkswaterstaat", 9, 0, 2, 3),
    ]);
    assert!(best_match("Gemeente Groningen", &profiles, &MatchWeights::default()).is_none());
}

#[test]
fn empty_lead_name_never_matches() {
    let profiles = index(vec![profile("Gemeente Utrecht", 4, 1, 0, 0)]);
    assert!(best_match("", &profiles, &MatchWeights::default()).is_none());
    assert!(best_match("   ", &profiles, &MatchWeights::default()).is_none());
}

#[test]
fn empty_index_has_no_match() {
    assert!(best_match("Gemeente Utrecht", &ProfileIndex::new(), &MatchWeights::default()).is_none());
}

// ============================================================
// best_match: selection among qualifying profiles
// ============================================================

#[test]
fn highest_weighted_profile_wins() {
    let profiles = index(vec![
        profile("Gemeente Amsterdam", 20, 0, 0, 0),
        profile("Amsterdam", 2, 3, 0, 0),
    ]);
    let found = best_match("Gemeente Amsterdam", &profiles, &MatchWeights::default()).unwrap();

    // 2 + 3*10 = 32 beats 20
    assert_eq!(found.key, "amsterdam");
    assert_eq!(found.score, 32);
}

#[test]
fn tie_keeps_first_seen_profile() {
    let profiles = index(vec![
        profile("Gemeente Ede", 5, 0, 0, 0),
        profile("Ede", 5, 0, 0, 0),
    ]);
    let found = best_match("Gemeente Ede", &profiles, &MatchWeights::default()).unwrap();
    assert_eq!(found.key, "gemeente ede");

    let reversed = index(vec![
        profile("Ede", 5, 0, 0, 0),
        profile("Gemeente Ede", 5, 0, 0, 0),
    ]);
    let found = best_match("Gemeente Ede", &reversed, &MatchWeights::default()).unwrap();
    assert_eq!(found.key, "ede");
}

#[test]
fn custom_weights_change_the_winner() {
    let profiles = index(vec![
        profile("Gemeente Breda", 1, 1, 0, 0),
        profile("Breda", 30, 0, 0, 0),
    ]);
    let weights = MatchWeights {
        total_weight: 1,
        ai_weight: 10,
        governance_weight: 5,
        ict_weight: 2,
    };
    assert_eq!(
        best_match("Gemeente Breda", &profiles, &weights).unwrap().key,
        "breda"
    );

    let ai_heavy = MatchWeights {
        ai_weight: 100,
        ..weights
    };
    assert_eq!(
        best_match("Gemeente Breda", &profiles, &ai_heavy).unwrap().key,
        "gemeente breda"
    );
}

// ============================================================
// core_name
// ============================================================

#[test]
fn core_name_strips_known_prefixes() {
    assert_eq!(core_name("gemeente utrecht"), "utrecht");
    assert_eq!(core_name("provincie zuid-holland"), "zuid-holland");
    assert_eq!(core_name("waterschap rivierenland"), "waterschap rivierenland");
}

#[test]
fn core_name_strips_only_first_occurrence() {
    assert_eq!(core_name("gemeente gemeente ede"), "gemeente ede");
}
