// Outreach shortlist: which leads to contact first.
//
// Independent of `lead_score`. A lead that is large and compliance-heavy
// scores well on lead_score but may be a slow first customer; the outreach
// score prefers mid-sized organizations with impactful algorithms, no IAMA
// on file and recent registry activity.

use chrono::NaiveDate;
use serde::Serialize;

use crate::leads::models::Lead;

/// Limits for the two shortlists and the viability filter.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistCriteria {
    pub quick_win_slots: usize,
    pub strategic_slots: usize,
    pub min_impactful: u32,
    pub min_algorithms: u32,
}

impl Default for ShortlistCriteria {
    fn default() -> Self {
        Self {
            quick_win_slots: 10,
            strategic_slots: 10,
            min_impactful: 1,
            min_algorithms: 3,
        }
    }
}

/// A lead with its outreach score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistEntry {
    #[serde(flatten)]
    pub lead: Lead,
    pub outreach_score: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Shortlist {
    pub quick_wins: Vec<ShortlistEntry>,
    pub strategic_targets: Vec<ShortlistEntry>,
    /// Leads that passed the viability filter
    pub viable: usize,
}

/// Points for the number of registered algorithms. 5-15 is the sweet spot.
fn algorithm_points(count: u32) -> u32 {
    match count {
        5..=15 => 30,
        16..=30 => 20,
        31.. => 5,
        3..=4 => 10,
        _ => 0,
    }
}

fn impactful_points(count: u32) -> u32 {
    match count {
        5.. => 30,
        3..=4 => 20,
        1..=2 => 10,
        _ => 0,
    }
}

/// Points for how recently the organization published to the registry.
fn recency_points(latest_date: Option<&str>, reference: NaiveDate) -> u32 {
    let Some(latest) = latest_date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    else {
        return 0;
    };
    let months_ago = (reference - latest).num_days() as f64 / 30.0;
    if months_ago <= 3.0 {
        20
    } else if months_ago <= 6.0 {
        15
    } else if months_ago <= 12.0 {
        10
    } else {
        0
    }
}

fn org_type_points(org_type: &str) -> u32 {
    match org_type {
        "gemeente" => 15,
        "zbo" => 10,
        t if t.contains("waterschap") => 8,
        _ => 0,
    }
}

/// Outreach fitness of a lead as of `reference`.
pub fn outreach_score(lead: &Lead, reference: NaiveDate) -> u32 {
    let attrs = &lead.registry;
    let mut score = algorithm_points(attrs.algorithm_count());
    score += impactful_points(attrs.impactful_count());
    if !attrs.has_iama() {
        score += 20;
    }
    score += recency_points(attrs.latest_date.as_deref(), reference);
    score += org_type_points(&attrs.org_type_lower());
    score
}

fn is_quick_win_profile(lead: &Lead) -> bool {
    let org_type = lead.registry.org_type_lower();
    (org_type == "gemeente" || org_type == "zbo")
        && (3..=15).contains(&lead.registry.algorithm_count())
}

/// Rank viable leads and split them into quick wins and strategic targets.
pub fn build_shortlist(leads: &[Lead], reference: NaiveDate, criteria: &ShortlistCriteria) -> Shortlist {
    let mut viable: Vec<ShortlistEntry> = leads
        .iter()
        .filter(|lead| {
            lead.registry.impactful_count() >= criteria.min_impactful
                && lead.registry.algorithm_count() >= criteria.min_algorithms
        })
        .map(|lead| ShortlistEntry {
            lead: lead.clone(),
            outreach_score: outreach_score(lead, reference),
        })
        .collect();
    viable.sort_by(|a, b| b.outreach_score.cmp(&a.outreach_score));

    let mut shortlist = Shortlist {
        viable: viable.len(),
        ..Default::default()
    };
    let mut remaining = Vec::new();

    for entry in viable {
        if is_quick_win_profile(&entry.lead) && shortlist.quick_wins.len() < criteria.quick_win_slots {
            shortlist.quick_wins.push(entry);
        } else if entry.lead.registry.impactful_count() >= 5
            && shortlist.strategic_targets.len() < criteria.strategic_slots
        {
            shortlist.strategic_targets.push(entry);
        } else {
            remaining.push(entry);
        }
    }

    // Top up both lists from what is left, quick wins first
    let mut remaining = remaining.into_iter();
    while shortlist.quick_wins.len() < criteria.quick_win_slots {
        let Some(entry) = remaining.next() else { break };
        shortlist.quick_wins.push(entry);
    }
    while shortlist.strategic_targets.len() < criteria.strategic_slots {
        let Some(entry) = remaining.next() else { break };
        shortlist.strategic_targets.push(entry);
    }

    shortlist
}

/// The shortlist document written to the export directory.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistDocument {
    pub generated_date: String,
    pub reference_date: String,
    pub criteria: ShortlistCriteria,
    pub quick_wins: Vec<ShortlistEntry>,
    pub strategic_targets: Vec<ShortlistEntry>,
}

impl ShortlistDocument {
    pub fn new(
        shortlist: Shortlist,
        criteria: ShortlistCriteria,
        generated: NaiveDate,
        reference: NaiveDate,
    ) -> Self {
        Self {
            generated_date: generated.format("%Y-%m-%d").to_string(),
            reference_date: reference.format("%Y-%m-%d").to_string(),
            criteria,
            quick_wins: shortlist.quick_wins,
            strategic_targets: shortlist.strategic_targets,
        }
    }
}

/// One line of the shortlist spreadsheet handed to the sales team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistCsvRow {
    #[serde(rename = "Rang")]
    pub rank: usize,
    #[serde(rename = "Categorie")]
    pub list: &'static str,
    #[serde(rename = "Organisatie")]
    pub name: String,
    #[serde(rename = "Type")]
    pub org_type: String,
    #[serde(rename = "Algoritmes")]
    pub algorithms: u32,
    #[serde(rename = "Impactvol")]
    pub impactful: u32,
    #[serde(rename = "Hoog Risico")]
    pub high_risk: u32,
    #[serde(rename = "IAMA")]
    pub iama: &'static str,
    #[serde(rename = "Laatste Update")]
    pub latest_date: Option<String>,
    #[serde(rename = "Outreach Score")]
    pub outreach_score: u32,
    #[serde(rename = "Categorieën")]
    pub categories: String,
}

impl ShortlistCsvRow {
    fn new(rank: usize, list: &'static str, entry: &ShortlistEntry) -> Self {
        let attrs = &entry.lead.registry;
        let categories = attrs
            .categories
            .as_ref()
            .map(|c| c.keys().map(String::as_str).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();

        Self {
            rank,
            list,
            name: entry.lead.name.clone(),
            org_type: attrs.org_type.clone().unwrap_or_default(),
            algorithms: attrs.algorithm_count(),
            impactful: attrs.impactful_count(),
            high_risk: attrs.high_risk_count(),
            // Only an explicit flag counts as "Ja" here
            iama: if attrs.has_iama == Some(true) { "Ja" } else { "Nee" },
            latest_date: attrs.latest_date.clone(),
            outreach_score: entry.outreach_score,
            categories,
        }
    }
}

/// Spreadsheet rows: quick wins ranked from 1, then strategic targets
/// ranked from 1.
pub fn csv_rows(shortlist: &Shortlist) -> Vec<ShortlistCsvRow> {
    let quick = shortlist
        .quick_wins
        .iter()
        .enumerate()
        .map(|(i, entry)| ShortlistCsvRow::new(i + 1, "Quick Win", entry));
    let strategic = shortlist
        .strategic_targets
        .iter()
        .enumerate()
        .map(|(i, entry)| ShortlistCsvRow::new(i + 1, "Strategic", entry));
    quick.chain(strategic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::models::RegistryAttributes;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
    }

    fn lead(name: &str, org_type: &str, algorithms: u32, impactful: u32) -> Lead {
        Lead {
            name: name.to_string(),
            lead_score: 50,
            registry: RegistryAttributes {
                org_type: Some(org_type.to_string()),
                algorithm_count: Some(algorithms),
                impactful_count: Some(impactful),
                has_iama: Some(true),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_algorithm_sweet_spot() {
        assert_eq!(algorithm_points(2), 0);
        assert_eq!(algorithm_points(3), 10);
        assert_eq!(algorithm_points(5), 30);
        assert_eq!(algorithm_points(15), 30);
        assert_eq!(algorithm_points(16), 20);
        assert_eq!(algorithm_points(30), 20);
        assert_eq!(algorithm_points(31), 5);
    }

    #[test]
    fn test_recency_windows() {
        let r = reference();
        assert_eq!(recency_points(Some("2025-11-15"), r), 20);
        assert_eq!(recency_points(Some("2025-08-01"), r), 15);
        assert_eq!(recency_points(Some("2025-03-01"), r), 10);
        assert_eq!(recency_points(Some("2023-01-01"), r), 0);
        assert_eq!(recency_points(Some("gisteren"), r), 0);
        assert_eq!(recency_points(None, r), 0);
    }

    #[test]
    fn test_full_outreach_score() {
        let mut l = lead("Gemeente Zwolle", "Gemeente", 8, 5);
        l.registry.has_iama = Some(false);
        l.registry.latest_date = Some("2025-12-01".to_string());
        // 30 algos + 30 impactful + 20 no IAMA + 20 recent + 15 gemeente
        assert_eq!(outreach_score(&l, reference()), 115);
    }

    #[test]
    fn test_waterschap_type_bonus() {
        let l = lead("Waterschap Rivierenland", "Waterschap", 2, 0);
        assert_eq!(outreach_score(&l, reference()), 8);
    }

    #[test]
    fn test_non_viable_leads_are_excluded() {
        let leads = vec![
            lead("Gemeente A", "Gemeente", 10, 0),
            lead("Gemeente B", "Gemeente", 2, 3),
            lead("Gemeente C", "Gemeente", 10, 1),
        ];
        let s = build_shortlist(&leads, reference(), &ShortlistCriteria::default());
        assert_eq!(s.viable, 1);
        assert_eq!(s.quick_wins.len(), 1);
        assert_eq!(s.quick_wins[0].lead.name, "Gemeente C");
    }

    #[test]
    fn test_partition_and_top_up() {
        let criteria = ShortlistCriteria {
            quick_win_slots: 2,
            strategic_slots: 2,
            ..Default::default()
        };
        let leads = vec![
            lead("Gemeente Klein", "Gemeente", 8, 2),
            lead("Ministerie X", "Rijk", 40, 9),
            lead("Autoriteit Y", "ZBO", 20, 1),
            lead("Rijksdienst Z", "Rijk", 12, 2),
        ];
        let s = build_shortlist(&leads, reference(), &criteria);

        let quick: Vec<_> = s.quick_wins.iter().map(|e| e.lead.name.as_str()).collect();
        let strategic: Vec<_> = s
            .strategic_targets
            .iter()
            .map(|e| e.lead.name.as_str())
            .collect();
        // Klein 55, Autoriteit 40, Rijksdienst 40, Ministerie 35
        assert_eq!(quick, vec!["Gemeente Klein", "Autoriteit Y"]);
        assert_eq!(strategic, vec!["Ministerie X", "Rijksdienst Z"]);
    }

    #[test]
    fn test_csv_rows_rank_each_list_separately() {
        let mut utrecht = lead("Gemeente Utrecht", "Gemeente", 8, 2);
        utrecht.registry.has_iama = None;
        utrecht.registry.latest_date = Some("2025-10-01".to_string());
        let mut categories = indexmap::IndexMap::new();
        categories.insert("Handhaving".to_string(), 3);
        categories.insert("Sociaal domein".to_string(), 1);
        utrecht.registry.categories = Some(categories);

        let shortlist = Shortlist {
            quick_wins: vec![ShortlistEntry {
                lead: utrecht,
                outreach_score: 70,
            }],
            strategic_targets: vec![
                ShortlistEntry {
                    lead: lead("UWV", "Rijk", 40, 9),
                    outreach_score: 35,
                },
                ShortlistEntry {
                    lead: lead("DUO", "Rijk", 25, 6),
                    outreach_score: 50,
                },
            ],
            viable: 3,
        };
        let rows = csv_rows(&shortlist);

        let ranks: Vec<_> = rows.iter().map(|r| (r.list, r.rank)).collect();
        assert_eq!(
            ranks,
            vec![("Quick Win", 1), ("Strategic", 1), ("Strategic", 2)]
        );
        assert_eq!(rows[0].categories, "Handhaving, Sociaal domein");
        assert_eq!(rows[0].iama, "Nee");
        assert_eq!(rows[0].latest_date.as_deref(), Some("2025-10-01"));
        assert_eq!(rows[1].iama, "Ja");
        assert_eq!(rows[1].categories, "");
    }
}
