// Fuzzy organization matcher.
//
// Registry leads and tender profiles name the same organization in
// different ways ("Gemeente Zwolle", "Zwolle", "zwolle gemeente"). Two
// containment tests cover most of those variants without edit distance:
//
//   direct:    profile key contains the lead name, or the lead name
//              contains the profile key
//   core name: the lead name with "gemeente " / "provincie " removed is
//              contained in the profile key
//
// Every qualifying profile is scored by its tender activity and the
// highest score wins. Same-named but distinct organizations can collide;
// that is an accepted cost of the simple heuristic.

use serde::Serialize;

use crate::tenders::aggregate::{normalize_name, OrganizationProfile, ProfileIndex};

/// Entity-type prefixes removed to form the core name of a lead.
pub const STRIPPED_PREFIXES: [&str; 2] = ["gemeente ", "provincie "];

/// Weights for ranking candidate profiles.
///
/// `score = total * total_weight + ai * ai_weight + governance * governance_weight
///          + ict * ict_weight`
#[derive(Debug, Clone)]
pub struct MatchWeights {
    pub total_weight: u32,
    /// AI tenders are the strongest sales signal (default 10)
    pub ai_weight: u32,
    pub governance_weight: u32,
    pub ict_weight: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            total_weight: 1,
            ai_weight: 10,
            governance_weight: 5,
            ict_weight: 2,
        }
    }
}

impl MatchWeights {
    pub fn score(&self, profile: &OrganizationProfile) -> u32 {
        profile.total * self.total_weight
            + profile.ai * self.ai_weight
            + profile.governance * self.governance_weight
            + profile.ict * self.ict_weight
    }
}

/// Which containment test qualified a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPath {
    Direct,
    CoreName,
}

impl MatchPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPath::Direct => "direct",
            MatchPath::CoreName => "core name",
        }
    }
}

/// The best tender profile for a lead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenderMatch<'a> {
    /// Normalized profile key
    pub key: &'a str,
    pub profile: &'a OrganizationProfile,
    pub score: u32,
    pub path: MatchPath,
}

/// Lead name with the first occurrence of each entity prefix removed.
pub fn core_name(normalized_lead: &str) -> String {
    STRIPPED_PREFIXES
        .iter()
        .fold(normalized_lead.to_string(), |name, prefix| {
            name.replacen(prefix, "", 1)
        })
}

/// Decide whether `key` qualifies for the lead, and by which test.
fn qualify(lead: &str, core: &str, key: &str) -> Option<MatchPath> {
    if key.contains(lead) || lead.contains(key) {
        Some(MatchPath::Direct)
    } else if !core.is_empty() && key.contains(core) {
        Some(MatchPath::CoreName)
    } else {
        None
    }
}

/// Find the highest-scoring profile for `lead_name`.
///
/// Ties keep the profile seen first in `profiles`. Empty lead names and
/// empty profile keys never match, since containment would accept anything.
pub fn best_match<'a>(
    lead_name: &str,
    profiles: &'a ProfileIndex,
    weights: &MatchWeights,
) -> Option<TenderMatch<'a>> {
    let lead = normalize_name(lead_name);
    if lead.is_empty() {
        return None;
    }
    let core = core_name(&lead);

    let mut best: Option<TenderMatch<'a>> = None;
    for (key, profile) in profiles {
        if key.is_empty() {
            continue;
        }
        let Some(path) = qualify(&lead, &core, key) else {
            continue;
        };
        let score = weights.score(profile);
        if best.map_or(true, |b| score > b.score) {
            best = Some(TenderMatch {
                key: key.as_str(),
                profile,
                score,
                path,
            });
        }
    }
    best
}
