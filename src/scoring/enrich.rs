// Lead enrichment: matcher + signal scorer + output assembly.
//
// Every input lead produces exactly one enriched lead. Leads without a
// match, or whose match does not pass the materialization gate, come out
// with zeroed tender fields and their original score.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::leads::models::{EnrichedDataset, EnrichedLead, Lead, LeadDataset};
use crate::scoring::matcher::{best_match, MatchWeights};
use crate::scoring::signal::{blended_score, compute_signal, SignalWeights};
use crate::tenders::aggregate::{aggregate, ProfileIndex};
use crate::tenders::keywords::KeywordSets;
use crate::tenders::record::TenderRecord;

/// Everything that tunes the enrichment run.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentWeights {
    pub keywords: KeywordSets,
    pub matching: MatchWeights,
    pub signal: SignalWeights,
}

/// Enrich one lead against the aggregated tender profiles.
pub fn enrich_lead(lead: &Lead, profiles: &ProfileIndex, weights: &EnrichmentWeights) -> EnrichedLead {
    let mut enriched = EnrichedLead {
        name: lead.name.clone(),
        registry: lead.registry.without_enrichment(),
        tender_count: 0,
        tender_ai: 0,
        tender_governance: 0,
        tender_ict: 0,
        buying_signal: 0,
        lead_score_original: lead.lead_score,
        lead_score: lead.lead_score,
        matched: false,
        enriched: false,
    };

    let Some(found) = best_match(&lead.name, profiles, &weights.matching) else {
        return enriched;
    };
    enriched.matched = true;

    let signal = compute_signal(found.profile, &weights.signal);
    debug!(
        lead = lead.name.as_str(),
        profile = found.key,
        path = found.path.as_str(),
        match_score = found.score,
        signal = signal.value,
        materialized = signal.materialized,
        "Matched lead to tender profile"
    );

    if signal.materialized {
        enriched.enriched = true;
        enriched.tender_count = found.profile.total;
        enriched.tender_ai = found.profile.ai;
        enriched.tender_governance = found.profile.governance;
        enriched.tender_ict = found.profile.ict;
        enriched.buying_signal = signal.value;
        enriched.lead_score = blended_score(lead.lead_score, signal.value, &weights.signal);
    }

    enriched
}

/// Enrich every lead, rank by score and attach the summary counters.
pub fn assemble(
    dataset: &LeadDataset,
    profiles: &ProfileIndex,
    weights: &EnrichmentWeights,
    generated: NaiveDate,
) -> EnrichedDataset {
    let mut leads: Vec<EnrichedLead> = dataset
        .leads
        .iter()
        .map(|lead| enrich_lead(lead, profiles, weights))
        .collect();

    // Stable: equal scores keep input order
    leads.sort_by(|a, b| b.lead_score.cmp(&a.lead_score));

    let matched = leads.iter().filter(|l| l.matched).count();
    let enriched = leads.iter().filter(|l| l.enriched).count();

    info!(
        leads = leads.len(),
        matched, enriched, "Enriched leads with tender signals"
    );

    EnrichedDataset {
        generated_date: generated.format("%Y-%m-%d").to_string(),
        total_leads: leads.len(),
        total_algorithms: dataset.total_algorithms,
        matched_with_tenderned: matched,
        enriched_with_signals: enriched,
        leads,
    }
}

/// Full pipeline: aggregate the tender records, then enrich and rank.
pub fn run(
    dataset: &LeadDataset,
    tenders: &[TenderRecord],
    weights: &EnrichmentWeights,
    generated: NaiveDate,
) -> EnrichedDataset {
    let profiles = aggregate(tenders, &weights.keywords);
    assemble(dataset, &profiles, weights, generated)
}
