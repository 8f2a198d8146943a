// Buying-signal score.
//
// Turns a matched tender profile into a bounded 0-15 signal of purchase
// intent, then blends half of it into the registry lead score.
//
// Only the highest-priority non-zero category contributes the base signal:
// AI tenders, else governance tenders, else generic ICT tenders. Recent
// tender activity adds a flat bonus on top.

use serde::Serialize;

use crate::leads::models::MAX_LEAD_SCORE;
use crate::tenders::aggregate::OrganizationProfile;

/// Signal parameters. The defaults are the production values.
#[derive(Debug, Clone)]
pub struct SignalWeights {
    pub ai_per_tender: u32,
    pub ai_cap: u32,
    pub governance_per_tender: u32,
    pub governance_cap: u32,
    pub ict_per_tender: u32,
    pub ict_cap: u32,
    pub recency_bonus: u32,
    /// Literal tender years that earn the recency bonus
    pub recency_years: Vec<String>,
    /// Ceiling for the final signal
    pub signal_cap: u32,
    /// A zero-signal profile still materializes above this many tenders
    pub volume_threshold: u32,
    /// Fraction of the signal added to the lead score
    pub blend_factor: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            ai_per_tender: 5,
            ai_cap: 15,
            governance_per_tender: 3,
            governance_cap: 10,
            ict_per_tender: 1,
            ict_cap: 5,
            recency_bonus: 3,
            recency_years: vec!["2025".to_string(), "2024".to_string()],
            signal_cap: 15,
            volume_threshold: 5,
            blend_factor: 0.5,
        }
    }
}

/// Which category produced the base signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalSource {
    Ai,
    Governance,
    Ict,
    None,
}

/// The computed signal for one matched profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyingSignal {
    /// Final signal, 0 to `signal_cap`
    pub value: u32,
    /// Signal before the recency bonus
    pub base: u32,
    pub source: SignalSource,
    pub recent_activity: bool,
    /// Whether the tender fields are carried into the enriched lead
    pub materialized: bool,
}

/// Base signal from the highest-priority non-zero category.
fn base_signal(profile: &OrganizationProfile, weights: &SignalWeights) -> (u32, SignalSource) {
    if profile.ai > 0 {
        (
            (profile.ai * weights.ai_per_tender).min(weights.ai_cap),
            SignalSource::Ai,
        )
    } else if profile.governance > 0 {
        (
            (profile.governance * weights.governance_per_tender).min(weights.governance_cap),
            SignalSource::Governance,
        )
    } else if profile.ict > 0 {
        (
            (profile.ict * weights.ict_per_tender).min(weights.ict_cap),
            SignalSource::Ict,
        )
    } else {
        (0, SignalSource::None)
    }
}

/// Compute the buying signal for a matched profile.
pub fn compute_signal(profile: &OrganizationProfile, weights: &SignalWeights) -> BuyingSignal {
    let (base, source) = base_signal(profile, weights);

    let recent_activity = weights
        .recency_years
        .iter()
        .any(|year| profile.recent_years.contains(year));

    let value = if recent_activity {
        (base + weights.recency_bonus).min(weights.signal_cap)
    } else {
        base.min(weights.signal_cap)
    };

    BuyingSignal {
        value,
        base,
        source,
        recent_activity,
        materialized: value > 0 || profile.total > weights.volume_threshold,
    }
}

/// Add the rounded, weighted signal to the original score, capped at 100.
///
/// Rounds half up, so a signal of 3 adds 2.
pub fn blended_score(original: u32, signal: u32, weights: &SignalWeights) -> u32 {
    let boost = (signal as f64 * weights.blend_factor).round() as u32;
    (original + boost).min(MAX_LEAD_SCORE)
}
