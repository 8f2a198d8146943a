// Lead scoring: tender matching, buying signals, enrichment and the
// outreach shortlist.

pub mod enrich;
pub mod matcher;
pub mod outreach;
pub mod signal;
