// Leadhub: tender-enriched lead scoring for algorithm-registry organizations
//
// This is the library root. Each module corresponds to a stage of the
// enrichment pipeline or one of its outputs.

pub mod config;
pub mod leads;
pub mod output;
pub mod scoring;
pub mod status;
pub mod tenders;
