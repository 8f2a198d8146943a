// Public tender data: row loading, keyword classification, per-organization
// aggregation and the strict browser export.

pub mod aggregate;
pub mod export;
pub mod keywords;
pub mod loader;
pub mod record;
