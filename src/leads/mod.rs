// Algorithm-registry leads: data models, the JSON loader and the CSV import.

pub mod loader;
pub mod models;
pub mod registry;
