//! Core data model types for prefix_db

mod dataset;
mod entry;

pub use dataset::{Dataset, PrefixGroup};
pub use entry::Entry;
