//! Pluggable dataset sources
//!
//! A [`DatasetSource`] supplies the subnet/provider/tag dataset the index
//! is built from. The file-backed source is the production one; the
//! in-memory source exists so tests can exercise the reload lifecycle
//! without touching disk.

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use crate::model::Dataset;
use crate::Result;

/// Supplier of the prefix dataset
pub trait DatasetSource: Send + Sync {
    /// Fetch a complete dataset
    fn fetch(&self) -> Result<Dataset>;

    /// Human-readable description of where the data comes from
    fn describe(&self) -> String;
}
