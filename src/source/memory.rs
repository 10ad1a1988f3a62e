//! In-memory dataset source for tests

use super::DatasetSource;
use crate::model::Dataset;
use crate::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Serves a dataset held in memory
///
/// Clones share the underlying dataset, so a test can keep a handle,
/// hand a clone to the manager, and later [`replace`](Self::replace) the
/// data to drive a reload.
#[derive(Clone)]
pub struct MemorySource {
    dataset: Arc<RwLock<Dataset>>,
}

impl MemorySource {
    /// Create a source serving `dataset`
    pub fn new(dataset: Dataset) -> Self {
        MemorySource {
            dataset: Arc::new(RwLock::new(dataset)),
        }
    }

    /// Swap the dataset served by subsequent fetches
    pub fn replace(&self, dataset: Dataset) {
        *self.dataset.write() = dataset;
    }
}

impl DatasetSource for MemorySource {
    fn fetch(&self) -> Result<Dataset> {
        Ok(self.dataset.read().clone())
    }

    fn describe(&self) -> String {
        "in-memory dataset".to_string()
    }
}
