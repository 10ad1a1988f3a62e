//! File-backed dataset source

use super::DatasetSource;
use crate::model::Dataset;
use crate::Result;
use std::path::{Path, PathBuf};

/// Reads the dataset from a JSON file on disk
///
/// The file maps provider names to prefix groups:
/// `{"AWS": [{"prefixes": ["192.168.1.0/24"], "tags": ["Cloud"]}]}`
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self) -> Result<Dataset> {
        let raw = std::fs::read_to_string(&self.path)?;
        let dataset = serde_json::from_str(&raw)?;
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
