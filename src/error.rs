//! Error types for prefix_db

use thiserror::Error;

/// Result type alias for prefix_db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in prefix_db operations
///
/// A lookup that finds nothing is not an error: `search` and `lookup`
/// return `None` for that, so no variant exists for it here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Invalid subnet: {0}")]
    InvalidSubnet(String),

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
