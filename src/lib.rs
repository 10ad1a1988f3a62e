//! # prefix_db
//!
//! An in-memory IP prefix containment index.
//!
//! prefix_db answers "which known network ranges contain this address,
//! and with what metadata (owning provider, tags)?" against a dataset of
//! CIDR subnets. A lookup returns every containing subnet, not only the
//! most specific one; batches fan out over a bounded worker pool; and the
//! dataset can be reloaded while the previous index keeps answering.
//!
//! ## Core Concepts
//!
//! - **Entry**: one subnet with its owning provider and tags
//! - **PrefixTrie**: the compressed bit-trie storing subnets
//! - **IndexManager**: owns the live index; lookup, batch_lookup, reload
//! - **DatasetSource**: where the subnet dataset comes from
//!
//! ## Example
//!
//! ```ignore
//! use prefix_db::{FileSource, IndexManager};
//!
//! let manager = IndexManager::new(Box::new(FileSource::new("prefixes.json")))?;
//! let matches = manager.lookup(&"192.168.1.5".parse()?);
//! ```

pub mod model;
pub mod source;
pub mod trie;

mod error;
mod manager;

pub use error::{Error, Result};
pub use manager::{IndexManager, LoadReport, DEFAULT_BATCH_WORKERS};
pub use model::{Dataset, Entry, PrefixGroup};
pub use source::{DatasetSource, FileSource, MemorySource};
pub use trie::{PrefixTrie, TrieNode};
