//! Entry type - the metadata attached to one inserted subnet

use serde::{Deserialize, Serialize};

/// One subnet record held by the index
///
/// Entries are immutable once inserted. The subnet string is kept verbatim
/// as it appeared in the dataset, and duplicate inserts of the same subnet
/// are kept as distinct entries, so two equal `Entry` values can
/// legitimately coexist on one trie node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The CIDR subnet as supplied by the dataset
    pub subnet: String,

    /// Owning provider name
    pub provider: String,

    /// Ordered tags attached to the subnet
    pub tags: Vec<String>,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        subnet: impl Into<String>,
        provider: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Entry {
            subnet: subnet.into(),
            provider: provider.into(),
            tags,
        }
    }
}
