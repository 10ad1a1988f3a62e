//! Dataset schema consumed by the index loader
//!
//! The dataset is a flat JSON object mapping provider names to groups of
//! prefixes, each group carrying the tags that apply to every prefix in it:
//!
//! ```json
//! {
//!     "AWS": [
//!         { "prefixes": ["192.168.1.0/24"], "tags": ["Cloud"] }
//!     ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One group of prefixes sharing a tag set under a provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixGroup {
    /// CIDR subnet strings
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Ordered tags applied to every prefix in the group
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A whole prefix dataset: provider name → prefix groups
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub providers: BTreeMap<String, Vec<PrefixGroup>>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Append a group of prefixes under a provider
    pub fn push_group(&mut self, provider: impl Into<String>, group: PrefixGroup) {
        self.providers.entry(provider.into()).or_default().push(group);
    }

    /// Total number of subnet strings across all providers
    pub fn prefix_count(&self) -> usize {
        self.providers
            .values()
            .flatten()
            .map(|group| group.prefixes.len())
            .sum()
    }

    /// Fan out every `(subnet, provider, tags)` triple in deterministic
    /// (provider-sorted, then group, then prefix) order
    pub fn iter_prefixes(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.providers.iter().flat_map(|(provider, groups)| {
            groups.iter().flat_map(move |group| {
                group
                    .prefixes
                    .iter()
                    .map(move |subnet| (subnet.as_str(), provider.as_str(), group.tags.as_slice()))
            })
        })
    }
}
