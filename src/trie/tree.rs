//! The compressed prefix trie

use super::key::{address_bits, network_bits};
use super::TrieNode;
use crate::model::Entry;
use crate::{Error, Result};
use ipnet::IpNet;
use std::net::IpAddr;

/// The prefix index: a compressed bit-trie answering "which inserted
/// subnets contain this address?"
///
/// One subtrie is kept per address family so an IPv4 key can never walk
/// into an IPv6-derived path whose leading bits happen to coincide. The
/// paired family roots form the single logical root of the index: empty
/// label, never removed, counted once.
#[derive(Clone, Debug)]
pub struct PrefixTrie {
    root_v4: TrieNode,
    root_v6: TrieNode,
    /// The logical root plus every edge or split node ever created.
    /// Appending an entry to an existing node does not change it, and
    /// nodes are never deleted.
    node_count: usize,
}

impl PrefixTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        PrefixTrie {
            root_v4: TrieNode::root(),
            root_v6: TrieNode::root(),
            node_count: 1,
        }
    }

    /// Structural node count (monotonic)
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Parse a subnet string, accepting a bare address as a host route
    fn parse_subnet(subnet: &str) -> Result<IpNet> {
        if let Ok(net) = subnet.parse::<IpNet>() {
            return Ok(net);
        }
        subnet
            .parse::<IpAddr>()
            .map(IpNet::from)
            .map_err(|_| Error::InvalidSubnet(subnet.to_string()))
    }

    /// Insert a subnet with its provider and tags
    ///
    /// Re-inserting an identical subnet appends a second, distinct entry
    /// to the same node; there is no dedup.
    pub fn insert(&mut self, subnet: &str, provider: &str, tags: &[String]) -> Result<()> {
        let net = Self::parse_subnet(subnet)?;
        let mut key = network_bits(&net);
        let mut node = match net {
            IpNet::V4(_) => &mut self.root_v4,
            IpNet::V6(_) => &mut self.root_v6,
        };

        while !key.is_empty() {
            let cur = node;
            match cur
                .children
                .iter()
                .position(|child| common_prefix_len(&child.label, &key) > 0)
            {
                None => {
                    // no child shares any prefix: the whole remaining key
                    // becomes one new edge
                    cur.children.push(TrieNode::new(std::mem::take(&mut key)));
                    self.node_count += 1;
                    let last = cur.children.len() - 1;
                    node = &mut cur.children[last];
                }
                Some(i) => {
                    let common = common_prefix_len(&cur.children[i].label, &key);
                    key.drain(..common);
                    if common == cur.children[i].label.len() {
                        node = &mut cur.children[i];
                    } else {
                        // partial match: split the edge at the common prefix
                        let mut existing = cur.children.swap_remove(i);
                        let mut split = TrieNode::new(existing.label[..common].to_vec());
                        existing.label.drain(..common);
                        split.children.push(existing);
                        cur.children.push(split);
                        self.node_count += 1;
                        let last = cur.children.len() - 1;
                        node = &mut cur.children[last];
                    }
                }
            }
        }

        node.entries.push(Entry::new(subnet, provider, tags.to_vec()));
        Ok(())
    }

    /// Find every inserted subnet containing `addr`
    ///
    /// Entries accumulate in root-to-leaf path order, so a containing /8
    /// appears before a nested /16. Returns `None` when nothing matched;
    /// a returned list is never empty, so callers can always tell "no
    /// containing subnet" from a found result.
    pub fn search(&self, addr: &IpAddr) -> Option<Vec<Entry>> {
        let bits = address_bits(addr);
        let mut key = bits.as_slice();
        let mut node = match addr {
            IpAddr::V4(_) => &self.root_v4,
            IpAddr::V6(_) => &self.root_v6,
        };
        let mut matches = Vec::new();

        while !key.is_empty() {
            // sibling labels are prefix-disjoint, so at most one child
            // can match the remaining key
            match node
                .children
                .iter()
                .find(|child| key.starts_with(&child.label))
            {
                Some(child) => {
                    key = &key[child.label.len()..];
                    node = child;
                    matches.extend_from_slice(&child.entries);
                }
                None => break,
            }
        }

        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        PrefixTrie::new()
    }
}

/// Length of the common prefix of two bit sequences
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
