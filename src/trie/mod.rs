//! Compressed radix trie for IP prefix containment
//!
//! This implements the in-memory prefix index:
//! - Subnets are keyed by their network bits, addresses by their full bits
//! - Chains of single-child nodes are collapsed into multi-bit edge labels
//! - A search collects every subnet along the matched path, not only the
//!   most specific one

mod key;
mod node;
mod tree;

pub use key::{address_bits, network_bits};
pub use node::TrieNode;
pub use tree::PrefixTrie;
