//! Index lifecycle and concurrency management
//!
//! This module owns the single live prefix index. Reads clone the live
//! `Arc` under a momentary read guard and then search without holding any
//! lock; a reload builds its replacement index entirely off to the side
//! and swaps the pointer under a brief write lock. Readers therefore
//! never wait on a rebuild, and the service is never without an index.

use crate::model::Entry;
use crate::source::DatasetSource;
use crate::trie::PrefixTrie;
use crate::Result;
use log::{error, info};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

/// Default number of workers fanning out one batch lookup
pub const DEFAULT_BATCH_WORKERS: usize = 10;

/// Counts reported after a successful load or reload
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LoadReport {
    /// Subnets inserted into the fresh index
    pub inserted: usize,
    /// Structural node count of the fresh index
    pub node_count: usize,
}

/// Owns the single live prefix index
///
/// Construct one at startup and hand it by reference to whatever serves
/// queries; there is no global instance.
pub struct IndexManager {
    source: Box<dyn DatasetSource>,
    live: RwLock<Arc<PrefixTrie>>,
    pool: rayon::ThreadPool,
}

impl IndexManager {
    /// Create a manager with the default batch worker count
    ///
    /// Performs the initial load from `source`; a dataset that cannot be
    /// fetched or parsed fails construction, since there would be no
    /// index to fall back to.
    pub fn new(source: Box<dyn DatasetSource>) -> Result<Self> {
        Self::with_workers(source, DEFAULT_BATCH_WORKERS)
    }

    /// Create a manager with a fixed batch worker count
    pub fn with_workers(source: Box<dyn DatasetSource>, workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let (trie, report) = build_index(source.as_ref())?;
        info!(
            "index initialized from {}: {} subnets, {} nodes",
            source.describe(),
            report.inserted,
            report.node_count
        );
        Ok(IndexManager {
            source,
            live: RwLock::new(Arc::new(trie)),
            pool,
        })
    }

    /// Number of workers serving batch lookups
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// A point-in-time handle to the live index
    pub fn snapshot(&self) -> Arc<PrefixTrie> {
        self.live.read().clone()
    }

    /// Structural node count of the live index
    pub fn node_count(&self) -> usize {
        self.live.read().node_count()
    }

    /// Find every known subnet containing `addr`
    ///
    /// `None` means no containing subnet exists; a returned list is never
    /// empty.
    pub fn lookup(&self, addr: &IpAddr) -> Option<Vec<Entry>> {
        self.snapshot().search(addr)
    }

    /// Look up many addresses concurrently
    ///
    /// The whole batch runs against one snapshot of the index, so a
    /// concurrent reload can never mix old and new answers within a
    /// single batch. The result is positionally aligned with the input:
    /// `results[i]` answers `addrs[i]` regardless of completion order.
    pub fn batch_lookup(&self, addrs: &[IpAddr]) -> Vec<Option<Vec<Entry>>> {
        let snapshot = self.snapshot();
        self.pool
            .install(|| addrs.par_iter().map(|addr| snapshot.search(addr)).collect())
    }

    /// Rebuild the index from the dataset source and swap it live
    ///
    /// Replace-whole semantics: reloading an unchanged dataset is
    /// idempotent. On any failure the previously live index keeps serving
    /// and the error is returned to the caller.
    pub fn reload(&self) -> Result<LoadReport> {
        match build_index(self.source.as_ref()) {
            Ok((trie, report)) => {
                *self.live.write() = Arc::new(trie);
                info!(
                    "index reloaded from {}: {} subnets, {} nodes",
                    self.source.describe(),
                    report.inserted,
                    report.node_count
                );
                Ok(report)
            }
            Err(e) => {
                error!(
                    "reload from {} failed, keeping previous index: {}",
                    self.source.describe(),
                    e
                );
                Err(e)
            }
        }
    }
}

/// Fetch the dataset and build a fresh index from it
///
/// The first malformed subnet aborts the whole build.
fn build_index(source: &dyn DatasetSource) -> Result<(PrefixTrie, LoadReport)> {
    let dataset = source.fetch()?;
    let mut trie = PrefixTrie::new();
    let mut inserted = 0;
    for (subnet, provider, tags) in dataset.iter_prefixes() {
        trie.insert(subnet, provider, tags)?;
        inserted += 1;
    }
    let report = LoadReport {
        inserted,
        node_count: trie.node_count(),
    };
    Ok((trie, report))
}
