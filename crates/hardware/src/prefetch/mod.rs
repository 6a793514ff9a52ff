//! Hardware Prefetcher implementations.
//!
//! This module contains the interface a cache model uses to drive a prefetcher,
//! and the Markov miss-address prefetcher built on top of a fixed-size
//! prediction table.

/// First-order Markov prefetcher engine.
pub mod markov;

/// Markov prediction table and its successor lists.
pub mod table;

pub use self::markov::MarkovPrefetcher;
pub use self::table::{MarkovTable, TableEntry, Update};

use crate::common::ConfigError;
use crate::config::{Config, PrefetcherKind};

/// A prefetch request proposed by a prefetcher.
///
/// Higher `priority` values should be issued first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrefetchCandidate {
    /// Block-aligned address to prefetch.
    pub addr: u64,
    /// Relative issue priority.
    pub priority: usize,
}

impl PrefetchCandidate {
    /// Creates a new candidate.
    pub const fn new(addr: u64, priority: usize) -> Self {
        Self { addr, priority }
    }
}

/// Trait for cache prefetcher implementations.
///
/// Prefetchers observe memory access patterns and generate prefetch
/// requests to reduce cache miss penalties.
pub trait Prefetcher: Send + Sync {
    /// Observes a memory access and generates prefetch candidates.
    ///
    /// Called by the cache on each access to allow the prefetcher to
    /// learn access patterns and generate prefetch requests.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was accessed
    /// * `hit` - Whether the access was a cache hit
    ///
    /// # Returns
    ///
    /// Candidates in issue order. Empty if no prefetches are needed.
    fn observe(&mut self, addr: u64, hit: bool) -> Vec<PrefetchCandidate>;
}

/// Builds the prefetcher selected by `config`, if any.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the selected prefetcher's geometry is invalid.
pub fn build(config: &Config) -> Result<Option<Box<dyn Prefetcher>>, ConfigError> {
    let prefetcher: Option<Box<dyn Prefetcher>> = match config.prefetcher {
        PrefetcherKind::Markov => Some(Box::new(MarkovPrefetcher::new(config.markov)?)),
        PrefetcherKind::None => None,
    };
    Ok(prefetcher)
}
