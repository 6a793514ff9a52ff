//! Markov Prefetcher.
//!
//! A correlation prefetcher that learns first-order miss transitions: "after a
//! miss on A, the next miss tends to be on B". Each miss does two things in one
//! pass:
//! 1. **Train:** The previous miss's successor list learns the current block
//!    (promote if known, otherwise insert at the front and drop the oldest).
//! 2. **Predict:** The current miss's successor list is read front to back and
//!    every populated, same-page successor becomes a candidate. Priority falls
//!    by one per list position, so the most recent successor is issued first.
//!
//! Table indices are computed from the full miss address while successor lists
//! hold block addresses. A miss repeating the previous miss is ignored.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_miss()` is O(D) where D is the prefetch degree,
//!   independent of the table size.
//! - **Space Complexity:** O(N × D) where N is the number of table entries
//! - **Best Case:** Irregular but recurring miss sequences (pointer chasing, linked lists)
//! - **Worst Case:** Miss streams with no repetition, or heavy index aliasing

use tracing::{debug, trace};

use super::table::{MarkovTable, Update};
use super::{PrefetchCandidate, Prefetcher};
use crate::common::{ConfigError, EMPTY_SLOT, NO_PREVIOUS_MISS, PhysAddr};
use crate::config::MarkovConfig;
use crate::stats::PrefetchStats;

/// Markov Prefetcher state.
///
/// `on_miss` takes `&mut self`; hosts with several miss sources use one
/// instance per stream or serialize calls through a `Mutex`.
#[derive(Clone, Debug)]
pub struct MarkovPrefetcher {
    config: MarkovConfig,
    table: MarkovTable,
    /// Full address of the last miss, or [`NO_PREVIOUS_MISS`].
    previous_miss: u64,
    stats: PrefetchStats,
}

impl MarkovPrefetcher {
    /// Creates a new Markov prefetcher with an empty table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: MarkovConfig) -> Result<Self, ConfigError> {
        let table = MarkovTable::new(&config)?;
        debug!(
            degree = config.degree,
            num_entries = config.num_entries,
            block_size = config.block_size,
            page_size = config.page_size,
            "markov prefetcher table allocated"
        );

        Ok(Self {
            config,
            table,
            previous_miss: NO_PREVIOUS_MISS,
            stats: PrefetchStats::default(),
        })
    }

    /// Handles a cache miss and returns the candidates to prefetch.
    ///
    /// # Arguments
    ///
    /// * `addr` - Full (byte-granular) address of the miss.
    ///
    /// # Returns
    ///
    /// At most `degree` candidates in descending priority order.
    pub fn on_miss(&mut self, addr: u64) -> Vec<PrefetchCandidate> {
        let mut candidates = Vec::with_capacity(self.config.degree);
        let _ = self.on_miss_into(addr, &mut candidates);
        candidates
    }

    /// Handles a cache miss, appending candidates to `out`.
    ///
    /// Returns the number of candidates appended. Existing contents of `out`
    /// are left untouched.
    pub fn on_miss_into(&mut self, addr: u64, out: &mut Vec<PrefetchCandidate>) -> usize {
        if addr == self.previous_miss {
            self.stats.duplicate_misses += 1;
            return 0;
        }
        self.stats.misses += 1;

        let miss = PhysAddr::new(addr);
        let block = miss.block_aligned(self.config.block_size);
        trace!("miss block {:#x}, full addr {:#x}", block.val(), addr);

        if self.previous_miss != NO_PREVIOUS_MISS {
            self.train(block);
        }
        let issued = self.predict(miss, block, out);

        self.previous_miss = addr;
        issued
    }

    /// Records `block` as the newest successor of the previous miss.
    fn train(&mut self, block: PhysAddr) {
        let idx = self.table.index(self.previous_miss);
        let update = self.table.entry_mut(idx).record(block.val());
        self.stats.table_updates += 1;

        match update {
            Update::Promoted { from } => {
                self.stats.promotions += 1;
                trace!(index = idx, from, "promote successor {:#x}", block.val());
            }
            Update::Inserted { evicted } => {
                self.stats.insertions += 1;
                if evicted != EMPTY_SLOT {
                    self.stats.evictions += 1;
                }
                trace!(index = idx, "insert successor {:#x}", block.val());
            }
        }
    }

    /// Walks the current miss's successor list and emits same-page candidates.
    fn predict(
        &mut self,
        miss: PhysAddr,
        block: PhysAddr,
        out: &mut Vec<PrefetchCandidate>,
    ) -> usize {
        let idx = self.table.index(miss.val());
        let degree = self.config.degree;
        let page_size = self.config.page_size;
        let start = out.len();

        for (d, &successor) in self.table.entry(idx).successors().iter().enumerate() {
            if successor == EMPTY_SLOT {
                continue;
            }
            if !PhysAddr::new(successor).same_page(block, page_size) {
                self.stats.span_page += 1;
                trace!(index = idx, "drop {:#x}: crosses page", successor);
                continue;
            }

            let priority = degree - 1 - d;
            out.push(PrefetchCandidate::new(successor, priority));
            trace!("issued address {:#x}, priority {}", successor, priority);
        }

        let issued = out.len() - start;
        self.stats.candidates_issued += issued as u64;
        issued
    }

    /// Returns the configuration the table was built with.
    pub const fn config(&self) -> &MarkovConfig {
        &self.config
    }

    /// Returns the counters collected so far.
    pub const fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    /// Number of candidates suppressed for crossing a page boundary.
    pub const fn span_page(&self) -> u64 {
        self.stats.span_page
    }

    /// Full address of the last miss, or [`NO_PREVIOUS_MISS`] before the first one.
    pub const fn previous_miss(&self) -> u64 {
        self.previous_miss
    }

    /// Returns the table index `addr` maps to.
    pub const fn index_of(&self, addr: u64) -> usize {
        self.table.index(addr)
    }

    /// Returns the successor slots of the entry `addr` maps to, empty slots included.
    pub fn successors(&self, addr: u64) -> &[u64] {
        self.table.entry(self.table.index(addr)).successors()
    }

    /// Returns the underlying prediction table.
    pub const fn table(&self) -> &MarkovTable {
        &self.table
    }
}

impl Prefetcher for MarkovPrefetcher {
    /// Trains and predicts on misses only; hits return no candidates.
    fn observe(&mut self, addr: u64, hit: bool) -> Vec<PrefetchCandidate> {
        if hit {
            return Vec::new();
        }
        self.on_miss(addr)
    }
}
