//! Markov Prediction Table.
//!
//! A direct-mapped array of successor lists. Each entry records the block
//! addresses that were seen to miss right after a miss mapping to that entry,
//! most recently confirmed first.
//!
//! Entries are untagged: two addresses that hash to the same index share (and
//! overwrite) one successor list. Successor lists are fixed-size slices that
//! are rotated in place, so the table never allocates after construction.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `index()`: O(1)
//!   - `TableEntry::record()`: O(D) where D is the prefetch degree
//! - **Space Complexity:** O(N × D) where N is the number of entries

use crate::common::{ConfigError, EMPTY_SLOT};
use crate::config::MarkovConfig;

/// Outcome of recording a successor in a [`TableEntry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// The successor was already present and moved to the front.
    Promoted {
        /// Position the successor occupied before the move.
        from: usize,
    },
    /// The successor was new and took the front slot.
    Inserted {
        /// Value of the slot pushed off the end ([`EMPTY_SLOT`] if it was unpopulated).
        evicted: u64,
    },
}

/// A single successor list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableEntry {
    /// Index 0 is the most recently confirmed successor.
    successors: Box<[u64]>,
}

impl TableEntry {
    /// Creates an entry with `degree` empty slots.
    pub fn new(degree: usize) -> Self {
        Self {
            successors: vec![EMPTY_SLOT; degree].into_boxed_slice(),
        }
    }

    /// Returns every slot in recency order, empty slots included.
    pub fn successors(&self) -> &[u64] {
        &self.successors
    }

    /// Returns the number of populated slots.
    pub fn occupancy(&self) -> usize {
        self.successors.iter().filter(|&&s| s != EMPTY_SLOT).count()
    }

    /// Records `block` as the most recent successor.
    ///
    /// A successor already in the list moves to the front and the slots ahead
    /// of it shift back by one. Otherwise the last slot is dropped and `block`
    /// is inserted at the front.
    pub fn record(&mut self, block: u64) -> Update {
        if let Some(pos) = self.successors.iter().position(|&s| s == block) {
            self.successors[..=pos].rotate_right(1);
            return Update::Promoted { from: pos };
        }

        let evicted = self.successors.last().copied().unwrap_or(EMPTY_SLOT);
        self.successors.rotate_right(1);
        if let Some(front) = self.successors.first_mut() {
            *front = block;
        }
        Update::Inserted { evicted }
    }
}

/// The prediction table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovTable {
    entries: Box<[TableEntry]>,
    /// `num_entries - 1`.
    index_mask: u64,
    /// `log2(block_size)`.
    block_shift: u32,
}

impl MarkovTable {
    /// Allocates a table for the given geometry with every slot empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry fails validation.
    pub fn new(config: &MarkovConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            entries: vec![TableEntry::new(config.degree); config.num_entries].into_boxed_slice(),
            index_mask: config.num_entries as u64 - 1,
            block_shift: config.block_size.trailing_zeros(),
        })
    }

    /// Maps an address to its entry index.
    ///
    /// The index is taken from the bits just above the block offset, so the
    /// full miss address and its block address select the same entry.
    #[inline(always)]
    pub const fn index(&self, addr: u64) -> usize {
        ((addr >> self.block_shift) & self.index_mask) as usize
    }

    /// Returns the entry at `idx`, or `None` if `idx` is out of range.
    pub fn get(&self, idx: usize) -> Option<&TableEntry> {
        self.entries.get(idx)
    }

    /// Entry lookup for indices produced by [`MarkovTable::index`].
    pub(crate) fn entry(&self, idx: usize) -> &TableEntry {
        &self.entries[idx]
    }

    /// Mutable entry lookup for indices produced by [`MarkovTable::index`].
    pub(crate) fn entry_mut(&mut self, idx: usize) -> &mut TableEntry {
        &mut self.entries[idx]
    }

    /// Iterates over all entries in index order.
    pub fn entries(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries (never the case for a validated geometry).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
