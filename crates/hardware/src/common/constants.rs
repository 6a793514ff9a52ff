//! Global Predictor Constants.
//!
//! This module defines constants shared across the predictor. It includes:
//! 1. **Memory Constants:** Default page size used for the page-crossing filter.
//! 2. **Sentinels:** Reserved address values marking empty table slots and the
//!    absence of a previous miss.

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u64 = 4096;

/// Value held by an unpopulated successor slot.
///
/// Block address 0 is therefore never emitted as a prefetch candidate.
pub const EMPTY_SLOT: u64 = 0;

/// Value of the previous-miss register before the first miss is observed.
pub const NO_PREVIOUS_MISS: u64 = 0;
