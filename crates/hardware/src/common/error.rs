//! Configuration error definitions.
//!
//! The predictor has no runtime failure modes: every address is accepted.
//! The only error class is misconfiguration, caught once when a configuration
//! is loaded or a predictor is constructed. Catching it there keeps the
//! masking arithmetic in the hot path free of checks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a predictor configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The successor list capacity must be at least one.
    #[error("prefetch degree must be at least 1")]
    ZeroDegree,

    /// The table is indexed by masking, so its size must be a power of two.
    #[error("table entry count must be a non-zero power of two, got {0}")]
    EntriesNotPowerOfTwo(usize),

    /// The block mask and index shift are derived from the block size.
    #[error("block size must be a non-zero power of two, got {0} bytes")]
    BlockSizeNotPowerOfTwo(u64),

    /// The page-crossing filter masks addresses by the page size.
    #[error("page size must be a non-zero power of two, got {0} bytes")]
    PageSizeNotPowerOfTwo(u64),

    /// A page must hold at least one whole block.
    #[error("page size ({page_size} bytes) is smaller than block size ({block_size} bytes)")]
    PageSmallerThanBlock {
        /// Configured page size in bytes.
        page_size: u64,
        /// Configured block size in bytes.
        block_size: u64,
    },

    /// The table would exceed the supported number of successor slots.
    #[error("table of {num_entries} entries x {degree} successors exceeds {max} slots", max = crate::config::MAX_TABLE_SLOTS)]
    TableTooLarge {
        /// Configured successor list capacity.
        degree: usize,
        /// Configured entry count.
        num_entries: usize,
    },

    /// The configuration document is not valid JSON for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
