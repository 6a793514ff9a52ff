//! Markov miss-address prefetcher library.
//!
//! This crate implements a first-order Markov prefetcher for cache hierarchy
//! simulators with the following:
//! 1. **Prefetch:** The prediction table, its update rule, candidate generation,
//!    and the `Prefetcher` trait a cache model drives.
//! 2. **Configuration:** Table geometry with defaults, JSON loading and validation.
//! 3. **Statistics:** Training and issue counters, including page-crossing suppressions.
//!
//! ```
//! use markovpf_core::{MarkovConfig, MarkovPrefetcher};
//!
//! let config = MarkovConfig { degree: 2, num_entries: 4, ..MarkovConfig::default() };
//! let mut pf = MarkovPrefetcher::new(config).unwrap();
//!
//! assert!(pf.on_miss(0x100).is_empty());
//! assert!(pf.on_miss(0x140).is_empty());
//! let candidates = pf.on_miss(0x100);
//! assert_eq!(candidates.len(), 1);
//! assert_eq!((candidates[0].addr, candidates[0].priority), (0x140, 1));
//! ```

/// Common types and constants (addresses, sentinels, errors).
pub mod common;
/// Predictor configuration (defaults and JSON loading).
pub mod config;
/// Prefetcher trait and the Markov prefetcher.
pub mod prefetch;
/// Prefetcher statistics collection and reporting.
pub mod stats;

/// Configuration error returned by loading and construction.
pub use crate::common::ConfigError;
/// Markov table geometry; use `MarkovConfig::default()` or deserialize from JSON.
pub use crate::config::{Config, MarkovConfig};
/// Main prefetcher type and the trait hosts drive it through.
pub use crate::prefetch::{MarkovPrefetcher, PrefetchCandidate, Prefetcher};
/// Counters exposed by the prefetcher.
pub use crate::stats::PrefetchStats;
