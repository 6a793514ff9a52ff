//! Configuration system for the Markov prefetcher.
//!
//! This module defines the structures used to parameterize the predictor. It provides:
//! 1. **Defaults:** Baseline table geometry (degree, entry count, block and page size).
//! 2. **Structures:** The Markov table configuration and a root configuration that
//!    selects which prefetcher a host cache should build.
//! 3. **Loading:** JSON parsing from strings and files, with validation.
//!
//! Configuration is supplied as JSON by the host simulator, or use `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the predictor.
///
/// These values define the baseline table geometry when not explicitly
/// overridden in a JSON configuration document.
mod defaults {
    /// Default successor list capacity (4 predictions per miss).
    pub const DEGREE: usize = 4;

    /// Default number of table entries.
    pub const NUM_ENTRIES: usize = 256;

    /// Default cache block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const BLOCK_SIZE: u64 = 64;

    /// Default page size in bytes, used by the page-crossing filter.
    pub const PAGE_SIZE: u64 = crate::common::PAGE_SIZE;
}

/// Largest accepted table, in successor slots (`degree * num_entries`).
///
/// 2^26 slots of 8 bytes is 512 MiB of table storage.
pub const MAX_TABLE_SLOTS: usize = 1 << 26;

/// Hardware prefetcher types a host cache may instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetcherKind {
    /// No prefetching enabled.
    #[default]
    None,
    /// First-order Markov miss-address prefetcher.
    Markov,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use markovpf_core::config::{Config, PrefetcherKind};
///
/// let json = r#"{ "prefetcher": "Markov", "markov": { "degree": 2 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.prefetcher, PrefetcherKind::Markov);
/// assert_eq!(config.markov.degree, 2);
/// assert_eq!(config.markov.num_entries, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which prefetcher to build.
    #[serde(default)]
    pub prefetcher: PrefetcherKind,
    /// Markov table geometry (ignored unless `prefetcher` is `Markov`).
    #[serde(default)]
    pub markov: MarkovConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and a
    /// geometry error if the selected prefetcher's parameters are invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validates the parameters of the selected prefetcher.
    ///
    /// # Errors
    ///
    /// Returns the first geometry violation found.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self.prefetcher {
            PrefetcherKind::None => Ok(()),
            PrefetcherKind::Markov => self.markov.validate(),
        }
    }
}

/// Markov prediction table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkovConfig {
    /// Successor list capacity per entry; also the maximum candidates per miss.
    #[serde(default = "MarkovConfig::default_degree")]
    pub degree: usize,
    /// Number of table entries (power of two).
    #[serde(default = "MarkovConfig::default_num_entries")]
    pub num_entries: usize,
    /// Cache block size in bytes (power of two).
    #[serde(default = "MarkovConfig::default_block_size")]
    pub block_size: u64,
    /// Page size in bytes (power of two); candidates never cross a page.
    #[serde(default = "MarkovConfig::default_page_size")]
    pub page_size: u64,
}

impl MarkovConfig {
    /// Returns the default prefetch degree.
    const fn default_degree() -> usize {
        defaults::DEGREE
    }

    /// Returns the default table entry count.
    const fn default_num_entries() -> usize {
        defaults::NUM_ENTRIES
    }

    /// Returns the default block size.
    const fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default page size.
    const fn default_page_size() -> u64 {
        defaults::PAGE_SIZE
    }

    /// Parses and validates a Markov table configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, or
    /// a geometry error from [`MarkovConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the geometry supports the masking arithmetic.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroDegree`] if `degree` is 0.
    /// * [`ConfigError::EntriesNotPowerOfTwo`] if `num_entries` is not a power of two.
    /// * [`ConfigError::BlockSizeNotPowerOfTwo`] if `block_size` is not a power of two.
    /// * [`ConfigError::PageSizeNotPowerOfTwo`] if `page_size` is not a power of two.
    /// * [`ConfigError::PageSmallerThanBlock`] if a page cannot hold a block.
    /// * [`ConfigError::TableTooLarge`] if `degree * num_entries` exceeds [`MAX_TABLE_SLOTS`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.degree == 0 {
            return Err(ConfigError::ZeroDegree);
        }
        if !self.num_entries.is_power_of_two() {
            return Err(ConfigError::EntriesNotPowerOfTwo(self.num_entries));
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.block_size));
        }
        if !self.page_size.is_power_of_two() {
            return Err(ConfigError::PageSizeNotPowerOfTwo(self.page_size));
        }
        match self.degree.checked_mul(self.num_entries) {
            Some(slots) if slots <= MAX_TABLE_SLOTS => {}
            _ => {
                return Err(ConfigError::TableTooLarge {
                    degree: self.degree,
                    num_entries: self.num_entries,
                });
            }
        }
        if self.page_size < self.block_size {
            return Err(ConfigError::PageSmallerThanBlock {
                page_size: self.page_size,
                block_size: self.block_size,
            });
        }
        Ok(())
    }
}

impl Default for MarkovConfig {
    fn default() -> Self {
        Self {
            degree: defaults::DEGREE,
            num_entries: defaults::NUM_ENTRIES,
            block_size: defaults::BLOCK_SIZE,
            page_size: defaults::PAGE_SIZE,
        }
    }
}
