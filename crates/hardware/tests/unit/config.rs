//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, file loading
//! and geometry validation.

use std::io::Write;

use markovpf_core::config::*;
use markovpf_core::{ConfigError, MarkovPrefetcher};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.prefetcher, PrefetcherKind::None);
    assert_eq!(config.markov, MarkovConfig::default());
}

#[test]
fn test_markov_config_defaults() {
    let markov = MarkovConfig::default();
    assert_eq!(markov.degree, 4);
    assert_eq!(markov.num_entries, 256);
    assert_eq!(markov.block_size, 64);
    assert_eq!(markov.page_size, 4096);
    assert!(markov.validate().is_ok());
}

#[test]
fn test_json_partial_uses_defaults() {
    let config = MarkovConfig::from_json(r#"{ "degree": 8, "num_entries": 1024 }"#).unwrap();
    assert_eq!(config.degree, 8);
    assert_eq!(config.num_entries, 1024);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.page_size, 4096);
}

#[test]
fn test_json_empty_object_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_json_root_config() {
    let json = r#"
    {
        "prefetcher": "Markov",
        "markov": {
            "degree": 2,
            "num_entries": 4,
            "block_size": 32,
            "page_size": 8192
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.prefetcher, PrefetcherKind::Markov);
    assert_eq!(
        config.markov,
        MarkovConfig {
            degree: 2,
            num_entries: 4,
            block_size: 32,
            page_size: 8192,
        }
    );
}

#[test]
fn test_json_unknown_field_rejected() {
    let err = MarkovConfig::from_json(r#"{ "degree": 2, "assoc": 4 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_json_unknown_prefetcher_rejected() {
    let err = Config::from_json(r#"{ "prefetcher": "Stride" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_json_invalid_geometry_rejected() {
    let err = MarkovConfig::from_json(r#"{ "degree": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDegree));
}

/// The Markov section is only validated when it is the selected prefetcher.
#[test]
fn test_unselected_markov_section_not_validated() {
    let json = r#"{ "prefetcher": "None", "markov": { "degree": 0 } }"#;
    assert!(Config::from_json(json).is_ok());

    let json = r#"{ "prefetcher": "Markov", "markov": { "degree": 0 } }"#;
    assert!(matches!(
        Config::from_json(json),
        Err(ConfigError::ZeroDegree)
    ));
}

#[rstest]
#[case::zero_degree(0, 16, 64, 4096)]
#[case::zero_entries(2, 0, 64, 4096)]
#[case::entries_not_pow2(2, 12, 64, 4096)]
#[case::block_not_pow2(2, 16, 48, 4096)]
#[case::zero_block(2, 16, 0, 4096)]
#[case::page_not_pow2(2, 16, 64, 3000)]
#[case::page_smaller_than_block(2, 16, 128, 64)]
#[case::slot_count_huge_degree(1 << 61, 1, 64, 4096)]
#[case::slot_count_overflows_product(1 << 40, 1 << 30, 64, 4096)]
#[case::slot_count_above_limit(MAX_TABLE_SLOTS, 2, 64, 4096)]
fn test_invalid_geometry_rejected(
    #[case] degree: usize,
    #[case] num_entries: usize,
    #[case] block_size: u64,
    #[case] page_size: u64,
) {
    let config = MarkovConfig {
        degree,
        num_entries,
        block_size,
        page_size,
    };
    assert!(config.validate().is_err());
    assert!(MarkovPrefetcher::new(config).is_err());
}

#[rstest]
#[case(1, 1, 1, 1)]
#[case(1, 16, 64, 64)]
#[case(8, 4096, 128, 4096)]
#[case(16, 65536, 64, 1 << 21)]
fn test_valid_geometry_accepted(
    #[case] degree: usize,
    #[case] num_entries: usize,
    #[case] block_size: u64,
    #[case] page_size: u64,
) {
    let config = MarkovConfig {
        degree,
        num_entries,
        block_size,
        page_size,
    };
    assert!(config.validate().is_ok());
    let pf = MarkovPrefetcher::new(config).unwrap();
    assert_eq!(pf.table().len(), num_entries);
    assert!(pf.table().entries().all(|e| e.successors().len() == degree));
}

#[test]
fn test_validation_reports_offending_value() {
    let config = MarkovConfig {
        block_size: 48,
        ..MarkovConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BlockSizeNotPowerOfTwo(48))
    ));

    let config = MarkovConfig {
        block_size: 128,
        page_size: 64,
        ..MarkovConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PageSmallerThanBlock {
            page_size: 64,
            block_size: 128
        })
    ));
}

/// A degree that would overflow the table allocation is rejected before allocating.
#[test]
fn test_json_oversized_table_rejected() {
    let json = r#"{ "degree": 2305843009213693952, "num_entries": 1 }"#;
    match MarkovConfig::from_json(json) {
        Err(ConfigError::TableTooLarge {
            degree,
            num_entries: 1,
        }) => assert_eq!(degree, 1 << 61),
        other => panic!("expected TableTooLarge, got {other:?}"),
    }

    let config: MarkovConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(
        MarkovPrefetcher::new(config),
        Err(ConfigError::TableTooLarge { .. })
    ));

    let json = r#"{ "prefetcher": "Markov", "markov": { "degree": 2305843009213693952, "num_entries": 1 } }"#;
    assert!(matches!(
        Config::from_json(json),
        Err(ConfigError::TableTooLarge { .. })
    ));
}

#[test]
fn test_table_at_slot_limit_accepted() {
    let config = MarkovConfig {
        degree: 1,
        num_entries: MAX_TABLE_SLOTS,
        ..MarkovConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "prefetcher": "Markov", "markov": { "degree": 3 } }"#)
        .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.prefetcher, PrefetcherKind::Markov);
    assert_eq!(config.markov.degree, 3);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    match Config::from_file(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}
