//! Configuration System Tests.
//!
//! Verifies default geometry, power-of-two and nesting validation,
//! associativity checks, JSON deserialization with aliases, and
//! file-based loading.

use std::io::Write as _;

use cachesim_core::common::error::ConfigError;
use cachesim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

use crate::common::small_config;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// The out-of-the-box configuration matches the documented baseline and
/// passes its own validation.
#[test]
fn test_default_configuration() {
    let config = SimConfig::default();

    assert_eq!(config.memory_bytes, 65_536);
    assert_eq!(config.l1_bytes, 256);
    assert_eq!(config.l2_bytes, 1024);
    assert_eq!(config.block_bytes, 16);
    assert_eq!(config.ways, 2);
    assert_eq!(config.replacement, ReplacementKind::Lru);
    assert_eq!(config.write_policy, WritePolicy::WriteBack);
    assert_eq!(config.rng_seed, 123_456_789);

    assert!(config.validate().is_ok(), "defaults must validate");
}

/// Derived per-level geometry follows from the byte sizes.
#[test]
fn test_default_derived_geometry() {
    let config = SimConfig::default();

    let l1 = config.l1_params();
    assert_eq!(l1.num_lines(), 16, "256 / 16 lines in L1");
    assert_eq!(l1.num_sets(), 8, "16 lines / 2 ways");

    let l2 = config.l2_params();
    assert_eq!(l2.num_lines(), 64, "1024 / 16 lines in L2");
    assert_eq!(l2.num_sets(), 32, "64 lines / 2 ways");

    assert_eq!(config.num_blocks(), 4096, "65536 / 16 memory blocks");
}

// ══════════════════════════════════════════════════════════
// 2. Power-of-Two Validation
// ══════════════════════════════════════════════════════════

/// Zero is not a power of two, so an empty memory is rejected up front.
#[test]
fn test_zero_size_rejected() {
    let mut config = small_config();
    config.memory_bytes = 0;

    let err = config.validate().expect_err("zero memory must be rejected");
    assert!(matches!(
        err,
        ConfigError::NotPowerOfTwo { name: "memory_bytes", value: 0 }
    ));
}

/// A 12-byte block cannot be decomposed with shifts and masks.
#[test]
fn test_non_power_of_two_block_rejected() {
    let mut config = small_config();
    config.block_bytes = 12;

    let err = config.validate().expect_err("12-byte blocks must be rejected");
    assert!(matches!(
        err,
        ConfigError::NotPowerOfTwo { name: "block_bytes", value: 12 }
    ));
}

/// Associativity is held to the same power-of-two rule as the sizes.
#[test]
fn test_non_power_of_two_ways_rejected() {
    let mut config = small_config();
    config.ways = 3;

    let err = config.validate().expect_err("3-way must be rejected");
    assert!(matches!(err, ConfigError::NotPowerOfTwo { name: "ways", value: 3 }));
}

/// Every power-of-two associativity up to the L1 line count is accepted,
/// from direct-mapped through fully associative.
#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
fn test_power_of_two_ways_accepted(#[case] ways: usize) {
    let mut config = small_config();
    config.ways = ways;

    assert!(config.validate().is_ok(), "{ways}-way should validate");
}

// ══════════════════════════════════════════════════════════
// 3. Size Nesting
// ══════════════════════════════════════════════════════════

/// A block must fit inside the L1 cache.
#[test]
fn test_block_larger_than_l1_rejected() {
    let mut config = small_config();
    config.block_bytes = 128;

    let err = config.validate().expect_err("oversized block must be rejected");
    assert!(matches!(
        err,
        ConfigError::SizeOrdering { inner: "block_bytes", outer: "l1_bytes", .. }
    ));
}

/// L1 must fit inside L2.
#[test]
fn test_l1_larger_than_l2_rejected() {
    let mut config = small_config();
    config.l1_bytes = 512;

    let err = config.validate().expect_err("L1 > L2 must be rejected");
    assert!(matches!(
        err,
        ConfigError::SizeOrdering { inner: "l1_bytes", outer: "l2_bytes", .. }
    ));
}

/// L2 must fit inside main memory.
#[test]
fn test_l2_larger_than_memory_rejected() {
    let mut config = small_config();
    config.l2_bytes = 2048;

    let err = config.validate().expect_err("L2 > memory must be rejected");
    assert!(matches!(
        err,
        ConfigError::SizeOrdering { inner: "l2_bytes", outer: "memory_bytes", .. }
    ));
}

/// The nesting is non-strict: equal level sizes are legal.
#[test]
fn test_equal_level_sizes_allowed() {
    let mut config = small_config();
    config.l1_bytes = 256;
    config.l2_bytes = 256;

    assert!(config.validate().is_ok(), "L1 == L2 should validate");
}

// ══════════════════════════════════════════════════════════
// 4. Associativity Limits
// ══════════════════════════════════════════════════════════

/// A cache cannot have more ways per set than it has lines in total.
#[test]
fn test_ways_exceeding_l1_lines_rejected() {
    let mut config = small_config();
    config.ways = 16;

    let err = config.validate().expect_err("16-way 8-line L1 must be rejected");
    assert!(matches!(
        err,
        ConfigError::WaysExceedLines { cache: "L1", lines: 8, ways: 16 }
    ));
}

/// `ways == num_lines` collapses the cache to a single fully associative set.
#[test]
fn test_fully_associative_l1_allowed() {
    let mut config = small_config();
    config.ways = 8;

    assert!(config.validate().is_ok(), "fully associative L1 should validate");
    assert_eq!(config.l1_params().num_sets(), 1);
}

// ══════════════════════════════════════════════════════════
// 5. Deserialization
// ══════════════════════════════════════════════════════════

/// An empty JSON object produces the documented defaults.
#[test]
fn test_empty_json_gives_defaults() {
    let config: SimConfig = serde_json::from_str("{}").expect("empty object parses");

    assert_eq!(config.memory_bytes, 65_536);
    assert_eq!(config.block_bytes, 16);
    assert_eq!(config.replacement, ReplacementKind::Lru);
    assert_eq!(config.write_policy, WritePolicy::WriteBack);
}

/// Replacement policies parse from their canonical uppercase names and
/// the accepted aliases.
#[test]
fn test_replacement_policy_spellings() {
    let cases = [
        (r#"{"replacement": "LRU"}"#, ReplacementKind::Lru),
        (r#"{"replacement": "LFU"}"#, ReplacementKind::Lfu),
        (r#"{"replacement": "FIFO"}"#, ReplacementKind::Fifo),
        (r#"{"replacement": "RAND"}"#, ReplacementKind::Rand),
        (r#"{"replacement": "RANDOM"}"#, ReplacementKind::Rand),
        (r#"{"replacement": "Fifo"}"#, ReplacementKind::Fifo),
    ];
    for (json, expected) in cases {
        let config: SimConfig = serde_json::from_str(json).expect("policy parses");
        assert_eq!(config.replacement, expected, "from {json}");
    }
}

/// Write policies parse from the short WB/WT forms and the long aliases.
#[test]
fn test_write_policy_spellings() {
    let cases = [
        (r#"{"write_policy": "WB"}"#, WritePolicy::WriteBack),
        (r#"{"write_policy": "WT"}"#, WritePolicy::WriteThrough),
        (r#"{"write_policy": "WriteBack"}"#, WritePolicy::WriteBack),
        (r#"{"write_policy": "write-through"}"#, WritePolicy::WriteThrough),
    ];
    for (json, expected) in cases {
        let config: SimConfig = serde_json::from_str(json).expect("policy parses");
        assert_eq!(config.write_policy, expected, "from {json}");
    }
}

/// Unknown policy names are a parse error, not a silent default.
#[test]
fn test_unknown_replacement_rejected() {
    let result = serde_json::from_str::<SimConfig>(r#"{"replacement": "MRU"}"#);
    assert!(result.is_err(), "MRU is not a supported policy");
}

// ══════════════════════════════════════════════════════════
// 6. File Loading
// ══════════════════════════════════════════════════════════

/// A well-formed file loads, validates, and fills omitted fields with
/// defaults.
#[test]
fn test_config_file_round_trip() {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(
        br#"{
            "memory_bytes": 512,
            "l1_bytes": 64,
            "l2_bytes": 128,
            "block_bytes": 8,
            "replacement": "FIFO"
        }"#,
    )
    .expect("write temp config");

    let config = SimConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(config.memory_bytes, 512);
    assert_eq!(config.l1_bytes, 64);
    assert_eq!(config.l2_bytes, 128);
    assert_eq!(config.block_bytes, 8);
    assert_eq!(config.replacement, ReplacementKind::Fifo);
    assert_eq!(config.ways, 2, "omitted fields fall back to defaults");
}

/// Malformed JSON surfaces as a parse error.
#[test]
fn test_config_file_rejects_bad_json() {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(b"memory_bytes = 512").expect("write temp config");

    let err = SimConfig::from_json_file(file.path()).expect_err("TOML is not JSON");
    assert!(matches!(err, ConfigError::Parse(_)));
}

/// A file that parses but violates the geometry rules is still rejected.
#[test]
fn test_config_file_rejects_bad_geometry() {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(br#"{"l1_bytes": 4096, "l2_bytes": 1024}"#)
        .expect("write temp config");

    let err = SimConfig::from_json_file(file.path()).expect_err("L1 > L2 must fail");
    assert!(matches!(err, ConfigError::SizeOrdering { .. }));
}

/// A missing file is an I/O error, reported before any parsing.
#[test]
fn test_config_file_missing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = SimConfig::from_json_file(dir.path().join("absent.json"))
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}
