//! Access Statistics Tests.
//!
//! Verifies the hit/miss counters and the percentage ratio, including the
//! empty-history case where the ratio must be defined rather than a
//! division by zero.

use cachesim_core::stats::AccessStats;
use pretty_assertions::assert_eq;

/// Fresh counters are zero and the ratio of an empty history is 0%.
#[test]
fn fresh_stats_are_zero() {
    let stats = AccessStats::default();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.total(), 0);
    assert_eq!(stats.hit_ratio(), 0.0, "no requests means a 0% ratio");
}

/// The recording helpers bump exactly one counter each.
#[test]
fn record_helpers_increment() {
    let mut stats = AccessStats::default();

    stats.record_hit();
    stats.record_hit();
    stats.record_miss();

    assert_eq!(stats, AccessStats { hits: 2, misses: 1 });
    assert_eq!(stats.total(), 3);
}

/// The ratio is hits over total requests, as a percentage.
#[test]
fn ratio_is_percentage_of_requests() {
    let stats = AccessStats { hits: 3, misses: 1 };
    assert_eq!(stats.hit_ratio(), 75.0);
}

/// An all-hit history is 100%, never more; the divisor is the request
/// count, not the miss count.
#[test]
fn all_hits_ratio_is_one_hundred() {
    let stats = AccessStats { hits: 5, misses: 0 };
    assert_eq!(stats.hit_ratio(), 100.0);
}

/// An all-miss history is 0%.
#[test]
fn all_misses_ratio_is_zero() {
    let stats = AccessStats { hits: 0, misses: 4 };
    assert_eq!(stats.hit_ratio(), 0.0);
}
