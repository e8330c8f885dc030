//! Simulation statistics collection and reporting.
//!
//! This module tracks the hierarchy-level access counters. It provides:
//! 1. **Counters:** Hits and misses, judged per request rather than per level.
//! 2. **Derived metrics:** Total request count and the hit ratio percentage.
//!
//! A request counts as a single hit if *any* cache level satisfied it and as
//! a single miss otherwise, so `hits + misses` always equals the number of
//! read/write requests issued to the hierarchy.

/// Hit/miss counters for the whole cache hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessStats {
    /// Requests satisfied by L1 or L2.
    pub hits: u64,
    /// Requests no cache level could satisfy.
    pub misses: u64,
}

impl AccessStats {
    /// Counts one request that some cache level satisfied.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts one request that missed in every cache level.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Total number of requests observed.
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit ratio as a percentage in `[0.0, 100.0]`.
    ///
    /// Returns `0.0` before any request has been recorded, so a fresh
    /// simulator reports a 0% ratio rather than dividing by zero.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
