//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen cache line from the set. Victims
//! come from a seeded xorshift generator, so two runs with the same seed
//! and the same access sequence evict the same lines.

use crate::common::rng::XorShift64;

use super::ReplacementPolicy;

/// Random Policy state.
#[derive(Debug)]
pub struct RandPolicy {
    /// Number of ways in the cache.
    ways: usize,
    /// Deterministic generator for victim selection.
    rng: XorShift64,
}

impl RandPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `seed` - Seed for the victim generator.
    pub fn new(ways: usize, seed: u64) -> Self {
        Self {
            ways,
            rng: XorShift64::new(seed),
        }
    }
}

impl ReplacementPolicy for RandPolicy {
    /// Installation order does not affect random selection.
    fn record_insert(&mut self, _set: usize, _way: usize) {}

    /// Access patterns do not affect random selection.
    fn record_access(&mut self, _set: usize, _way: usize) {}

    /// Draws a way index from the generator.
    fn select_victim(&mut self, _set: usize) -> usize {
        self.rng.next_below(self.ways as u64) as usize
    }
}
