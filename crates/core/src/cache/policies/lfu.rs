//! Least Frequently Used (LFU) Replacement Policy.
//!
//! This policy evicts the cache line with the fewest hits since it was
//! installed. A freshly installed line starts at frequency zero; its counter
//! rises only on subsequent hits. Ties are broken by age: among equally
//! frequent lines the one installed earliest is evicted, so a line that just
//! arrived is not immediately thrown out in favor of an equally cold one
//! that has had longer to prove itself.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_*()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Stable working sets with a few hot lines
//! - **Worst Case:** Shifting working sets (old counts pin stale lines)

use super::ReplacementPolicy;

/// LFU Policy state.
#[derive(Debug)]
pub struct LfuPolicy {
    /// Hit count per line since installation, indexed `set * ways + way`.
    freq: Vec<u64>,
    /// Installation sequence number per line, for the age tie-break.
    arrival: Vec<u64>,
    /// Monotonic installation counter.
    next_arrival: u64,
    /// Number of ways in the cache.
    ways: usize,
}

impl LfuPolicy {
    /// Creates a new LFU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            freq: vec![0; sets * ways],
            arrival: vec![0; sets * ways],
            next_arrival: 0,
            ways,
        }
    }
}

impl ReplacementPolicy for LfuPolicy {
    /// Resets the line's frequency and records its arrival order.
    ///
    /// The new occupant must not inherit the hit count of whatever the way
    /// held before.
    fn record_insert(&mut self, set: usize, way: usize) {
        let idx = set * self.ways + way;
        self.freq[idx] = 0;
        self.next_arrival += 1;
        self.arrival[idx] = self.next_arrival;
    }

    /// Bumps the hit counter for the line.
    fn record_access(&mut self, set: usize, way: usize) {
        self.freq[set * self.ways + way] += 1;
    }

    /// Returns the way with the lowest (frequency, arrival) pair.
    ///
    /// Comparing the pair lexicographically gives frequency priority and
    /// falls back to evicting the oldest line among equals.
    fn select_victim(&mut self, set: usize) -> usize {
        let base = set * self.ways;
        let mut victim = 0;
        for way in 1..self.ways {
            let candidate = (self.freq[base + way], self.arrival[base + way]);
            let current = (self.freq[base + victim], self.arrival[base + victim]);
            if candidate < current {
                victim = way;
            }
        }
        victim
    }
}
