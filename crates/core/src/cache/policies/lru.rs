//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been touched for the
//! longest time. Each line carries a timestamp from a per-cache logical
//! clock that ticks on every install and every hit; the victim is the line
//! with the smallest timestamp.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_*()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug)]
pub struct LruPolicy {
    /// Last-touch timestamp per line, indexed `set * ways + way`.
    stamps: Vec<u64>,
    /// Logical clock; strictly increasing, so timestamps never collide.
    clock: u64,
    /// Number of ways in the cache.
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            stamps: vec![0; sets * ways],
            clock: 0,
            ways,
        }
    }

    fn touch(&mut self, set: usize, way: usize) {
        self.clock += 1;
        self.stamps[set * self.ways + way] = self.clock;
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Stamps the installed line with the current time.
    fn record_insert(&mut self, set: usize, way: usize) {
        self.touch(set, way);
    }

    /// Stamps the hit line with the current time.
    fn record_access(&mut self, set: usize, way: usize) {
        self.touch(set, way);
    }

    /// Returns the way with the oldest timestamp.
    ///
    /// The scan keeps the first minimum it sees, so equal timestamps (only
    /// possible before any activity) resolve to the smallest way index.
    fn select_victim(&mut self, set: usize) -> usize {
        let base = set * self.ways;
        let mut victim = 0;
        for way in 1..self.ways {
            if self.stamps[base + way] < self.stamps[base + victim] {
                victim = way;
            }
        }
        victim
    }
}
