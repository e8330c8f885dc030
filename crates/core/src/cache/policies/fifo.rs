//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the cache line that has been resident longest,
//! regardless of how recently or how often it was hit. Each line records
//! the order in which it arrived; hits deliberately leave that order
//! untouched, which is the property separating FIFO from LRU.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record_*()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads that keep re-hitting their oldest lines

use super::ReplacementPolicy;

/// FIFO Policy state.
#[derive(Debug)]
pub struct FifoPolicy {
    /// Arrival sequence number per line, indexed `set * ways + way`.
    arrival: Vec<u64>,
    /// Monotonic installation counter.
    next_arrival: u64,
    /// Number of ways in the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            arrival: vec![0; sets * ways],
            next_arrival: 0,
            ways,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Records the installed line's position in the arrival order.
    fn record_insert(&mut self, set: usize, way: usize) {
        self.next_arrival += 1;
        self.arrival[set * self.ways + way] = self.next_arrival;
    }

    /// Hits do not reorder the queue.
    fn record_access(&mut self, _set: usize, _way: usize) {}

    /// Returns the way with the earliest arrival.
    ///
    /// Arrival numbers are unique, so no tie-break is needed.
    fn select_victim(&mut self, set: usize) -> usize {
        let base = set * self.ways;
        let mut victim = 0;
        for way in 1..self.ways {
            if self.arrival[base + way] < self.arrival[base + victim] {
                victim = way;
            }
        }
        victim
    }
}
