//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in set-associative
//! caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Lfu`: Least Frequently Used.
//! - `Fifo`: First-In, First-Out.
//! - `Rand`: Seeded random selection.
//!
//! Policies observe two distinct events: a line being *installed* (a block
//! brought in by a miss) and a line being *accessed* (a read or write hit).
//! FIFO cares only about installation order, LFU counts accesses separately
//! from installs, and LRU treats both the same, so the trait keeps the two
//! events apart.

use std::fmt::Debug;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Frequently Used replacement policy.
pub mod lfu;

/// Least Recently Used replacement policy.
pub mod lru;

/// Seeded random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for recording line usage and selecting victims.
/// All per-line bookkeeping (timestamps, counters, arrival order) lives in
/// the policy, not in the cache lines themselves.
pub trait ReplacementPolicy: Send + Sync + Debug {
    /// Records that a new line was installed into `way` of `set`.
    ///
    /// Called on every fill, whether the way was previously invalid or has
    /// just been vacated by an eviction. Any history the policy held for
    /// that way belongs to the old occupant and must be superseded.
    fn record_insert(&mut self, set: usize, way: usize);

    /// Records a read or write hit on `way` of `set`.
    fn record_access(&mut self, set: usize, way: usize);

    /// Selects the way to evict from a full `set`.
    ///
    /// Only called when every way in the set is valid; the cache fills
    /// invalid ways directly without consulting the policy.
    fn select_victim(&mut self, set: usize) -> usize;
}
