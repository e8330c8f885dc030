//! Two-level cache hierarchy simulator library.
//!
//! This crate implements an educational L1/L2 cache simulator with the following:
//! 1. **Memory:** Flat, zero-initialized main memory moved in whole blocks.
//! 2. **Cache:** Set-associative levels with pluggable replacement policies
//!    (LRU, LFU, FIFO, RAND).
//! 3. **Hierarchy:** Probe ordering, block movement, write-back/write-through
//!    propagation, and per-request hit/miss accounting.
//! 4. **Configuration:** Validated power-of-two geometry, loadable from JSON.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::{CacheHierarchy, SimConfig};
//!
//! let mut sim = CacheHierarchy::new(&SimConfig::default()).unwrap();
//! sim.write(64, 0xAB);
//! assert_eq!(sim.read(64), 0xAB);
//! assert_eq!(sim.stats().total(), 2);
//! ```

/// Set-associative cache level and replacement policies.
pub mod cache;
/// Common types (address fields, errors, deterministic RNG).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// The two-level coordination protocol.
pub mod hierarchy;
/// Flat block-granular main memory.
pub mod mem;
/// Hit/miss accounting.
pub mod stats;

/// Per-request access counters; read them via `CacheHierarchy::stats`.
pub use crate::stats::AccessStats;
/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Top-level simulator; construct with `CacheHierarchy::new`.
pub use crate::hierarchy::CacheHierarchy;
