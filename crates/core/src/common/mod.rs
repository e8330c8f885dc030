//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Address Fields:** Tag/index/offset decomposition of byte addresses.
//! 2. **Error Handling:** Configuration validation and load errors.
//! 3. **Randomness:** The deterministic generator behind RAND replacement.

/// Address field decomposition under a cache geometry.
pub mod addr;

/// Configuration error types.
pub mod error;

/// Deterministic pseudo-random number generation.
pub mod rng;

pub use addr::AddrFields;
pub use error::ConfigError;
pub use rng::XorShift64;
