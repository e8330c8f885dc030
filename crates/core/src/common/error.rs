//! Configuration error types.
//!
//! Geometry problems are rejected before any simulator state is built.
//! Once a [`crate::hierarchy::CacheHierarchy`] exists, every parameter it
//! holds has already passed validation, so the access paths never need to
//! re-check them.

use thiserror::Error;

/// Rejections raised while loading or validating a simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size or associativity parameter is not a power of two.
    ///
    /// Power-of-two geometry keeps address decomposition exact; a zero value
    /// also lands here since zero is not a power of two.
    #[error("{name} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Which parameter was rejected.
        name: &'static str,
        /// The offending value.
        value: usize,
    },

    /// The size ordering `block <= L1 <= L2 <= memory` is violated.
    #[error("{inner} ({inner_bytes} bytes) does not fit in {outer} ({outer_bytes} bytes)")]
    SizeOrdering {
        /// The smaller component of the violated pair.
        inner: &'static str,
        /// Its configured size in bytes.
        inner_bytes: usize,
        /// The larger component of the violated pair.
        outer: &'static str,
        /// Its configured size in bytes.
        outer_bytes: usize,
    },

    /// A cache has fewer lines than the requested associativity.
    #[error("{cache} holds {lines} lines and cannot be {ways}-way associative")]
    WaysExceedLines {
        /// Which cache level was rejected.
        cache: &'static str,
        /// Total lines in that cache (size / block size).
        lines: usize,
        /// The requested ways per set.
        ways: usize,
    },

    /// A configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid JSON for [`crate::config::SimConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
