//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline geometry (memory, L1, L2, block size, ways).
//! 2. **Structures:** The root [`SimConfig`] and the per-level [`CacheParams`].
//! 3. **Enums:** Replacement policy and write propagation policy selectors.
//! 4. **Validation:** Power-of-two and nesting checks, run before any state
//!    is allocated.
//!
//! Configuration is supplied via JSON (`SimConfig::from_json_file`) or built
//! directly by the CLI from command-line arguments.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline geometry when not explicitly overridden
/// in a JSON configuration file. All sizes are powers of two and nest as
/// `block <= L1 <= L2 <= memory`.
mod defaults {
    /// Main memory size in bytes (64 KiB, 4096 blocks).
    pub const MEMORY_BYTES: usize = 65_536;

    /// L1 cache size in bytes (16 lines at the default block size).
    pub const L1_BYTES: usize = 256;

    /// L2 cache size in bytes (64 lines at the default block size).
    pub const L2_BYTES: usize = 1024;

    /// Block size in bytes.
    ///
    /// Blocks are the unit of every transfer between memory and the caches;
    /// both cache levels share this size.
    pub const BLOCK_BYTES: usize = 16;

    /// Associativity (lines per set) shared by both cache levels.
    pub const WAYS: usize = 2;

    /// Seed for RAND victim selection and the CLI's bulk access generators.
    pub const RNG_SEED: u64 = 123_456_789;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict when a
/// new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementKind {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last access is furthest in the past.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Least Frequently Used replacement policy.
    ///
    /// Evicts the line with the fewest recorded hits, breaking ties toward
    /// the line that has been resident longest.
    #[serde(alias = "Lfu")]
    Lfu,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was installed earliest; hits do not refresh a
    /// line's position in the queue.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen line, driven by the deterministic seeded
    /// generator so runs stay reproducible.
    #[serde(alias = "Rand", alias = "RANDOM")]
    Rand,
}

/// Write propagation policy for the whole hierarchy.
///
/// Decides when a CPU write becomes visible in main memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WritePolicy {
    /// Defer memory updates until a dirty block is evicted.
    ///
    /// Writes land in the caches only; main memory is brought up to date by
    /// the write-back performed when the holding line is evicted.
    #[default]
    #[serde(rename = "WB", alias = "WriteBack", alias = "write-back")]
    WriteBack,
    /// Propagate every write to main memory immediately.
    ///
    /// The backing block is patched on every write, hit or miss, so memory
    /// never lags the caches.
    #[serde(rename = "WT", alias = "WriteThrough", alias = "write-through")]
    WriteThrough,
}

/// Geometry and policy for a single cache level.
///
/// Derived from [`SimConfig`]; the two levels differ only in total size.
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// Total cache size in bytes.
    pub size_bytes: usize,
    /// Block (line payload) size in bytes.
    pub block_bytes: usize,
    /// Associativity (lines per set).
    pub ways: usize,
    /// Victim selection algorithm.
    pub replacement: ReplacementKind,
    /// Seed for the RAND policy's generator.
    pub rng_seed: u64,
}

impl CacheParams {
    /// Total number of lines in the cache.
    pub fn num_lines(&self) -> usize {
        self.size_bytes / self.block_bytes
    }

    /// Number of sets (lines divided by associativity).
    pub fn num_sets(&self) -> usize {
        self.num_lines() / self.ways
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.block_bytes, 16);
/// ```
///
/// Deserializing from JSON, with omitted fields falling back to defaults:
///
/// ```
/// use cachesim_core::config::{ReplacementKind, SimConfig, WritePolicy};
///
/// let json = r#"{
///     "memory_bytes": 1024,
///     "l1_bytes": 64,
///     "l2_bytes": 128,
///     "block_bytes": 8,
///     "replacement": "LFU",
///     "write_policy": "WT"
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.replacement, ReplacementKind::Lfu);
/// assert_eq!(config.write_policy, WritePolicy::WriteThrough);
/// assert_eq!(config.ways, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Main memory size in bytes (power of two)
    #[serde(default = "SimConfig::default_memory_bytes")]
    pub memory_bytes: usize,

    /// L1 cache size in bytes (power of two)
    #[serde(default = "SimConfig::default_l1_bytes")]
    pub l1_bytes: usize,

    /// L2 cache size in bytes (power of two)
    #[serde(default = "SimConfig::default_l2_bytes")]
    pub l2_bytes: usize,

    /// Block size in bytes, shared by memory and both caches (power of two)
    #[serde(default = "SimConfig::default_block_bytes")]
    pub block_bytes: usize,

    /// Associativity for both cache levels (power of two; 1 = direct-mapped)
    #[serde(default = "SimConfig::default_ways")]
    pub ways: usize,

    /// Victim selection algorithm for both cache levels
    #[serde(default)]
    pub replacement: ReplacementKind,

    /// When writes become visible in main memory
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Seed for RAND victim selection and bulk access generation
    #[serde(default = "SimConfig::default_rng_seed")]
    pub rng_seed: u64,
}

impl SimConfig {
    /// Returns the default main memory size in bytes.
    fn default_memory_bytes() -> usize {
        defaults::MEMORY_BYTES
    }

    /// Returns the default L1 cache size in bytes.
    fn default_l1_bytes() -> usize {
        defaults::L1_BYTES
    }

    /// Returns the default L2 cache size in bytes.
    fn default_l2_bytes() -> usize {
        defaults::L2_BYTES
    }

    /// Returns the default block size in bytes.
    fn default_block_bytes() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Returns the default associativity (lines per set).
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default generator seed.
    fn default_rng_seed() -> u64 {
        defaults::RNG_SEED
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON for this structure,
    /// or a validation error if the geometry is rejected.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the geometry invariants.
    ///
    /// 1. Every size and the associativity is a non-zero power of two.
    /// 2. Sizes nest: `block <= L1 <= L2 <= memory`.
    /// 3. Each cache has at least `ways` lines, so sets divide evenly.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            ("memory_bytes", self.memory_bytes),
            ("l1_bytes", self.l1_bytes),
            ("l2_bytes", self.l2_bytes),
            ("block_bytes", self.block_bytes),
            ("ways", self.ways),
        ];
        for (name, value) in params {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { name, value });
            }
        }

        let nesting = [
            ("block_bytes", self.block_bytes, "l1_bytes", self.l1_bytes),
            ("l1_bytes", self.l1_bytes, "l2_bytes", self.l2_bytes),
            ("l2_bytes", self.l2_bytes, "memory_bytes", self.memory_bytes),
        ];
        for (inner, inner_bytes, outer, outer_bytes) in nesting {
            if inner_bytes > outer_bytes {
                return Err(ConfigError::SizeOrdering {
                    inner,
                    inner_bytes,
                    outer,
                    outer_bytes,
                });
            }
        }

        for (cache, bytes) in [("L1", self.l1_bytes), ("L2", self.l2_bytes)] {
            let lines = bytes / self.block_bytes;
            if self.ways > lines {
                return Err(ConfigError::WaysExceedLines {
                    cache,
                    lines,
                    ways: self.ways,
                });
            }
        }

        Ok(())
    }

    /// Geometry and policy for the L1 cache.
    pub fn l1_params(&self) -> CacheParams {
        CacheParams {
            size_bytes: self.l1_bytes,
            block_bytes: self.block_bytes,
            ways: self.ways,
            replacement: self.replacement,
            rng_seed: self.rng_seed,
        }
    }

    /// Geometry and policy for the L2 cache.
    pub fn l2_params(&self) -> CacheParams {
        CacheParams {
            size_bytes: self.l2_bytes,
            block_bytes: self.block_bytes,
            ways: self.ways,
            replacement: self.replacement,
            rng_seed: self.rng_seed,
        }
    }

    /// Number of blocks main memory is divided into.
    pub fn num_blocks(&self) -> usize {
        self.memory_bytes / self.block_bytes
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_bytes: defaults::MEMORY_BYTES,
            l1_bytes: defaults::L1_BYTES,
            l2_bytes: defaults::L2_BYTES,
            block_bytes: defaults::BLOCK_BYTES,
            ways: defaults::WAYS,
            replacement: ReplacementKind::default(),
            write_policy: WritePolicy::default(),
            rng_seed: defaults::RNG_SEED,
        }
    }
}
