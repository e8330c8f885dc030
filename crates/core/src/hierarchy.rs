//! Two-Level Cache Hierarchy Coordination.
//!
//! This module owns the protocol that ties the pieces together: an L1 and an
//! L2 cache in front of a flat main memory, with hit/miss accounting per
//! request. The levels themselves are deliberately dumb; every decision
//! about probe order, block movement, and write propagation is made here.
//!
//! Two properties of the protocol are worth calling out:
//! 1. **No promotion.** A read satisfied by L2 does not copy the block up
//!    into L1. Only a full miss, which fetches from memory, fills both
//!    levels.
//! 2. **Unconditional write-back.** Lines carry no dirty bit, so every
//!    evicted block is written back to memory whether it was modified or
//!    not. Clean write-backs store identical bytes and are invisible.

use tracing::{debug, trace};

use crate::cache::{Cache, EvictedBlock};
use crate::common::error::ConfigError;
use crate::config::{SimConfig, WritePolicy};
use crate::mem::MainMemory;
use crate::stats::AccessStats;

/// The complete simulated memory system: two cache levels, main memory,
/// the write policy, and the access counters.
///
/// Construction validates the configuration, so a `CacheHierarchy` that
/// exists is always internally consistent. All state changes go through
/// [`read`](Self::read) and [`write`](Self::write); everything else is
/// read-only inspection.
#[derive(Debug)]
pub struct CacheHierarchy {
    l1: Cache,
    l2: Cache,
    memory: MainMemory,
    write_policy: WritePolicy,
    stats: AccessStats,
}

impl CacheHierarchy {
    /// Validates `config` and builds the hierarchy it describes.
    ///
    /// Memory starts zero-filled and both caches start empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry fails validation; no
    /// partially built state is ever observable.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            l1: Cache::new(&config.l1_params()),
            l2: Cache::new(&config.l2_params()),
            memory: MainMemory::new(config.memory_bytes, config.block_bytes),
            write_policy: config.write_policy,
            stats: AccessStats::default(),
        })
    }

    /// The L1 cache, for inspection and diagnostic dumps.
    pub fn l1(&self) -> &Cache {
        &self.l1
    }

    /// The L2 cache, for inspection and diagnostic dumps.
    pub fn l2(&self) -> &Cache {
        &self.l2
    }

    /// Main memory, for inspection and diagnostic dumps.
    pub fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// The configured write propagation policy.
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// The accumulated hit/miss counters.
    pub fn stats(&self) -> AccessStats {
        self.stats
    }

    /// Reads the byte at `addr` through the hierarchy.
    ///
    /// Probes L1 first and stops there on a hit. Otherwise probes L2 and
    /// stops there on a hit, leaving L1 alone. Only when both levels miss
    /// is the block fetched from memory and installed into L2 and then L1;
    /// the byte is then served from the freshly filled L1, and any blocks
    /// evicted by the fills are written back to memory.
    ///
    /// Each call counts exactly one hit or one miss.
    ///
    /// # Panics
    ///
    /// Panics if `addr` lies outside main memory. Callers are expected to
    /// range-check user-supplied addresses first.
    pub fn read(&mut self, addr: u64) -> u8 {
        let offset = self.l1.offset_of(addr);

        if let Some(block) = self.l1.read(addr) {
            let byte = block[offset];
            self.stats.record_hit();
            trace!(addr, byte, "read hit in L1");
            return byte;
        }

        if let Some(block) = self.l2.read(addr) {
            let byte = block[offset];
            self.stats.record_hit();
            trace!(addr, byte, "read hit in L2");
            return byte;
        }

        debug!(addr, "read miss in both levels, fetching from memory");
        let block = self.memory.block(addr).to_vec();
        let l2_victim = self.l2.load(addr, &block);
        let l1_victim = self.l1.load(addr, &block);
        self.stats.record_miss();
        self.flush_victim(l1_victim);
        self.flush_victim(l2_victim);

        // The fill above installed the block into L1, so this lookup hits
        // and records the access with L1's replacement policy.
        let byte = self.l1.read(addr).map(|data| data[offset]);
        byte.expect("block resident in L1 immediately after load")
    }

    /// Writes `byte` at `addr` through the hierarchy.
    ///
    /// Both levels attempt the write-hit independently; a request that hits
    /// in either level counts as one hit, otherwise as one miss. What
    /// happens next depends on the write policy:
    ///
    /// - **Write-through:** the backing block in memory is patched with the
    ///   byte on every request, so memory never goes stale.
    /// - **Write-back:** a hit stays in the caches and memory goes stale
    ///   until eviction. A full miss allocates the block into L2 only,
    ///   writes the byte there, and flushes whatever that allocation
    ///   evicted.
    ///
    /// # Panics
    ///
    /// Panics if `addr` lies outside main memory. Callers are expected to
    /// range-check user-supplied addresses first.
    pub fn write(&mut self, addr: u64, byte: u8) {
        let l1_hit = self.l1.write(addr, byte);
        let l2_hit = self.l2.write(addr, byte);
        if l1_hit || l2_hit {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        trace!(addr, byte, l1_hit, l2_hit, "write");

        match self.write_policy {
            WritePolicy::WriteThrough => {
                let offset = self.l1.offset_of(addr);
                let mut block = self.memory.block(addr).to_vec();
                block[offset] = byte;
                self.memory.set_block(addr, &block);
            }
            WritePolicy::WriteBack => {
                if !l1_hit && !l2_hit {
                    debug!(addr, "write miss in both levels, allocating into L2");
                    let block = self.memory.block(addr).to_vec();
                    let victim = self.l2.load(addr, &block);
                    let stored = self.l2.write(addr, byte);
                    debug_assert!(stored, "block resident in L2 immediately after load");
                    self.flush_victim(victim);
                }
            }
        }
    }

    /// Writes an evicted block back to its home address in memory.
    ///
    /// Applied to every eviction regardless of write policy; see the module
    /// docs on unconditional write-back.
    fn flush_victim(&mut self, victim: Option<EvictedBlock>) {
        if let Some(block) = victim {
            debug!(victim_addr = block.addr, "writing evicted block back to memory");
            self.memory.set_block(block.addr, &block.data);
        }
    }
}
