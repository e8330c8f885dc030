//! Set-Associative Cache Level.
//!
//! This module implements one level of the cache hierarchy: a configurable
//! set-associative cache whose lines carry full block payloads. It supports
//! pluggable replacement policies (LRU, LFU, FIFO, RAND) and exposes the
//! three operations the hierarchy is built from: a read lookup, a write-hit
//! attempt, and a block install that reports the evicted occupant.
//!
//! A cache level knows nothing about its neighbors. Misses are simply `None`
//! or `false`; deciding what to do about them is the coordinator's job.

/// Cache replacement policy implementations (LRU, LFU, FIFO, RAND).
pub mod policies;

use tracing::debug;

use self::policies::{FifoPolicy, LfuPolicy, LruPolicy, RandPolicy, ReplacementPolicy};
use crate::common::addr::AddrFields;
use crate::config::{CacheParams, ReplacementKind};

/// Cache line entry: a resident block plus the tag identifying it.
///
/// There is no dirty bit. Evicted blocks are always handed back to the
/// coordinator for write-back, clean or not, which keeps eviction behavior
/// identical under both write policies.
#[derive(Debug, Clone)]
pub struct CacheLine {
    tag: u64,
    valid: bool,
    data: Box<[u8]>,
}

impl CacheLine {
    /// An invalid line with a zeroed payload.
    fn empty(block_bytes: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            data: vec![0; block_bytes].into_boxed_slice(),
        }
    }

    /// Whether the line currently holds a block.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The tag of the resident block. Meaningless while the line is invalid.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// The resident block payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A block pushed out of a cache by [`Cache::load`].
///
/// The home address is reconstructed from the victim's tag and set, since
/// lines do not store the addresses they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedBlock {
    /// First byte address of the block in main memory.
    pub addr: u64,
    /// The block contents at the moment of eviction.
    pub data: Box<[u8]>,
}

/// One set-associative cache level with configurable replacement policy.
///
/// Lines are stored in a single flat vector indexed `set * ways + way`.
/// The geometry is fixed at construction from a validated configuration:
/// `num_sets * ways * block_bytes == size_bytes` exactly.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    block_bytes: usize,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
}

impl Cache {
    /// Creates a cache level from the given geometry and policy selection.
    ///
    /// All lines start invalid; the policy state starts empty.
    pub fn new(params: &CacheParams) -> Self {
        let num_lines = params.num_lines();
        let num_sets = params.num_sets();

        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match params.replacement {
            ReplacementKind::Lru => Box::new(LruPolicy::new(num_sets, params.ways)),
            ReplacementKind::Lfu => Box::new(LfuPolicy::new(num_sets, params.ways)),
            ReplacementKind::Fifo => Box::new(FifoPolicy::new(num_sets, params.ways)),
            ReplacementKind::Rand => Box::new(RandPolicy::new(params.ways, params.rng_seed)),
        };

        Self {
            lines: vec![CacheLine::empty(params.block_bytes); num_lines],
            num_sets,
            ways: params.ways,
            block_bytes: params.block_bytes,
            policy,
        }
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity (lines per set).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    pub fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Total number of lines.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// The line at flat index `index` (`set * ways + way`), for diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_lines()`.
    pub fn line(&self, index: usize) -> &CacheLine {
        assert!(index < self.lines.len(), "cache line index out of bounds");
        &self.lines[index]
    }

    /// Splits `addr` into tag, set index, and block offset for this geometry.
    pub fn fields(&self, addr: u64) -> AddrFields {
        AddrFields::split(addr, self.block_bytes, self.num_sets)
    }

    /// Byte offset of `addr` within its block.
    pub fn offset_of(&self, addr: u64) -> usize {
        (addr % self.block_bytes as u64) as usize
    }

    /// Checks whether the block containing `addr` is resident.
    ///
    /// Purely observational: no policy state is touched, so diagnostics and
    /// tests can probe the cache without disturbing replacement order.
    pub fn contains(&self, addr: u64) -> bool {
        let AddrFields { tag, index, .. } = self.fields(addr);
        self.find(tag, index).is_some()
    }

    /// Way index of the valid line holding `tag` in set `index`, if any.
    fn find(&self, tag: u64, index: usize) -> Option<usize> {
        let base = index * self.ways;
        (0..self.ways).find(|&way| {
            let line = &self.lines[base + way];
            line.valid && line.tag == tag
        })
    }

    /// Looks up the block containing `addr`.
    ///
    /// On a hit the replacement policy observes the access and the resident
    /// block is returned. On a miss the cache is left completely untouched
    /// and the caller decides where to turn next.
    pub fn read(&mut self, addr: u64) -> Option<&[u8]> {
        let AddrFields { tag, index, .. } = self.fields(addr);
        let way = self.find(tag, index)?;
        self.policy.record_access(index, way);
        Some(self.lines[index * self.ways + way].data())
    }

    /// Attempts to write one byte into a resident block.
    ///
    /// Returns `true` on a hit, with the byte stored and the access
    /// recorded. Returns `false` on a miss; a write never allocates a line
    /// by itself.
    pub fn write(&mut self, addr: u64, byte: u8) -> bool {
        let AddrFields { tag, index, offset } = self.fields(addr);
        match self.find(tag, index) {
            Some(way) => {
                self.lines[index * self.ways + way].data[offset] = byte;
                self.policy.record_access(index, way);
                true
            }
            None => false,
        }
    }

    /// Installs `block` as the resident copy of the block containing `addr`.
    ///
    /// An invalid way in the target set is filled first. Only when the set
    /// is full does the replacement policy pick a victim; the displaced
    /// block is returned with its reconstructed home address so the caller
    /// can write it back.
    ///
    /// # Panics
    ///
    /// Panics if `block` is not exactly one block long.
    pub fn load(&mut self, addr: u64, block: &[u8]) -> Option<EvictedBlock> {
        assert_eq!(block.len(), self.block_bytes, "cache load size mismatch");
        let AddrFields { tag, index, .. } = self.fields(addr);
        debug_assert!(
            self.find(tag, index).is_none(),
            "load must not duplicate a resident tag"
        );
        let base = index * self.ways;

        let (way, evicted) = match (0..self.ways).find(|&way| !self.lines[base + way].valid) {
            Some(free) => (free, None),
            None => {
                let way = self.policy.select_victim(index);
                let line = &self.lines[base + way];
                let victim_addr =
                    AddrFields::block_addr(line.tag, index, self.block_bytes, self.num_sets);
                debug!(addr, victim_addr, set = index, way, "evicting line");
                (
                    way,
                    Some(EvictedBlock {
                        addr: victim_addr,
                        data: line.data.clone(),
                    }),
                )
            }
        };

        let line = &mut self.lines[base + way];
        line.tag = tag;
        line.valid = true;
        line.data.copy_from_slice(block);
        self.policy.record_insert(index, way);

        evicted
    }
}
