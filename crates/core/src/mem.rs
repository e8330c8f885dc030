//! Main memory implementation.
//!
//! This module provides the flat byte-addressed backing store behind the
//! cache hierarchy. Memory moves data in whole blocks only: the hierarchy
//! fetches a complete block on a miss and writes a complete block back on an
//! eviction, so the accessors here are block-granular. All accesses are
//! bounds-checked; the simulated address space is small enough that a plain
//! `Vec` is the right storage.

/// Flat main memory, divided into equally sized blocks.
///
/// Every byte starts at zero, which is the observable content of any block
/// that has never been written back.
#[derive(Debug, Clone)]
pub struct MainMemory {
    data: Vec<u8>,
    block_bytes: usize,
}

impl MainMemory {
    /// Creates a zero-filled memory of `size_bytes` split into
    /// `size_bytes / block_bytes` blocks.
    ///
    /// Callers construct this from a validated configuration, so both values
    /// are non-zero powers of two and `block_bytes` divides `size_bytes`.
    pub fn new(size_bytes: usize, block_bytes: usize) -> Self {
        debug_assert!(size_bytes.is_power_of_two());
        debug_assert!(block_bytes.is_power_of_two() && block_bytes <= size_bytes);
        Self {
            data: vec![0; size_bytes],
            block_bytes,
        }
    }

    /// Total memory size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the memory holds no bytes. Never the case for a validated
    /// configuration.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Block size in bytes.
    pub fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Number of blocks the memory is divided into.
    pub fn num_blocks(&self) -> usize {
        self.data.len() / self.block_bytes
    }

    /// Byte range of the block containing `addr`.
    fn block_range(&self, addr: u64) -> std::ops::Range<usize> {
        let addr = addr as usize;
        assert!(addr < self.data.len(), "memory access out of bounds");
        let start = addr - (addr % self.block_bytes);
        start..start + self.block_bytes
    }

    /// Returns the whole block containing `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the memory. The CLI rejects out-of-range
    /// addresses before they reach the hierarchy, so this is a programming
    /// error rather than a user error.
    pub fn block(&self, addr: u64) -> &[u8] {
        &self.data[self.block_range(addr)]
    }

    /// Overwrites the whole block containing `addr` with `block`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is outside the memory or `block` is not exactly one
    /// block long.
    pub fn set_block(&mut self, addr: u64, block: &[u8]) {
        assert_eq!(block.len(), self.block_bytes, "memory write size mismatch");
        let range = self.block_range(addr);
        self.data[range].copy_from_slice(block);
    }

    /// Returns the block at flat index `index`, for diagnostic dumps.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_blocks()`.
    pub fn block_at(&self, index: usize) -> &[u8] {
        assert!(index < self.num_blocks(), "memory block index out of bounds");
        let start = index * self.block_bytes;
        &self.data[start..start + self.block_bytes]
    }
}
