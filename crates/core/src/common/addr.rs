//! Address field decomposition.
//!
//! A byte address means nothing to a cache until it is split against that
//! cache's geometry. The split is purely arithmetic:
//! 1. **Offset:** `addr % block_bytes`, the byte position inside a block.
//! 2. **Index:** `(addr / block_bytes) % num_sets`, which set the block maps to.
//! 3. **Tag:** `addr / (block_bytes * num_sets)`, the identity stored in a line.
//!
//! Two caches with different geometries decompose the same address into
//! different fields, which is why the split lives on each [`crate::cache::Cache`]
//! rather than on the address itself.

/// The tag, set index, and block offset of one address under one geometry.
///
/// Concatenating the fields back together (`(tag * num_sets + index) *
/// block_bytes + offset`) recovers the original address exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddrFields {
    /// High-order bits identifying which block occupies a line.
    pub tag: u64,
    /// Which set the address maps to.
    pub index: usize,
    /// Byte position within the block.
    pub offset: usize,
}

impl AddrFields {
    /// Splits `addr` into tag, index, and offset for the given geometry.
    ///
    /// Both `block_bytes` and `num_sets` must be non-zero; callers obtain
    /// them from a validated configuration.
    pub fn split(addr: u64, block_bytes: usize, num_sets: usize) -> Self {
        let block = addr / block_bytes as u64;
        Self {
            tag: block / num_sets as u64,
            index: (block % num_sets as u64) as usize,
            offset: (addr % block_bytes as u64) as usize,
        }
    }

    /// Reconstructs the first byte address of the block these fields name.
    ///
    /// Used when evicting: a line stores only its tag, so the block's home
    /// address must be rebuilt from the tag and the set it sat in.
    pub fn block_addr(tag: u64, index: usize, block_bytes: usize, num_sets: usize) -> u64 {
        (tag * num_sets as u64 + index as u64) * block_bytes as u64
    }
}
