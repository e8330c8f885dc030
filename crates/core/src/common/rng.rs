//! Deterministic pseudo-random number generation.
//!
//! Every source of randomness in the simulator (RAND victim selection and the
//! CLI's bulk access generators) draws from this xorshift generator so that a
//! given seed always reproduces the same run.

/// A 64-bit xorshift pseudo-random number generator.
///
/// Small, fast, and deterministic. Statistical quality is more than enough
/// for victim selection and synthetic access streams; this is not a
/// cryptographic generator and must never be used as one.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from a seed.
    ///
    /// Zero is a fixed point of the xorshift transform, so a zero seed is
    /// remapped to an arbitrary non-zero constant.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x5DEE_CE66 } else { seed },
        }
    }

    /// Advances the generator and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a value in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be non-zero");
        self.next_u64() % bound
    }
}
