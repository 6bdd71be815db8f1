use rand_core::impls::{fill_bytes_via_next, next_u64_via_u32};
use rand_core::{RngCore, SeedableRng};

/// A splitmix32 random number generator.
///
/// The splitmix algorithm is not suitable for cryptographic purposes, but is
/// very fast and has a 32 bit state. It is used here only to expand a single
/// seed word into the larger state of the xoshiro generators.
///
/// Every call adds the golden-ratio constant to the state and returns the
/// state passed through two xor-shift/multiply rounds. It is a total function
/// of the seed, zero included.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix32 {
    x: u32,
}

const PHI: u32 = 0x9e3779b9;

/// Number of outputs discarded by [`SplitMix32::shuffle`].
pub const SHUFFLE_ROUNDS: usize = 8;

impl SplitMix32 {
    /// Create a new `SplitMix32` with the accumulator set to `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { x: seed }
    }

    /// Advance the accumulator [`SHUFFLE_ROUNDS`] times without emitting.
    ///
    /// Generators call this before drawing their state so the first words
    /// they use are decorrelated from the raw seed.
    pub fn shuffle(&mut self) {
        for _ in 0..SHUFFLE_ROUNDS {
            self.next_u32();
        }
    }
}

impl RngCore for SplitMix32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.x = self.x.wrapping_add(PHI);
        let mut z = self.x;
        z = (z ^ (z >> 16)).wrapping_mul(0x21f0aaad);
        z = (z ^ (z >> 15)).wrapping_mul(0x735a2d97);
        z ^ (z >> 15)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        next_u64_via_u32(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_next(self, dest);
    }
}

impl SeedableRng for SplitMix32 {
    type Seed = [u8; 4];

    /// Create a new `SplitMix32` from a little-endian seed word.
    fn from_seed(seed: [u8; 4]) -> SplitMix32 {
        SplitMix32::new(u32::from_le_bytes(seed))
    }

    /// Seed a `SplitMix32` from the low 32 bits of a `u64`.
    fn seed_from_u64(seed: u64) -> SplitMix32 {
        SplitMix32::new(seed as u32)
    }
}
