use rand_core::impls::{fill_bytes_via_next, next_u64_via_u32};
use rand_core::le::read_u32_into;
use rand_core::{RngCore, SeedableRng};
use tracing::trace;

use crate::entropy::EntropySource;

/// Jump polynomial equivalent to 2^64 steps.
pub(crate) const JUMP: [u32; 4] = [0x8764000b, 0xf542d2d3, 0x6fa035c3, 0x77f2db5b];

/// Jump polynomial equivalent to 2^96 steps.
pub(crate) const LONG_JUMP: [u32; 4] = [0xb523952e, 0x0b6f099f, 0xccf5a0ef, 0x1c580662];

/// A xoshiro128+ random number generator.
///
/// The xoshiro128+ algorithm is not suitable for cryptographic purposes, but
/// is very fast and has good statistical properties, besides a low linear
/// complexity in the lowest bits. The float mappers in [`crate::range`]
/// discard those bits.
///
/// The algorithm used here is translated from [the `xoshiro128plus.c`
/// reference source code](http://xoshiro.di.unimi.it/xoshiro128plus.c) by
/// David Blackman and Sebastiano Vigna.
///
/// Seeding from a `u64` goes through [`SplitMix32`](super::SplitMix32): the
/// expander is shuffled eight times, then four consecutive draws fill the
/// state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xoshiro128Plus {
    s: [u32; 4],
}

impl Xoshiro128Plus {
    /// Create a generator from raw state words. An all-zero state is a fixed
    /// point of the update, so it is mapped to `seed_from_u64(0)` instead.
    pub fn from_state(state: [u32; 4]) -> Self {
        deal_with_zero_state!(state, Self);
        Self { s: state }
    }

    /// Seed a generator from one value produced by an entropy source.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Self {
        Self::seed_from_u64(u64::from(source.entropy()))
    }

    /// The current state words.
    pub fn state(&self) -> [u32; 4] {
        self.s
    }

    /// Jump forward, equivalently to 2^64 calls to `next_u32()`.
    ///
    /// This can be used to generate 2^64 non-overlapping subsequences for
    /// parallel computations.
    ///
    /// ```
    /// use fast_prng::rand_core::SeedableRng;
    /// use fast_prng::Xoshiro128Plus;
    ///
    /// let rng1 = Xoshiro128Plus::seed_from_u64(0);
    /// let mut rng2 = rng1;
    /// rng2.jump();
    /// let mut rng3 = rng2;
    /// rng3.jump();
    /// ```
    pub fn jump(&mut self) {
        self.jump_by(&JUMP);
    }

    /// Jump forward, equivalently to 2^96 calls to `next_u32()`.
    ///
    /// This can be used to generate 2^32 starting points, from each of which
    /// `jump()` will generate 2^32 non-overlapping subsequences for parallel
    /// distributed computations.
    pub fn long_jump(&mut self) {
        self.jump_by(&LONG_JUMP);
    }

    /// Initializes multiple RNG states such that each state corresponds to a subsequence
    /// separated by `2**64` steps from eachother in the main sequence. This ensures that as long as
    /// no state requests more than `2**64` random numbers, the states are guaranteed to be fully independent.
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[cfg(feature = "std")]
    pub fn initialize_states(seed: u64, num_states: usize) -> Vec<Self> {
        trace!(seed, num_states, "initializing jumped xoshiro128+ states");
        impl_initialize_states!(Self::seed_from_u64(seed), num_states, jump)
    }

    fn jump_by(&mut self, poly: &[u32; 4]) {
        impl_jump!(u32, self, poly);
    }

    #[inline]
    fn step(&mut self) {
        impl_xoshiro_u32!(self.s[0], self.s[1], self.s[2], self.s[3]);
    }
}

impl SeedableRng for Xoshiro128Plus {
    type Seed = [u8; 16];

    /// Create a new `Xoshiro128Plus`.  If `seed` is entirely 0, it will be
    /// mapped to a different seed.
    #[inline]
    fn from_seed(seed: [u8; 16]) -> Xoshiro128Plus {
        let mut state = [0; 4];
        read_u32_into(&seed, &mut state);
        Xoshiro128Plus::from_state(state)
    }

    /// Seed a `Xoshiro128Plus` from the low 32 bits of a `u64` using
    /// `SplitMix32`.
    fn seed_from_u64(seed: u64) -> Xoshiro128Plus {
        trace!(seed, "seeding xoshiro128+ from splitmix32");
        let mut rng = from_splitmix32!(seed);
        // Drawn in index order: s[0] is the first word after the shuffle.
        let state = core::array::from_fn(|_| rng.next_u32());
        Xoshiro128Plus::from_state(state)
    }
}

impl RngCore for Xoshiro128Plus {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let result_plus = self.s[0].wrapping_add(self.s[3]);
        self.step();
        result_plus
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
