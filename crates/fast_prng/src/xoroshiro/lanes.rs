use rand_core::RngCore;
use tracing::trace;

use super::xoshiro128plus::{JUMP, LONG_JUMP};
use super::Xoshiro128Plus;

/// `W` independent xoshiro128+ generators advanced in lockstep.
///
/// The state is stored as a structure of arrays: `s[k][l]` is state word `k`
/// of lane `l`. One call to [`next_lanes`](Self::next_lanes) applies the same
/// xoshiro128+ step to every lane, which lets the compiler keep each state
/// word of all lanes in a single vector register. Lanes never mix: lane `l`
/// produces exactly the stream that [`lane(l)`](Self::lane) would produce as a
/// scalar generator.
///
/// Lanes must not share a subsequence. [`seed_from_u64`](Self::seed_from_u64)
/// fills every lane from distinct expander draws and
/// [`from_jumped`](Self::from_jumped) separates lanes by `jump()`. Building
/// the block from `W` copies of the same generator gives `W` identical
/// streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneXoshiro128Plus<const W: usize = 4> {
    s: [[u32; W]; 4],
}

impl<const W: usize> LaneXoshiro128Plus<W> {
    /// Seed all lanes from the low 32 bits of `seed` through `SplitMix32`.
    ///
    /// After the eight-step shuffle the expander is drawn `4 * W` times in
    /// state-word-major order: word 0 of lanes `0..W` takes the first `W`
    /// draws, word 1 the next `W`, and so on. Lane 0 therefore starts from
    /// draws `0, W, 2W, 3W`.
    pub fn seed_from_u64(seed: u64) -> Self {
        trace!(seed, lanes = W, "seeding lane-parallel xoshiro128+ from splitmix32");
        let mut rng = from_splitmix32!(seed);
        let s = core::array::from_fn(|_| core::array::from_fn(|_| rng.next_u32()));
        Self::from_words(s)
    }

    /// Pack `W` scalar generators into one block, lane `l` taking `lanes[l]`.
    pub fn from_lanes(lanes: [Xoshiro128Plus; W]) -> Self {
        let s = core::array::from_fn(|k| core::array::from_fn(|l| lanes[l].state()[k]));
        Self { s }
    }

    /// Build a block whose lane `l` is `base` jumped `l` times, so every lane
    /// owns its own 2^64-long subsequence of one stream.
    pub fn from_jumped(base: Xoshiro128Plus) -> Self {
        trace!(lanes = W, "splitting xoshiro128+ stream into jumped lanes");
        let mut cur = base;
        let lanes = core::array::from_fn(|_| {
            let lane = cur;
            cur.jump();
            lane
        });
        Self::from_lanes(lanes)
    }

    /// Extract lane `l` as a scalar generator in its current state.
    ///
    /// # Panics
    ///
    /// Panics if `l >= W`.
    pub fn lane(&self, l: usize) -> Xoshiro128Plus {
        Xoshiro128Plus::from_state(core::array::from_fn(|k| self.s[k][l]))
    }

    /// Number of lanes.
    pub const fn width(&self) -> usize {
        W
    }

    /// Advance every lane once and return one raw word per lane.
    #[inline]
    pub fn next_lanes(&mut self) -> [u32; W] {
        let mut result = [0; W];
        for (l, out) in result.iter_mut().enumerate() {
            *out = self.step_lane(l);
        }
        result
    }

    /// Advance this block and `other` once each and return both batches.
    ///
    /// Equivalent to [`double_next`].
    #[inline]
    pub fn double_next(&mut self, other: &mut Self) -> ([u32; W], [u32; W]) {
        double_next(self, other)
    }

    /// Jump every lane forward, equivalently to 2^64 calls to `next_lanes()`.
    pub fn jump(&mut self) {
        self.jump_by(&JUMP);
    }

    /// Jump every lane forward, equivalently to 2^96 calls to `next_lanes()`.
    pub fn long_jump(&mut self) {
        self.jump_by(&LONG_JUMP);
    }

    /// Initializes `num_blocks` lane blocks from one seed, each block a
    /// `long_jump()` further along every lane's stream than the previous one.
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[cfg(feature = "std")]
    pub fn initialize_states(seed: u64, num_blocks: usize) -> Vec<Self> {
        impl_initialize_states!(Self::seed_from_u64(seed), num_blocks, long_jump)
    }

    fn from_words(s: [[u32; W]; 4]) -> Self {
        let mut block = Self { s };
        // A lane that came out all-zero would be stuck at zero forever. Lane
        // `l` is replaced by the zero-seed stream jumped `l` times, so two
        // replaced lanes never share a subsequence.
        for l in 0..W {
            if (0..4).all(|k| block.s[k][l] == 0) {
                let mut replacement = Xoshiro128Plus::from_state([0; 4]);
                for _ in 0..l {
                    replacement.jump();
                }
                for (k, word) in replacement.state().into_iter().enumerate() {
                    block.s[k][l] = word;
                }
            }
        }
        block
    }

    fn jump_by(&mut self, poly: &[u32; 4]) {
        impl_jump!(lanes, self, poly, W);
    }

    #[inline(always)]
    fn step_lane(&mut self, l: usize) -> u32 {
        let s = &mut self.s;
        let result_plus = s[0][l].wrapping_add(s[3][l]);
        impl_xoshiro_u32!(s[0][l], s[1][l], s[2][l], s[3][l]);
        result_plus
    }
}

/// Advance two independent lane blocks in one pass.
///
/// The two blocks' updates are interleaved lane by lane so their dependency
/// chains overlap. The result is bit-identical to `(a.next_lanes(),
/// b.next_lanes())`.
#[inline]
pub fn double_next<const W: usize>(
    a: &mut LaneXoshiro128Plus<W>,
    b: &mut LaneXoshiro128Plus<W>,
) -> ([u32; W], [u32; W]) {
    let mut ra = [0; W];
    let mut rb = [0; W];
    for l in 0..W {
        ra[l] = a.step_lane(l);
        rb[l] = b.step_lane(l);
    }
    (ra, rb)
}

/// Two independently owned lane blocks advanced together by [`double_next`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePair<const W: usize = 4> {
    first: LaneXoshiro128Plus<W>,
    second: LaneXoshiro128Plus<W>,
}

impl<const W: usize> LanePair<W> {
    /// Pair two blocks. They should come from disjoint seeds or jumps.
    pub fn new(first: LaneXoshiro128Plus<W>, second: LaneXoshiro128Plus<W>) -> Self {
        Self { first, second }
    }

    /// Seed the first block with [`LaneXoshiro128Plus::seed_from_u64`]; the
    /// second block is a copy of it moved one `long_jump()` ahead.
    pub fn seed_from_u64(seed: u64) -> Self {
        let first = LaneXoshiro128Plus::seed_from_u64(seed);
        let mut second = first;
        second.long_jump();
        Self { first, second }
    }

    /// Advance both blocks once.
    #[inline]
    pub fn next_pair(&mut self) -> ([u32; W], [u32; W]) {
        double_next(&mut self.first, &mut self.second)
    }

    /// The first block.
    pub fn first(&self) -> &LaneXoshiro128Plus<W> {
        &self.first
    }

    /// The second block.
    pub fn second(&self) -> &LaneXoshiro128Plus<W> {
        &self.second
    }

    /// Split the pair back into its blocks.
    pub fn into_inner(self) -> (LaneXoshiro128Plus<W>, LaneXoshiro128Plus<W>) {
        (self.first, self.second)
    }
}

// A block is serialized as its `W` lanes, each in the `Xoshiro128Plus` form,
// and deserialized back through the zero-lane guard.
#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{LaneXoshiro128Plus, Xoshiro128Plus};

    impl<const W: usize> Serialize for LaneXoshiro128Plus<W> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq((0..W).map(|l| self.lane(l)))
        }
    }

    struct LanesVisitor<const W: usize>(PhantomData<[(); W]>);

    impl<'de, const W: usize> Visitor<'de> for LanesVisitor<W> {
        type Value = LaneXoshiro128Plus<W>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a sequence of {} xoshiro128+ lanes", W)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut s = [[0u32; W]; 4];
            for l in 0..W {
                let lane: Xoshiro128Plus = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(l, &self))?;
                for (k, word) in lane.state().into_iter().enumerate() {
                    s[k][l] = word;
                }
            }
            if seq.next_element::<IgnoredAny>()?.is_some() {
                return Err(de::Error::invalid_length(W + 1, &self));
            }
            Ok(LaneXoshiro128Plus::from_words(s))
        }
    }

    impl<'de, const W: usize> Deserialize<'de> for LaneXoshiro128Plus<W> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(LanesVisitor::<W>(PhantomData))
        }
    }
}
