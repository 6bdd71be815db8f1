//! Samplers pairing a generator with a range mapper.
//!
//! Each sampler owns its generator by value and holds the bounds next to it.
//! Bounds can be rebound with `set_bounds` without touching the generator,
//! and `sample_in` draws against other bounds once, so one stream can feed
//! several differently scaled outputs without reseeding.

use rand_core::{RngCore, SeedableRng};
use tracing::debug;

use crate::error::RangeError;
use crate::range::{reduced_f32_lanes, FloatRange, IntRange};
use crate::xoroshiro::{LaneXoshiro128Plus, Xoshiro128Plus};

/// Uniform `i32` values in `[low, high]` from a 32-bit generator.
///
/// [`sample`](Self::sample) uses the modulo mapping of [`IntRange::map`]
/// and inherits its bias; [`sample_unbiased`](Self::sample_unbiased) is the
/// rejection-sampling alternative.
#[derive(Debug, Clone)]
pub struct UniformInt32<R = Xoshiro128Plus> {
    rng: R,
    range: IntRange,
}

impl UniformInt32<Xoshiro128Plus> {
    /// A sampler over a fresh [`Xoshiro128Plus`] seeded from `seed`.
    pub fn seed_from_u64(low: i32, high: i32, seed: u64) -> Result<Self, RangeError> {
        Self::new(Xoshiro128Plus::seed_from_u64(seed), low, high)
    }
}

impl<R: RngCore> UniformInt32<R> {
    /// Pair `rng` with the bounds `[low, high]`.
    pub fn new(rng: R, low: i32, high: i32) -> Result<Self, RangeError> {
        Ok(Self::with_range(rng, IntRange::new(low, high)?))
    }

    /// Pair `rng` with an already validated range.
    pub fn with_range(rng: R, range: IntRange) -> Self {
        Self { rng, range }
    }

    /// Replace the bounds, keeping the generator where it is. On error the
    /// previous bounds stay in effect.
    pub fn set_bounds(&mut self, low: i32, high: i32) -> Result<(), RangeError> {
        self.range = IntRange::new(low, high)?;
        debug!(low, high, "rebound integer sampler");
        Ok(())
    }

    /// The current bounds.
    pub fn range(&self) -> &IntRange {
        &self.range
    }

    /// One modulo-mapped value from one generator word.
    #[inline]
    pub fn sample(&mut self) -> i32 {
        self.range.map(self.rng.next_u32())
    }

    /// One unbiased value; may consume several generator words.
    pub fn sample_unbiased(&mut self) -> i32 {
        self.range.sample_unbiased(&mut self.rng)
    }

    /// One modulo-mapped value in `range` instead of the bound range.
    #[inline]
    pub fn sample_in(&mut self, range: &IntRange) -> i32 {
        range.map(self.rng.next_u32())
    }

    /// The generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Give the generator back.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// Uniform `f32` values in `[low, high)` from a 32-bit generator.
///
/// [`sample`](Self::sample) uses the reduced-float strategy and
/// [`sample_scaled`](Self::sample_scaled) the scaled-integer strategy of
/// [`FloatRange`]. They produce different values from the same word.
#[derive(Debug, Clone)]
pub struct UniformFloat32<R = Xoshiro128Plus> {
    rng: R,
    range: FloatRange,
}

impl UniformFloat32<Xoshiro128Plus> {
    /// A sampler over a fresh [`Xoshiro128Plus`] seeded from `seed`.
    pub fn seed_from_u64(low: f32, high: f32, seed: u64) -> Result<Self, RangeError> {
        Self::new(Xoshiro128Plus::seed_from_u64(seed), low, high)
    }
}

impl<R: RngCore> UniformFloat32<R> {
    /// Pair `rng` with the bounds `[low, high)`.
    pub fn new(rng: R, low: f32, high: f32) -> Result<Self, RangeError> {
        Ok(Self::with_range(rng, FloatRange::new(low, high)?))
    }

    /// Pair `rng` with an already validated range.
    pub fn with_range(rng: R, range: FloatRange) -> Self {
        Self { rng, range }
    }

    /// Replace the bounds, keeping the generator where it is. On error the
    /// previous bounds stay in effect.
    pub fn set_bounds(&mut self, low: f32, high: f32) -> Result<(), RangeError> {
        self.range = FloatRange::new(low, high)?;
        debug!(low, high, "rebound float sampler");
        Ok(())
    }

    /// The current bounds.
    pub fn range(&self) -> &FloatRange {
        &self.range
    }

    /// A float in `[0, 1)` regardless of the bounds.
    #[inline]
    pub fn sample_reduced(&mut self) -> f32 {
        crate::range::reduced_f32(self.rng.next_u32())
    }

    /// One value with the reduced-float strategy.
    #[inline]
    pub fn sample(&mut self) -> f32 {
        self.range.map_reduced(self.rng.next_u32())
    }

    /// One value with the scaled-integer strategy.
    #[inline]
    pub fn sample_scaled(&mut self) -> f32 {
        self.range.map_scaled(self.rng.next_u32())
    }

    /// One reduced-float value in `range` instead of the bound range.
    #[inline]
    pub fn sample_in(&mut self, range: &FloatRange) -> f32 {
        range.map_reduced(self.rng.next_u32())
    }

    /// One scaled-integer value in `range` instead of the bound range.
    #[inline]
    pub fn sample_scaled_in(&mut self, range: &FloatRange) -> f32 {
        range.map_scaled(self.rng.next_u32())
    }

    /// The generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Give the generator back.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// `W` uniform `i32` values in `[low, high]` per call, one per lane.
///
/// There is no unbiased variant: rejection would desynchronise the lanes.
#[derive(Debug, Clone)]
pub struct LaneUniformInt32<const W: usize = 4> {
    rng: LaneXoshiro128Plus<W>,
    range: IntRange,
}

impl<const W: usize> LaneUniformInt32<W> {
    /// A sampler over a fresh lane block seeded from `seed`.
    pub fn seed_from_u64(low: i32, high: i32, seed: u64) -> Result<Self, RangeError> {
        Self::new(LaneXoshiro128Plus::seed_from_u64(seed), low, high)
    }

    /// Pair a lane block with the bounds `[low, high]`.
    pub fn new(rng: LaneXoshiro128Plus<W>, low: i32, high: i32) -> Result<Self, RangeError> {
        Ok(Self {
            rng,
            range: IntRange::new(low, high)?,
        })
    }

    /// Replace the bounds, keeping the generator where it is. On error the
    /// previous bounds stay in effect.
    pub fn set_bounds(&mut self, low: i32, high: i32) -> Result<(), RangeError> {
        self.range = IntRange::new(low, high)?;
        debug!(low, high, lanes = W, "rebound lane integer sampler");
        Ok(())
    }

    /// The current bounds.
    pub fn range(&self) -> &IntRange {
        &self.range
    }

    /// One modulo-mapped value per lane.
    #[inline]
    pub fn sample(&mut self) -> [i32; W] {
        self.range.map_lanes(self.rng.next_lanes())
    }

    /// One modulo-mapped value per lane in `range` instead of the bound range.
    #[inline]
    pub fn sample_in(&mut self, range: &IntRange) -> [i32; W] {
        range.map_lanes(self.rng.next_lanes())
    }

    /// The generator.
    pub fn rng_mut(&mut self) -> &mut LaneXoshiro128Plus<W> {
        &mut self.rng
    }

    /// Give the generator back.
    pub fn into_inner(self) -> LaneXoshiro128Plus<W> {
        self.rng
    }
}

/// `W` uniform `f32` values in `[low, high)` per call, one per lane.
#[derive(Debug, Clone)]
pub struct LaneUniformFloat32<const W: usize = 4> {
    rng: LaneXoshiro128Plus<W>,
    range: FloatRange,
}

impl<const W: usize> LaneUniformFloat32<W> {
    /// A sampler over a fresh lane block seeded from `seed`.
    pub fn seed_from_u64(low: f32, high: f32, seed: u64) -> Result<Self, RangeError> {
        Self::new(LaneXoshiro128Plus::seed_from_u64(seed), low, high)
    }

    /// Pair a lane block with the bounds `[low, high)`.
    pub fn new(rng: LaneXoshiro128Plus<W>, low: f32, high: f32) -> Result<Self, RangeError> {
        Ok(Self {
            rng,
            range: FloatRange::new(low, high)?,
        })
    }

    /// Replace the bounds, keeping the generator where it is. On error the
    /// previous bounds stay in effect.
    pub fn set_bounds(&mut self, low: f32, high: f32) -> Result<(), RangeError> {
        self.range = FloatRange::new(low, high)?;
        debug!(low, high, lanes = W, "rebound lane float sampler");
        Ok(())
    }

    /// The current bounds.
    pub fn range(&self) -> &FloatRange {
        &self.range
    }

    /// A float in `[0, 1)` per lane regardless of the bounds.
    #[inline]
    pub fn sample_reduced(&mut self) -> [f32; W] {
        reduced_f32_lanes(self.rng.next_lanes())
    }

    /// One reduced-float value per lane.
    #[inline]
    pub fn sample(&mut self) -> [f32; W] {
        self.range.map_reduced_lanes(self.rng.next_lanes())
    }

    /// One scaled-integer value per lane.
    #[inline]
    pub fn sample_scaled(&mut self) -> [f32; W] {
        self.range.map_scaled_lanes(self.rng.next_lanes())
    }

    /// One reduced-float value per lane in `range` instead of the bound range.
    #[inline]
    pub fn sample_in(&mut self, range: &FloatRange) -> [f32; W] {
        range.map_reduced_lanes(self.rng.next_lanes())
    }

    /// One scaled-integer value per lane in `range` instead of the bound range.
    #[inline]
    pub fn sample_scaled_in(&mut self, range: &FloatRange) -> [f32; W] {
        range.map_scaled_lanes(self.rng.next_lanes())
    }

    /// Advance this sampler's block and `other` together and map both
    /// batches with the bound range (reduced-float strategy).
    ///
    /// Identical to calling [`sample`](Self::sample) and then mapping
    /// `other.next_lanes()` with the same range.
    #[inline]
    pub fn double_sample(&mut self, other: &mut LaneXoshiro128Plus<W>) -> ([f32; W], [f32; W]) {
        let (a, b) = self.rng.double_next(other);
        (
            self.range.map_reduced_lanes(a),
            self.range.map_reduced_lanes(b),
        )
    }

    /// The generator.
    pub fn rng_mut(&mut self) -> &mut LaneXoshiro128Plus<W> {
        &mut self.rng
    }

    /// Give the generator back.
    pub fn into_inner(self) -> LaneXoshiro128Plus<W> {
        self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_sampler_is_range_over_words() {
        let mut sampler = UniformInt32::seed_from_u64(1, 100, 1230).unwrap();
        let mut words = Xoshiro128Plus::seed_from_u64(1230);
        for _ in 0..100 {
            assert_eq!(sampler.sample(), 1 + (words.next_u32() % 100) as i32);
        }
        // 2456054672 % 100 == 72
        let mut golden = UniformInt32::seed_from_u64(1, 100, 1230).unwrap();
        assert_eq!(golden.sample(), 73);
    }

    #[test]
    fn failed_rebind_keeps_bounds() {
        let mut sampler = UniformInt32::seed_from_u64(0, 9, 1).unwrap();
        assert_eq!(
            sampler.set_bounds(3, 2),
            Err(RangeError::InvertedInt { low: 3, high: 2 })
        );
        assert_eq!(sampler.range(), &IntRange::new(0, 9).unwrap());

        let mut floats = UniformFloat32::seed_from_u64(0.0, 1.0, 1).unwrap();
        assert!(floats.set_bounds(1.0, 1.0).is_err());
        assert_eq!(floats.range(), &FloatRange::new(0.0, 1.0).unwrap());
    }

    #[test]
    fn constructors_report_bad_bounds() {
        assert!(UniformInt32::seed_from_u64(10, -10, 0).is_err());
        assert!(UniformFloat32::seed_from_u64(2.75, 2.5, 0).is_err());
        assert!(LaneUniformInt32::<4>::seed_from_u64(1, 0, 0).is_err());
        assert!(LaneUniformFloat32::<4>::seed_from_u64(0.0, f32::NAN, 0).is_err());
    }

    #[test]
    fn rebinding_does_not_reseed() {
        let mut sampler = UniformFloat32::seed_from_u64(0.0, 1.0, 1230).unwrap();
        let first = sampler.sample();
        sampler.set_bounds(-10_000.0, 10_000.0).unwrap();
        let second = sampler.sample();

        let mut words = Xoshiro128Plus::seed_from_u64(1230);
        assert_eq!(first, crate::range::reduced_f32(words.next_u32()));
        let expected = FloatRange::new(-10_000.0, 10_000.0)
            .unwrap()
            .map_reduced(words.next_u32());
        assert_eq!(second, expected);
    }

    #[test]
    fn sample_in_shares_the_stream() {
        let narrow = FloatRange::new(2.5, 2.75).unwrap();
        let wide = FloatRange::new(-50_000.0, 50_000.0).unwrap();
        let mut sampler = UniformFloat32::seed_from_u64(-10_000.0, 10_000.0, 2000).unwrap();
        let mut words = Xoshiro128Plus::seed_from_u64(2000);

        assert_eq!(sampler.sample_in(&narrow), narrow.map_reduced(words.next_u32()));
        assert_eq!(sampler.sample_scaled_in(&wide), wide.map_scaled(words.next_u32()));
        let bound = *sampler.range();
        assert_eq!(sampler.sample_scaled(), bound.map_scaled(words.next_u32()));
        assert_eq!(sampler.into_inner(), words);
    }

    #[test]
    fn lane_int_sampler_maps_each_lane() {
        let mut sampler = LaneUniformInt32::<4>::seed_from_u64(1, 100, 1230).unwrap();
        // First lane batch of seed 1230.
        let words = [918215971u32, 305952800, 1631685462, 2692367655];
        assert_eq!(sampler.sample(), words.map(|w| 1 + (w % 100) as i32));
    }

    #[test]
    fn lane_float_double_sample_matches_separate_blocks() {
        let mut sampler = LaneUniformFloat32::<4>::seed_from_u64(2.5, 2.75, 1230).unwrap();
        let mut other = LaneXoshiro128Plus::<4>::seed_from_u64(1231);

        let mut reference = LaneUniformFloat32::<4>::seed_from_u64(2.5, 2.75, 1230).unwrap();
        let mut other_ref = other;
        let range = *reference.range();

        for _ in 0..50 {
            let (a, b) = sampler.double_sample(&mut other);
            assert_eq!(a, reference.sample());
            assert_eq!(b, range.map_reduced_lanes(other_ref.next_lanes()));
        }
    }

    #[test]
    fn lane_float_values_stay_in_bounds() {
        let mut sampler = LaneUniformFloat32::<4>::seed_from_u64(2.5, 2.75, 1230).unwrap();
        for _ in 0..2_500 {
            for x in sampler.sample().into_iter().chain(sampler.sample_scaled()) {
                assert!((2.5..2.75).contains(&x), "{x}");
            }
        }
        for x in sampler.sample_reduced() {
            assert!((0.0..1.0).contains(&x));
        }
    }
}
