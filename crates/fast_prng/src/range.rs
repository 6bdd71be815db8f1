//! Stateless transforms from raw 32-bit generator words to uniform values.
//!
//! The mappers here hold only validated bounds and the constants derived
//! from them; they never own a generator. See [`crate::uniform`] for
//! samplers that pair a mapper with a generator.

use rand_core::RngCore;
use tracing::debug;

use crate::config::{FloatBounds, IntBounds};
use crate::error::RangeError;

/// Bit pattern of `1.0f32`: sign 0, biased exponent 127, mantissa 0.
const ONE_BITS: u32 = 127 << 23;

/// Map a raw word to a float in `[0, 1)` by bit reinterpretation.
///
/// The top 23 bits of `word` become the mantissa of a float in `[1, 2)`,
/// and `1.0` is subtracted. The low 9 bits are discarded, which is where
/// xoshiro128+ is weakest. The result has 23 bits of precision and is
/// uniform over the 2^23 values it can take.
#[inline]
pub fn reduced_f32(word: u32) -> f32 {
    f32::from_bits(ONE_BITS | (word >> 9)) - 1.0
}

/// Map each lane of a raw batch through [`reduced_f32`].
#[inline]
pub fn reduced_f32_lanes<const W: usize>(words: [u32; W]) -> [f32; W] {
    words.map(reduced_f32)
}

/// Inclusive integer bounds `[low, high]` with the span precomputed.
///
/// [`map`](Self::map) is `low + word % (high - low + 1)`. Unless the span is
/// a power of two that modulo is biased: the first `2^32 % span` values of
/// the range are one draw more likely than the rest. For a span of
/// `3 * 2^30` the low third of the range comes up twice as often. Use
/// [`sample_unbiased`](Self::sample_unbiased) when that matters; it draws a
/// different sequence.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "IntBounds", into = "IntBounds")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    low: i32,
    high: i32,
    // high - low + 1 modulo 2^32; 0 means the full 2^32 values.
    span: u32,
}

impl IntRange {
    /// Validate `low <= high` and precompute the span.
    pub fn new(low: i32, high: i32) -> Result<Self, RangeError> {
        if low > high {
            debug!(low, high, "rejected inverted integer bounds");
            return Err(RangeError::InvertedInt { low, high });
        }
        let span = (high.wrapping_sub(low) as u32).wrapping_add(1);
        Ok(Self { low, high, span })
    }

    /// Lower bound, inclusive.
    pub fn low(&self) -> i32 {
        self.low
    }

    /// Upper bound, inclusive.
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Whether the modulo mapping is free of bias, i.e. the number of values
    /// in the range divides 2^32.
    pub fn is_exact(&self) -> bool {
        self.span == 0 || self.span.is_power_of_two()
    }

    /// Map a raw word into the range with the modulo method.
    #[inline]
    pub fn map(&self, word: u32) -> i32 {
        let offset = if self.span == 0 {
            word
        } else {
            word % self.span
        };
        self.low.wrapping_add(offset as i32)
    }

    /// Map each lane of a raw batch with [`map`](Self::map).
    #[inline]
    pub fn map_lanes<const W: usize>(&self, words: [u32; W]) -> [i32; W] {
        words.map(|w| self.map(w))
    }

    /// Draw from `rng` until a word falls in the largest multiple of the span
    /// below 2^32, then map it. Every value of the range is equally likely.
    ///
    /// This consumes a variable number of words, so it does not reproduce the
    /// sequence of [`map`](Self::map) even where both accept the same word.
    pub fn sample_unbiased<R: RngCore + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.is_exact() {
            return self.map(rng.next_u32());
        }
        // 2^32 mod span: words below this belong to the incomplete last cycle.
        let threshold = self.span.wrapping_neg() % self.span;
        loop {
            let word = rng.next_u32();
            if word >= threshold {
                return self.map(word);
            }
        }
    }
}

impl TryFrom<IntBounds> for IntRange {
    type Error = RangeError;

    fn try_from(bounds: IntBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.low, bounds.high)
    }
}

impl From<IntRange> for IntBounds {
    fn from(range: IntRange) -> Self {
        IntBounds {
            low: range.low,
            high: range.high,
        }
    }
}

/// Half-open float bounds `[low, high)` with `d = high - low` and
/// `k = d / u32::MAX` precomputed.
///
/// Two mapping strategies are offered and they round differently, so they
/// are never interchanged behind the caller's back:
///
/// - [`map_reduced`](Self::map_reduced): `low + d * reduced_f32(word)`.
///   23 bits of precision, low bits of the word discarded.
/// - [`map_scaled`](Self::map_scaled): `low + k * (word as f32)`. Uses the
///   whole word through an integer-to-float conversion.
///
/// In both, a result that rounds up to `high` is replaced by the largest
/// float below `high`, keeping every output inside `[low, high)`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FloatBounds", into = "FloatBounds")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    low: f32,
    high: f32,
    width: f32,
    scale: f32,
    // largest float strictly below `high`
    ceiling: f32,
}

impl FloatRange {
    /// Validate `low < high` with both finite and precompute the constants.
    pub fn new(low: f32, high: f32) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            debug!(low, high, "rejected non-finite float bounds");
            return Err(RangeError::NonFinite { low, high });
        }
        if low > high {
            debug!(low, high, "rejected inverted float bounds");
            return Err(RangeError::InvertedFloat { low, high });
        }
        if low == high {
            debug!(bound = low, "rejected empty float range");
            return Err(RangeError::EmptyFloat { bound: low });
        }
        let width = high - low;
        if !width.is_finite() {
            debug!(low, high, "rejected float range wider than f32::MAX");
            return Err(RangeError::NonFinite { low, high });
        }
        Ok(Self {
            low,
            high,
            width,
            scale: width / u32::MAX as f32,
            ceiling: next_below(high),
        })
    }

    /// Lower bound, inclusive.
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Upper bound, exclusive.
    pub fn high(&self) -> f32 {
        self.high
    }

    /// `high - low`.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// `width / u32::MAX`, the factor used by [`map_scaled`](Self::map_scaled).
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Map a raw word with the reduced-float strategy.
    #[inline]
    pub fn map_reduced(&self, word: u32) -> f32 {
        (self.low + self.width * reduced_f32(word)).min(self.ceiling)
    }

    /// Map a raw word with the scaled-integer strategy.
    #[inline]
    pub fn map_scaled(&self, word: u32) -> f32 {
        (self.low + self.scale * word as f32).min(self.ceiling)
    }

    /// Map each lane of a raw batch with [`map_reduced`](Self::map_reduced).
    #[inline]
    pub fn map_reduced_lanes<const W: usize>(&self, words: [u32; W]) -> [f32; W] {
        words.map(|w| self.map_reduced(w))
    }

    /// Map each lane of a raw batch with [`map_scaled`](Self::map_scaled).
    #[inline]
    pub fn map_scaled_lanes<const W: usize>(&self, words: [u32; W]) -> [f32; W] {
        words.map(|w| self.map_scaled(w))
    }
}

impl TryFrom<FloatBounds> for FloatRange {
    type Error = RangeError;

    fn try_from(bounds: FloatBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.low, bounds.high)
    }
}

impl From<FloatRange> for FloatBounds {
    fn from(range: FloatRange) -> Self {
        FloatBounds {
            low: range.low,
            high: range.high,
        }
    }
}

/// The largest finite float strictly less than `x`, for finite `x`.
fn next_below(x: f32) -> f32 {
    if x == 0.0 {
        return -f32::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_f32_endpoints() {
        assert_eq!(reduced_f32(0), 0.0);
        assert_eq!(reduced_f32(0x1ff), 0.0);
        assert_eq!(reduced_f32(0x200), f32::EPSILON);
        assert_eq!(reduced_f32(u32::MAX), 1.0 - f32::EPSILON);
        assert_eq!(reduced_f32(0x8000_0000), 0.5);
    }

    #[test]
    fn reduced_f32_golden() {
        // First four outputs of seed 1230 through the bit trick.
        let words = [2456054672u32, 4145436005, 26537115, 1894399962];
        let expected = [0.5718446969985962f32, 0.9651844501495361, 0.006178617477416992, 0.4410742521286011];
        assert_eq!(reduced_f32_lanes(words), expected);
    }

    #[test]
    fn int_range_rejects_inverted_bounds() {
        assert_eq!(
            IntRange::new(5, 4),
            Err(RangeError::InvertedInt { low: 5, high: 4 })
        );
        assert!(IntRange::new(4, 4).is_ok());
    }

    #[test]
    fn int_range_single_value() {
        let range = IntRange::new(-7, -7).unwrap();
        for word in [0, 1, 12345, u32::MAX] {
            assert_eq!(range.map(word), -7);
        }
        assert!(range.is_exact());
    }

    #[test]
    fn int_range_full_width_is_identity() {
        let range = IntRange::new(i32::MIN, i32::MAX).unwrap();
        assert!(range.is_exact());
        assert_eq!(range.map(0), i32::MIN);
        assert_eq!(range.map(u32::MAX), i32::MAX);
        assert_eq!(range.map(0x8000_0000), 0);
    }

    #[test]
    fn int_range_is_plain_modulo() {
        let range = IntRange::new(1, 100).unwrap();
        assert!(!range.is_exact());
        assert_eq!(range.map(0), 1);
        assert_eq!(range.map(99), 100);
        assert_eq!(range.map(100), 1);
        assert_eq!(range.map(u32::MAX), 1 + (u32::MAX % 100) as i32);
        assert_eq!(range.map_lanes([0, 1, 2, 250]), [1, 2, 3, 51]);
    }

    #[test]
    fn int_range_spanning_zero() {
        let range = IntRange::new(-10_000, 10_000).unwrap();
        assert_eq!(range.map(0), -10_000);
        assert_eq!(range.map(20_000), 10_000);
        assert_eq!(range.map(20_001), -10_000);
    }

    #[test]
    fn unbiased_rejects_the_incomplete_cycle() {
        struct Words<'a>(&'a [u32]);
        impl RngCore for Words<'_> {
            fn next_u32(&mut self) -> u32 {
                let (first, rest) = self.0.split_first().unwrap();
                self.0 = rest;
                *first
            }
            fn next_u64(&mut self) -> u64 {
                unimplemented!()
            }
            fn fill_bytes(&mut self, _: &mut [u8]) {
                unimplemented!()
            }
        }

        // span 3: 2^32 % 3 == 1, so only word 0 is rejected.
        let range = IntRange::new(0, 2).unwrap();
        let mut words = Words(&[0, 0, 4]);
        assert_eq!(range.sample_unbiased(&mut words), 1);
        assert!(words.0.is_empty());
    }

    #[test]
    fn float_range_validation() {
        assert_eq!(
            FloatRange::new(1.0, 0.0),
            Err(RangeError::InvertedFloat { low: 1.0, high: 0.0 })
        );
        assert_eq!(
            FloatRange::new(2.5, 2.5),
            Err(RangeError::EmptyFloat { bound: 2.5 })
        );
        assert!(matches!(
            FloatRange::new(f32::NAN, 1.0),
            Err(RangeError::NonFinite { .. })
        ));
        assert!(matches!(
            FloatRange::new(0.0, f32::INFINITY),
            Err(RangeError::NonFinite { .. })
        ));
        assert!(matches!(
            FloatRange::new(-f32::MAX, f32::MAX),
            Err(RangeError::NonFinite { .. })
        ));
    }

    #[test]
    fn float_range_constants() {
        let range = FloatRange::new(-10_000.0, 10_000.0).unwrap();
        assert_eq!(range.width(), 20_000.0);
        assert_eq!(range.scale(), 20_000.0 / u32::MAX as f32);
        assert_eq!(range.map_reduced(0), -10_000.0);
        assert_eq!(range.map_scaled(0), -10_000.0);
        assert_eq!(range.map_reduced(0x8000_0000), 0.0);
    }

    #[test]
    fn float_range_never_reaches_high() {
        // 2.5 + 0.25 * (1 - 2^-23) rounds to 2.75 without the clamp.
        let range = FloatRange::new(2.5, 2.75).unwrap();
        let top = range.map_reduced(u32::MAX);
        assert!(top < 2.75);
        assert_eq!(top, f32::from_bits(2.75f32.to_bits() - 1));

        // u32::MAX converts to 2^32, so k * word is the full width.
        assert!(range.map_scaled(u32::MAX) < 2.75);
    }

    #[test]
    fn float_strategies_differ() {
        let range = FloatRange::new(0.0, 1.0).unwrap();
        // 0x1ff: discarded by the reduced path, kept by the scaled path.
        assert_eq!(range.map_reduced(0x1ff), 0.0);
        assert!(range.map_scaled(0x1ff) > 0.0);
    }

    #[test]
    fn next_below_steps_one_ulp() {
        assert_eq!(next_below(1.0), 1.0 - f32::EPSILON / 2.0);
        assert_eq!(next_below(0.0), -f32::from_bits(1));
        assert_eq!(next_below(-1.0), f32::from_bits((-1.0f32).to_bits() + 1));
        assert!(next_below(-1.0) < -1.0);
    }
}
