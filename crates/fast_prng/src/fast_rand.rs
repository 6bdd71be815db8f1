use rand_core::RngCore;

use crate::range::reduced_f32;

/// Mask keeping the 31 low bits of a word.
pub const INT31_MASK: u32 = 0x7fff_ffff;

/// Draws used by table-driven samplers such as the Ziggurat algorithm.
pub trait FastRand: RngCore {
    /// Creates a non-negative 31-bit integer, `next_u32() & 0x7fffffff`, and
    /// advances the state once.
    fn random_int31(&mut self) -> i32;
    /// Creates an [`prim@f32`] in the range of `[0.0, 1.0)` with the
    /// exponent bit trick of [`reduced_f32`] and advances the state once.
    fn reduced_f32(&mut self) -> f32;
}

impl<T: RngCore + ?Sized> FastRand for T {
    #[inline]
    fn random_int31(&mut self) -> i32 {
        (self.next_u32() & INT31_MASK) as i32
    }

    #[inline]
    fn reduced_f32(&mut self) -> f32 {
        reduced_f32(self.next_u32())
    }
}

/// A sampler of normally distributed floats.
///
/// Only [`standard_normal`](Self::standard_normal) is required; it is
/// supplied by an external sampler (a Ziggurat implementation drawing from
/// [`FastRand::random_int31`]). Scaling to other parameters is provided.
pub trait NormalSource {
    /// Creates an [`prim@f32`] drawn from a Gaussian of mean=0 and sigma=1.
    fn standard_normal(&mut self) -> f32;

    /// Creates an [`prim@f32`] drawn from a Gaussian of the given mean and
    /// standard deviation, as `mean + standard_normal() * std_deviation`.
    fn normal(&mut self, mean: f32, std_deviation: f32) -> f32 {
        mean + self.standard_normal() * std_deviation
    }
}
