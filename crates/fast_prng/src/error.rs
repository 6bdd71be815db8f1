use thiserror::Error;

/// A range mapper was configured with bounds it cannot sample from.
///
/// Returned when a mapper is built or rebound, never during generation. A
/// failed [`set_bounds`](crate::UniformInt32::set_bounds) leaves the
/// previous bounds in place.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    /// The lower bound of an inclusive integer range exceeds the upper bound.
    #[error("lower bound {low} is greater than upper bound {high}")]
    InvertedInt {
        /// Requested lower bound.
        low: i32,
        /// Requested upper bound.
        high: i32,
    },
    /// The lower bound of a half-open float range exceeds the upper bound.
    #[error("lower bound {low} is greater than upper bound {high}")]
    InvertedFloat {
        /// Requested lower bound.
        low: f32,
        /// Requested upper bound.
        high: f32,
    },
    /// `[a, a)` contains no values.
    #[error("half-open range [{bound}, {bound}) is empty")]
    EmptyFloat {
        /// The bound given for both ends.
        bound: f32,
    },
    /// A float bound is NaN or infinite, or the width `b - a` overflows.
    #[error("float bounds [{low}, {high}) are not finite or too wide")]
    NonFinite {
        /// Requested lower bound.
        low: f32,
        /// Requested upper bound.
        high: f32,
    },
}
