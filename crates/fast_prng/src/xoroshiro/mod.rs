//! Xoshiro pseudorandom generators, fast, fairly random, and small-state.
//!
//! - [`Xoshiro128Plus`]: 32-bit output, 128 bits of state. Recommended for
//!   generating 32-bit floating-point numbers. It has a [low linear
//!   complexity] in the lowest bits (which are discarded when generating
//!   floats), making it fail linearity tests. This is unlikely to have any
//!   impact in practice.
//! - [`LaneXoshiro128Plus`]: `W` independent `Xoshiro128Plus` lanes advanced
//!   together, one output per lane per call. [`LanePair`] and
//!   [`double_next`] advance two such blocks in one pass.
//! - [`SplitMix32`]: Used for initializing the generators above from a
//!   32-bit seed. Used for implementing `seed_from_u64`.
//!
//! Both generators support `jump()` (2^64 steps) and `long_jump()` (2^96
//! steps) for splitting one seed into non-overlapping streams. See the
//! [xoshiro paper] for the jump-polynomial technique.
//!
//! [xoshiro paper]: http://vigna.di.unimi.it/ftp/papers/ScrambledLinear.pdf
//! [low linear complexity]: http://xoshiro.di.unimi.it/lowcomp.php

#[macro_use]
mod common;
mod lanes;
mod splitmix32;
mod xoshiro128plus;

pub use lanes::{double_next, LanePair, LaneXoshiro128Plus};
pub use rand_core;
pub use splitmix32::{SplitMix32, SHUFFLE_ROUNDS};
pub use xoshiro128plus::Xoshiro128Plus;
