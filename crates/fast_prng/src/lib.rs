//! fast_prng supplies deterministic, high-throughput pseudo-random numbers for an embedded
//! controller: jitter and noise models, stochastic planners, anything that needs many uniform
//! draws per control tick and exact reproducibility from a seed.
//!
//! The core is the xoshiro128+ generator ([`Xoshiro128Plus`]), seeded through a 32-bit
//! splitmix expander ([`SplitMix32`]), and its lane-parallel form ([`LaneXoshiro128Plus`]) which
//! advances `W` independent generators per call. Both support `jump()`/`long_jump()` for
//! splitting one seed into non-overlapping streams. [`range`] turns raw words into uniform
//! integers and floats over arbitrary bounds and [`uniform`] pairs those mappers with a
//! generator.
//!
//! A lot of the initial code is taken from the [rust-random project](https://github.com/rust-random)
//! and modified to work on 32-bit words and lanes. All generators implement
//! [`rand_core::RngCore`], so they also plug into the `rand` distribution adapters.
//!
//! The crate is `no_std` when the default `std` feature is disabled; only the
//! `initialize_states` constructors need `std`.

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![allow(clippy::unreadable_literal)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod entropy;
pub mod range;
pub mod uniform;
pub mod xoroshiro;

mod error;
mod fast_rand;

pub use config::{FloatBounds, IntBounds};
pub use entropy::{EntropySource, FnvHasher, Telemetry, TelemetryEntropy};
pub use error::RangeError;
pub use fast_rand::*;
pub use range::{reduced_f32, FloatRange, IntRange};
pub use uniform::{LaneUniformFloat32, LaneUniformInt32, UniformFloat32, UniformInt32};
pub use xoroshiro::{
    double_next, rand_core, LanePair, LaneXoshiro128Plus, SplitMix32, Xoshiro128Plus,
};
