//! Seed sources built from live telemetry.
//!
//! The controller has no hardware RNG, so seeds are derived by hashing
//! readings that drift from run to run: battery voltage, battery current
//! and a microsecond clock. The hash is FNV-1a over the little-endian bytes
//! of each reading, in that order.

use core::hash::Hasher;

use rand_core::impls::fill_bytes_via_next;
use rand_core::RngCore;

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 1099511628211;

/// Streaming FNV-1a (64-bit) hasher.
///
/// Multi-byte integers are always fed in little-endian order, whatever the
/// host's byte order, so the same readings hash to the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    /// A hasher at the offset basis.
    pub const fn new() -> Self {
        Self {
            hash: FNV_OFFSET_BASIS,
        }
    }

    /// Return to the offset basis.
    pub fn reset(&mut self) {
        self.hash = FNV_OFFSET_BASIS;
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash ^= u64::from(byte);
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }
}

/// Something that produces seed values.
///
/// Mirrors a uniform random bit generator: each call yields a value in
/// `[min(), max()]`, so sources compose with distribution adapters that need
/// the output range.
pub trait EntropySource {
    /// Produce a fresh seed value.
    fn entropy(&mut self) -> u32;

    /// Smallest value [`entropy`](Self::entropy) can return.
    fn min() -> u32
    where
        Self: Sized,
    {
        0
    }

    /// Largest value [`entropy`](Self::entropy) can return.
    fn max() -> u32
    where
        Self: Sized,
    {
        u32::MAX
    }
}

/// Readings the host platform exposes for seeding.
pub trait Telemetry {
    /// Battery voltage, in the platform's native unit.
    fn battery_voltage(&self) -> u32;
    /// Battery current, in the platform's native unit.
    fn battery_current(&self) -> u32;
    /// Monotonic clock, in microseconds.
    fn micros(&self) -> u64;
}

/// Entropy source hashing a fresh set of telemetry readings per call.
#[derive(Debug, Clone)]
pub struct TelemetryEntropy<T> {
    telemetry: T,
    hasher: FnvHasher,
}

impl<T: Telemetry> TelemetryEntropy<T> {
    /// Wrap a telemetry provider.
    pub fn new(telemetry: T) -> Self {
        Self {
            telemetry,
            hasher: FnvHasher::new(),
        }
    }

    /// Hash the current readings and return the full 64-bit digest.
    ///
    /// Voltage is hashed first, then current, then the clock.
    pub fn entropy_u64(&mut self) -> u64 {
        self.hasher.reset();
        self.hasher.write_u32(self.telemetry.battery_voltage());
        self.hasher.write_u32(self.telemetry.battery_current());
        self.hasher.write_u64(self.telemetry.micros());
        self.hasher.finish()
    }

    /// The wrapped telemetry provider.
    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }
}

impl<T: Telemetry> EntropySource for TelemetryEntropy<T> {
    /// The digest truncated to its low 32 bits.
    fn entropy(&mut self) -> u32 {
        self.entropy_u64() as u32
    }
}

impl<T: Telemetry> RngCore for TelemetryEntropy<T> {
    fn next_u32(&mut self) -> u32 {
        self.entropy()
    }

    fn next_u64(&mut self) -> u64 {
        self.entropy_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_next(self, dest);
    }
}
