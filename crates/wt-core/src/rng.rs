//! Deterministic per-sensor and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each sensor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (sensor_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space.
//! This means:
//!
//! - Sensors never share RNG state, so the walk of one tracker does not
//!   depend on how many others exist or in which order they are generated.
//! - Appending sensors to the configuration does not disturb the sequences
//!   of existing ones.
//! - Generation may run on any thread without synchronisation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SensorIndex;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SensorRng ─────────────────────────────────────────────────────────────────

/// Per-sensor deterministic RNG.
///
/// Create one per sensor at startup and keep them in a parallel `Vec`
/// alongside the sensor states.
pub struct SensorRng(SmallRng);

impl SensorRng {
    /// Seed deterministically from the run's global seed and a sensor slot.
    pub fn new(global_seed: u64, sensor: SensorIndex) -> Self {
        let seed = global_seed ^ (sensor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SensorRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform draw in the closed interval `[-half, +half]`.
    ///
    /// A zero (or negative) `half` yields exactly `0.0` instead of panicking
    /// on an empty range.
    #[inline]
    pub fn symmetric(&mut self, half: f64) -> f64 {
        if half > 0.0 {
            self.0.gen_range(-half..=half)
        } else {
            0.0
        }
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG.  Used to pick a global seed when the configuration leaves
/// it unset.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed from operating-system entropy.  Non-reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }
}
