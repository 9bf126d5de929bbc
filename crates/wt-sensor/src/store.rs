//! Sensor storage: `SensorStore` (profiles + states) and `SensorRngs`.
//!
//! # Why two structs?
//!
//! A parallel generation phase needs `&mut` access to each sensor's state
//! and RNG at the same time as shared access to its profile.  Keeping the
//! RNGs in their own struct lets the clock split-borrow them alongside the
//! store without any interior mutability.

use wt_core::{SensorId, SensorIndex, SensorProfile, SensorRng};

use crate::SensorState;

// ── SensorRngs ────────────────────────────────────────────────────────────────

/// Per-sensor deterministic RNG state, indexed by [`SensorIndex`].
pub struct SensorRngs {
    pub inner: Vec<SensorRng>,
}

impl SensorRngs {
    /// Allocate and seed `count` per-sensor RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| SensorRng::new(global_seed, SensorIndex(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one sensor's RNG.
    #[inline]
    pub fn get_mut(&mut self, sensor: SensorIndex) -> &mut SensorRng {
        &mut self.inner[sensor.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── SensorStore ───────────────────────────────────────────────────────────────

/// Profiles and runtime states of every sensor, in configuration order.
///
/// `profiles` and `states` always have the same length; a [`SensorIndex`]
/// indexes both.  Configuration order is the dispatch order of every tick.
pub struct SensorStore {
    pub profiles: Vec<SensorProfile>,
    pub states:   Vec<SensorState>,
}

impl SensorStore {
    pub(crate) fn new(profiles: Vec<SensorProfile>, battery_initial: f64) -> Self {
        let states = profiles
            .iter()
            .map(|p| SensorState::at_base(p, battery_initial))
            .collect();
        Self { profiles, states }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Slot of the sensor with external id `id`, if configured.
    pub fn index_of(&self, id: &SensorId) -> Option<SensorIndex> {
        self.profiles
            .iter()
            .position(|p| &p.id == id)
            .map(|i| SensorIndex(i as u32))
    }

    #[inline]
    pub fn profile(&self, sensor: SensorIndex) -> &SensorProfile {
        &self.profiles[sensor.index()]
    }

    #[inline]
    pub fn state(&self, sensor: SensorIndex) -> &SensorState {
        &self.states[sensor.index()]
    }

    /// `(profile, state)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&SensorProfile, &SensorState)> {
        self.profiles.iter().zip(self.states.iter())
    }
}
