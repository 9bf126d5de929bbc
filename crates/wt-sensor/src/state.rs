//! Per-sensor runtime state.

use wt_core::{GeoPoint, SensorProfile};

/// The mutable state of a single sensor.
///
/// Owned by the [`SensorStore`][crate::SensorStore] for the lifetime of the
/// simulation and mutated only by [`generate`][crate::generate] for that
/// sensor, one tick at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorState {
    /// Current position, unrounded.  Readings carry the rounded value.
    pub position: GeoPoint,

    /// Battery percentage.  Non-increasing; never below the configured floor.
    pub battery: f64,

    /// Readings generated so far.
    pub readings_emitted: u64,

    /// Times the sensor left its geofence and was reset near the base.
    pub geofence_resets: u64,
}

impl SensorState {
    /// A fresh sensor sitting exactly on its base location.
    pub fn at_base(profile: &SensorProfile, battery: f64) -> Self {
        Self {
            position:         profile.base_location,
            battery,
            readings_emitted: 0,
            geofence_resets:  0,
        }
    }

    /// Degree-space distance from the profile's base location.
    #[inline]
    pub fn excursion(&self, profile: &SensorProfile) -> f64 {
        self.position.degree_distance(profile.base_location)
    }
}
