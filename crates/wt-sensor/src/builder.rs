//! Fluent builder for constructing `SensorStore` + `SensorRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use wt_core::{GeoPoint, MovementClass, SensorProfile};
//! use wt_sensor::SensorStoreBuilder;
//!
//! let profiles = vec![
//!     SensorProfile::new("SENSOR-001", "Elephant Tracker Alpha",
//!                        GeoPoint::new(-1.2921, 36.8219), MovementClass::Slow),
//! ];
//! let (store, rngs) = SensorStoreBuilder::new(/*seed=*/ 42)
//!     .profiles(profiles)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(rngs.len(),  1);
//! assert_eq!(store.states[0].battery, 100.0);
//! ```

use std::collections::HashSet;

use wt_core::{SensorProfile, WtError, WtResult};

use crate::{SensorRngs, SensorStore};

/// Fluent builder for [`SensorStore`] + [`SensorRngs`].
pub struct SensorStoreBuilder {
    seed:            u64,
    profiles:        Vec<SensorProfile>,
    battery_initial: f64,
}

impl SensorStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            profiles:        Vec::new(),
            battery_initial: 100.0,
        }
    }

    /// Set the sensors, in dispatch order.
    pub fn profiles(mut self, profiles: Vec<SensorProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Append one sensor after those already added.
    pub fn profile(mut self, profile: SensorProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Battery level every sensor starts at (default 100).
    pub fn initial_battery(mut self, level: f64) -> Self {
        self.battery_initial = level;
        self
    }

    /// Validate the profile list and construct the store and its RNGs.
    ///
    /// # Errors
    ///
    /// - [`WtError::Config`] if no profiles were given or a base location is
    ///   not a finite coordinate.
    /// - [`WtError::DuplicateSensor`] if two profiles share an id.
    pub fn build(self) -> WtResult<(SensorStore, SensorRngs)> {
        if self.profiles.is_empty() {
            return Err(WtError::Config("at least one sensor profile is required".into()));
        }

        let mut seen = HashSet::with_capacity(self.profiles.len());
        for p in &self.profiles {
            if !seen.insert(&p.id) {
                return Err(WtError::DuplicateSensor(p.id.clone()));
            }
            if !p.base_location.is_finite() {
                return Err(WtError::Config(format!(
                    "sensor {} has a non-finite base location",
                    p.id
                )));
            }
        }

        let rngs  = SensorRngs::new(self.profiles.len(), self.seed);
        let store = SensorStore::new(self.profiles, self.battery_initial);
        Ok((store, rngs))
    }
}
