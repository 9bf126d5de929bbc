//! Telemetry feed configuration.
//!
//! Every option is independently overridable: the struct is
//! `#[serde(default)]`, so a JSON file only needs the keys it changes.
//!
//! ```json
//! { "tickIntervalMs": 1000, "steps": { "fast": 0.01 }, "seed": 7 }
//! ```
//!
//! Call [`TelemetryConfig::validate`] before starting a clock; a malformed
//! configuration is a fatal startup error, never a runtime one.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{MovementClass, WtError, WtResult};

// ── MovementSteps ─────────────────────────────────────────────────────────────

/// Per-tick step magnitude, in degrees, for each movement class.
///
/// Each tick draws an independent delta in `[-step/2, +step/2]` per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSteps {
    pub slow:   f64,
    pub medium: f64,
    pub fast:   f64,
}

impl Default for MovementSteps {
    fn default() -> Self {
        Self { slow: 0.001, medium: 0.002, fast: 0.005 }
    }
}

impl MovementSteps {
    #[inline]
    pub fn for_class(&self, class: MovementClass) -> f64 {
        match class {
            MovementClass::Slow   => self.slow,
            MovementClass::Medium => self.medium,
            MovementClass::Fast   => self.fast,
        }
    }
}

// ── TelemetryConfig ───────────────────────────────────────────────────────────

/// All tunables of the generator and the clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelemetryConfig {
    /// Wall-clock period between ticks.  Default: 5000 ms.
    pub tick_interval_ms: u64,

    /// Upper bound on a single sink `append` call.  Default: 2000 ms.
    pub dispatch_timeout_ms: u64,

    pub steps: MovementSteps,

    /// Distance from the base location (degree space) beyond which a sensor
    /// is reset.  Default: 0.1°.
    pub geofence_radius_deg: f64,

    /// Half-width of the per-axis jitter applied on a geofence reset.
    /// Default: 0.025°.
    pub reset_jitter_deg: f64,

    /// Battery percentage every sensor starts at.  Default: 100.
    pub battery_initial: f64,

    /// Battery never drains below this percentage.  Default: 50.
    pub battery_floor: f64,

    /// Per-tick drain is uniform in `[0, battery_decay_max]`.  Default: 0.1.
    pub battery_decay_max: f64,

    /// Default: 20 °C.
    pub temperature_min_c: f64,

    /// Default: 35 °C.
    pub temperature_max_c: f64,

    /// Chance that a reading reports motion.  Default: 0.7.
    pub motion_probability: f64,

    /// Master RNG seed.  The same seed always produces the same walks.
    /// `None` draws a seed from OS entropy at startup.
    pub seed: Option<u64>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:    5_000,
            dispatch_timeout_ms: 2_000,
            steps:               MovementSteps::default(),
            geofence_radius_deg: 0.1,
            reset_jitter_deg:    0.025,
            battery_initial:     100.0,
            battery_floor:       50.0,
            battery_decay_max:   0.1,
            temperature_min_c:   20.0,
            temperature_max_c:   35.0,
            motion_probability:  0.7,
            seed:                None,
        }
    }
}

impl TelemetryConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> WtResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_path(path: &Path) -> WtResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[inline]
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    /// Farthest a generated position can lie from its base location:
    /// the fence radius plus the diagonal of the reset jitter box.
    pub fn max_excursion_deg(&self) -> f64 {
        self.geofence_radius_deg.max(self.reset_jitter_deg * std::f64::consts::SQRT_2)
    }

    /// Reject configurations the generator cannot honour.
    pub fn validate(&self) -> WtResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(config_err("tickIntervalMs must be positive"));
        }
        if self.dispatch_timeout_ms == 0 {
            return Err(config_err("dispatchTimeoutMs must be positive"));
        }

        non_negative("steps.slow", self.steps.slow)?;
        non_negative("steps.medium", self.steps.medium)?;
        non_negative("steps.fast", self.steps.fast)?;
        non_negative("resetJitterDeg", self.reset_jitter_deg)?;
        non_negative("batteryDecayMax", self.battery_decay_max)?;

        if !(self.geofence_radius_deg.is_finite() && self.geofence_radius_deg > 0.0) {
            return Err(config_err(format!(
                "geofenceRadiusDeg must be a positive number, got {}",
                self.geofence_radius_deg
            )));
        }

        percentage("batteryFloor", self.battery_floor)?;
        percentage("batteryInitial", self.battery_initial)?;
        if self.battery_initial < self.battery_floor {
            return Err(config_err(format!(
                "batteryInitial {} is below batteryFloor {}",
                self.battery_initial, self.battery_floor
            )));
        }

        if !(self.temperature_min_c.is_finite() && self.temperature_max_c.is_finite()) {
            return Err(config_err("temperature range must be finite"));
        }
        if self.temperature_min_c > self.temperature_max_c {
            return Err(config_err(format!(
                "temperatureMinC {} exceeds temperatureMaxC {}",
                self.temperature_min_c, self.temperature_max_c
            )));
        }

        if !(0.0..=1.0).contains(&self.motion_probability) {
            return Err(config_err(format!(
                "motionProbability must lie in [0, 1], got {}",
                self.motion_probability
            )));
        }
        Ok(())
    }
}

fn config_err(msg: impl Into<String>) -> WtError {
    WtError::Config(msg.into())
}

fn non_negative(name: &str, value: f64) -> WtResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{name} must be a non-negative number, got {value}")))
    }
}

fn percentage(name: &str, value: f64) -> WtResult<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(config_err(format!("{name} must lie in [0, 100], got {value}")))
    }
}
