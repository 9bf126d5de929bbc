//! The reading generator: one sensor, one tick.

use chrono::{DateTime, Utc};
use wt_core::geo::round_to;
use wt_core::{Reading, SensorProfile, SensorRng, TelemetryConfig};

use crate::SensorState;

/// Advance `state` by one tick and return the reading it produces.
///
/// Draw order per call is fixed (lat step, lon step, optional reset jitter
/// lat/lon, battery drain, temperature, motion), so a given seed always
/// yields the same sequence of readings.
///
/// Never fails.  `config` must have passed
/// [`TelemetryConfig::validate`]; NaN or inverted ranges are a caller bug.
pub fn generate(
    profile: &SensorProfile,
    state:   &mut SensorState,
    config:  &TelemetryConfig,
    rng:     &mut SensorRng,
    now:     DateTime<Utc>,
) -> Reading {
    // ── Random walk ───────────────────────────────────────────────────────
    let half_step = config.steps.for_class(profile.movement_class) * 0.5;
    let d_lat = rng.symmetric(half_step);
    let d_lon = rng.symmetric(half_step);
    state.position = state.position.offset(d_lat, d_lon);

    // ── Geofence: reset near the anchor, not onto it ──────────────────────
    if state.excursion(profile) > config.geofence_radius_deg {
        let jitter_lat = rng.symmetric(config.reset_jitter_deg);
        let jitter_lon = rng.symmetric(config.reset_jitter_deg);
        state.position = profile.base_location.offset(jitter_lat, jitter_lon);
        state.geofence_resets += 1;
    }

    // ── Battery drain, floored ────────────────────────────────────────────
    let drain = if config.battery_decay_max > 0.0 {
        rng.gen_range(0.0..=config.battery_decay_max)
    } else {
        0.0
    };
    state.battery = (state.battery - drain).max(config.battery_floor);

    // ── Memoryless channels ───────────────────────────────────────────────
    let temperature = rng.gen_range(config.temperature_min_c..=config.temperature_max_c);
    let motion_detected = rng.gen_bool(config.motion_probability);

    state.readings_emitted += 1;

    let position = state.position.rounded();
    Reading {
        sensor_id:     profile.id.clone(),
        latitude:      position.lat,
        longitude:     position.lon,
        temperature:   round_to(temperature, 2),
        motion_detected,
        battery_level: state.battery.round().clamp(0.0, 100.0) as u8,
        timestamp:     now,
    }
}
