//! Feed configuration: telemetry options plus the tracked sensors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wt_core::{GeoPoint, MovementClass, SensorProfile, TelemetryConfig, WtResult};

/// Everything the feed binary reads from its optional JSON file.  Any field
/// left out keeps its default.
///
/// ```json
/// {
///   "telemetry": { "tickIntervalMs": 1000, "seed": 7 },
///   "sensors": [
///     { "id": "SENSOR-101", "name": "Zebra Tracker",
///       "baseLocation": { "lat": -1.30, "lon": 36.80 },
///       "movementClass": "fast" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub telemetry: TelemetryConfig,
    pub sensors:   Vec<SensorProfile>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { telemetry: TelemetryConfig::default(), sensors: default_sensors() }
    }
}

impl FeedConfig {
    pub fn from_json_str(json: &str) -> WtResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> WtResult<Self> {
        match path {
            Some(path) => Self::from_json_str(&std::fs::read_to_string(path)?),
            None       => Ok(Self::default()),
        }
    }
}

/// Five wildlife trackers around Nairobi.
pub fn default_sensors() -> Vec<SensorProfile> {
    use MovementClass::*;

    [
        ("SENSOR-001", "Elephant Tracker Alpha",   -1.2921, 36.8219, Slow),
        ("SENSOR-002", "Cheetah Tracker Beta",     -1.3521, 36.7819, Fast),
        ("SENSOR-003", "Rhino Tracker Gamma",      -1.2321, 36.8619, Medium),
        ("SENSOR-004", "Lion Pride Tracker Delta", -1.3121, 36.8019, Medium),
        ("SENSOR-005", "Gorilla Tracker Epsilon",  -1.2721, 36.8419, Slow),
    ]
    .into_iter()
    .map(|(id, name, lat, lon, class)| SensorProfile::new(id, name, GeoPoint::new(lat, lon), class))
    .collect()
}
