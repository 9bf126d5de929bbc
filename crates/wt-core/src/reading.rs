//! The telemetry sample and its boundary form.
//!
//! [`Reading`] is the validated value that flows from the generator to sinks
//! and from sources to the aggregator.  Its serde shape is the wire format
//! consumed by the live map:
//!
//! ```json
//! {
//!   "sensorId": "SENSOR-002",
//!   "latitude": -1.352871,
//!   "longitude": 36.781433,
//!   "temperature": 27.41,
//!   "motionDetected": true,
//!   "batteryLevel": 97,
//!   "timestamp": "2025-03-04T09:15:00.000Z"
//! }
//! ```
//!
//! [`RawReading`] is what arrives from outside (HTTP bodies, database rows
//! from older feeds): every field optional.  Converting it with
//! `Reading::try_from` is the single place where malformed input is rejected,
//! so nothing downstream has to handle a reading without a sensor or a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GeoPoint, ReadingError, SensorId};

/// One immutable telemetry sample from a sensor at an instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub sensor_id:       SensorId,
    /// Degrees, rounded to 6 decimal places.
    pub latitude:        f64,
    /// Degrees, rounded to 6 decimal places.
    pub longitude:       f64,
    /// Degrees Celsius, rounded to 2 decimal places.
    pub temperature:     f64,
    #[serde(alias = "motion")]
    pub motion_detected: bool,
    /// Integer percentage.
    pub battery_level:   u8,
    #[serde(with = "wire_time")]
    pub timestamp:       DateTime<Utc>,
}

impl Reading {
    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A reading as received at the boundary, before validation.
///
/// Unknown fields (e.g. a database row `id`) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub sensor_id:       Option<String>,
    pub latitude:        Option<f64>,
    pub longitude:       Option<f64>,
    pub temperature:     Option<f64>,
    #[serde(alias = "motion")]
    pub motion_detected: Option<bool>,
    pub battery_level:   Option<f64>,
    pub timestamp:       Option<DateTime<Utc>>,
}

impl From<Reading> for RawReading {
    fn from(r: Reading) -> Self {
        Self {
            sensor_id:       Some(r.sensor_id.0),
            latitude:        Some(r.latitude),
            longitude:       Some(r.longitude),
            temperature:     Some(r.temperature),
            motion_detected: Some(r.motion_detected),
            battery_level:   Some(f64::from(r.battery_level)),
            timestamp:       Some(r.timestamp),
        }
    }
}

impl TryFrom<RawReading> for Reading {
    type Error = ReadingError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        let sensor_id = match raw.sensor_id {
            Some(id) if !id.trim().is_empty() => SensorId(id),
            Some(_) => return Err(ReadingError::EmptySensorId),
            None    => return Err(ReadingError::MissingField("sensorId")),
        };
        let timestamp   = raw.timestamp.ok_or(ReadingError::MissingField("timestamp"))?;
        let latitude    = finite(raw.latitude, "latitude")?;
        let longitude   = finite(raw.longitude, "longitude")?;
        let temperature = finite(raw.temperature, "temperature")?;

        // Storage default for a row written without a battery column.
        let battery = raw.battery_level.unwrap_or(100.0);
        if !(0.0..=100.0).contains(&battery) {
            return Err(ReadingError::BatteryOutOfRange(battery));
        }

        Ok(Reading {
            sensor_id,
            latitude,
            longitude,
            temperature,
            motion_detected: raw.motion_detected.unwrap_or(false),
            battery_level:   battery.round() as u8,
            timestamp,
        })
    }
}

fn finite(value: Option<f64>, field: &'static str) -> Result<f64, ReadingError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(ReadingError::NonFinite(field)),
        None    => Err(ReadingError::MissingField(field)),
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix on output; any
/// RFC 3339 offset accepted on input.
mod wire_time {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(d)
    }
}
