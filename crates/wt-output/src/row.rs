//! Flat row layouts shared by the file and database backends.

use chrono::{DateTime, SecondsFormat, Utc};
use wt_core::Reading;
use wt_sim::TickReport;

/// Column order of a stored reading.
pub const READING_COLUMNS: [&str; 7] = [
    "sensor_id",
    "latitude",
    "longitude",
    "temperature",
    "motion",
    "battery_level",
    "timestamp",
];

/// Column order of a tick summary row.
pub const TICK_COLUMNS: [&str; 3] = ["tick", "dispatched", "failed"];

/// Millisecond RFC 3339 in UTC (`2025-03-04T09:00:05.000Z`).  Fixed width, so
/// text order equals time order.
pub fn timestamp_text(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn reading_record(r: &Reading) -> [String; 7] {
    [
        r.sensor_id.to_string(),
        r.latitude.to_string(),
        r.longitude.to_string(),
        r.temperature.to_string(),
        (r.motion_detected as u8).to_string(),
        r.battery_level.to_string(),
        timestamp_text(&r.timestamp),
    ]
}

pub(crate) fn tick_record(report: &TickReport) -> [String; 3] {
    [
        report.tick.0.to_string(),
        report.dispatched.to_string(),
        report.failed.to_string(),
    ]
}
