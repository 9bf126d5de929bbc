//! Tests for argument parsing and the feed configuration.

use std::path::PathBuf;

use wt_core::{MovementClass, TelemetryConfig};

use crate::config::{FeedConfig, default_sensors};
use crate::{Args, parse_args};

fn args(list: &[&str]) -> anyhow::Result<Args> {
    parse_args(list.iter().map(|s| s.to_string()))
}

#[test]
fn no_arguments_means_defaults() {
    assert_eq!(args(&[]).unwrap(), Args::default());
}

#[test]
fn config_path_and_db() {
    let parsed = args(&["feed.json", "--db", "iot.db"]).unwrap();
    assert_eq!(parsed.config, Some(PathBuf::from("feed.json")));
    assert_eq!(parsed.db, Some(PathBuf::from("iot.db")));
}

#[test]
fn bad_arguments_rejected() {
    assert!(args(&["--db"]).is_err());
    assert!(args(&["--verbose"]).is_err());
    assert!(args(&["a.json", "b.json"]).is_err());
}

#[test]
fn five_default_trackers() {
    let sensors = default_sensors();
    let ids: Vec<&str> = sensors.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["SENSOR-001", "SENSOR-002", "SENSOR-003", "SENSOR-004", "SENSOR-005"]);

    let classes: Vec<MovementClass> = sensors.iter().map(|p| p.movement_class).collect();
    use MovementClass::*;
    assert_eq!(classes, [Slow, Fast, Medium, Medium, Slow]);
}

#[test]
fn partial_json_keeps_defaults() {
    let config = FeedConfig::from_json_str(r#"{ "telemetry": { "tickIntervalMs": 1000 } }"#).unwrap();
    assert_eq!(config.telemetry.tick_interval_ms, 1000);
    assert_eq!(config.telemetry.battery_floor, TelemetryConfig::default().battery_floor);
    assert_eq!(config.sensors, default_sensors());
}

#[test]
fn sensor_list_replaces_defaults() {
    let json = r#"{
        "sensors": [
            { "id": "SENSOR-101", "name": "Zebra Tracker",
              "baseLocation": { "lat": -1.30, "lon": 36.80 },
              "movementClass": "sprinting" }
        ]
    }"#;
    let config = FeedConfig::from_json_str(json).unwrap();
    assert_eq!(config.sensors.len(), 1);
    assert_eq!(config.sensors[0].movement_class, MovementClass::Medium);
}

#[test]
fn missing_file_is_an_error() {
    assert!(FeedConfig::load(Some(std::path::Path::new("/nonexistent/feed.json"))).is_err());
}
