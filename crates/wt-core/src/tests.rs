//! Unit tests for wt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{SensorId, SensorIndex};

    #[test]
    fn index_roundtrip() {
        let id = SensorIndex(4);
        assert_eq!(id.index(), 4);
        assert_eq!(SensorIndex::try_from(4usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(SensorIndex::INVALID.0, u32::MAX);
        assert_eq!(SensorIndex::default(), SensorIndex::INVALID);
    }

    #[test]
    fn sensor_id_serialises_as_plain_string() {
        let id = SensorId::from("SENSOR-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"SENSOR-001\"");
        assert_eq!(id.to_string(), "SENSOR-001");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;
    use crate::geo::round_to;

    #[test]
    fn degree_distance_is_euclidean() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.03, 0.04);
        assert!((a.degree_distance(b) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn haversine_one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(-1.0, 36.8);
        let b = GeoPoint::new(-2.0, 36.8);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn rounding_keeps_six_places() {
        let p = GeoPoint::new(-1.29210049, 36.82190051).rounded();
        assert_eq!(p.lat, -1.2921);
        assert_eq!(p.lon, 36.821901);
        assert_eq!(round_to(27.456, 2), 27.46);
    }
}

#[cfg(test)]
mod time {
    use chrono::{Duration, TimeZone, Utc};

    use crate::{SteppedTimeSource, Tick, TimeSource};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).next(), Tick(4));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn stepped_source_advances_per_call() {
        let start = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
        let src = SteppedTimeSource::new(start, Duration::seconds(5));
        assert_eq!(src.now(), start);
        assert_eq!(src.now(), start + Duration::seconds(5));
        assert_eq!(src.now(), start + Duration::seconds(10));
    }
}

#[cfg(test)]
mod rng {
    use crate::{SensorIndex, SensorRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SensorRng::new(12345, SensorIndex(0));
        let mut r2 = SensorRng::new(12345, SensorIndex(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_sensors_differ() {
        let mut r0 = SensorRng::new(1, SensorIndex(0));
        let mut r1 = SensorRng::new(1, SensorIndex(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent sensors should diverge");
    }

    #[test]
    fn symmetric_stays_in_bounds() {
        let mut rng = SensorRng::new(0, SensorIndex(0));
        for _ in 0..1000 {
            let v = rng.symmetric(0.0025);
            assert!((-0.0025..=0.0025).contains(&v));
        }
        assert_eq!(rng.symmetric(0.0), 0.0);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SensorRng::new(0, SensorIndex(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod profile {
    use crate::{MovementClass, SensorProfile};

    #[test]
    fn parses_camel_case_profile() {
        let json = r#"{
            "id": "SENSOR-002",
            "name": "Cheetah Tracker Beta",
            "baseLocation": { "lat": -1.3521, "lon": 36.7819 },
            "movementClass": "fast"
        }"#;
        let p: SensorProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "SENSOR-002");
        assert_eq!(p.movement_class, MovementClass::Fast);
        assert_eq!(p.base_location.lat, -1.3521);
    }

    #[test]
    fn unknown_class_falls_back_to_medium() {
        let c: MovementClass = serde_json::from_str("\"sprinting\"").unwrap();
        assert_eq!(c, MovementClass::Medium);
    }

    #[test]
    fn class_names_round_trip() {
        for class in [MovementClass::Slow, MovementClass::Medium, MovementClass::Fast] {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{class}\""));
            assert_eq!(serde_json::from_str::<MovementClass>(&json).unwrap(), class);
        }
    }

    #[test]
    fn missing_class_defaults_to_medium() {
        let json = r#"{ "id": "S", "baseLocation": { "lat": 0.0, "lon": 0.0 } }"#;
        let p: SensorProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.movement_class, MovementClass::Medium);
    }
}

#[cfg(test)]
mod reading {
    use chrono::{TimeZone, Utc};

    use crate::{RawReading, Reading, ReadingError, SensorId};

    fn sample() -> Reading {
        Reading {
            sensor_id:       SensorId::from("SENSOR-001"),
            latitude:        -1.2921,
            longitude:       36.8219,
            temperature:     27.41,
            motion_detected: true,
            battery_level:   97,
            timestamp:       Utc.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn wire_shape_uses_camel_case_and_iso_timestamp() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["sensorId"], "SENSOR-001");
        assert_eq!(v["motionDetected"], true);
        assert_eq!(v["batteryLevel"], 97);
        assert_eq!(v["timestamp"], "2025-03-04T09:15:00.000Z");
    }

    #[test]
    fn accepts_legacy_motion_field() {
        let json = r#"{
            "id": 12,
            "sensorId": "SENSOR-003",
            "latitude": -1.2321,
            "longitude": 36.8619,
            "temperature": 22.5,
            "motion": true,
            "batteryLevel": 88,
            "timestamp": "2025-03-04T09:15:05.000Z"
        }"#;
        let r: Reading = serde_json::from_str(json).unwrap();
        assert!(r.motion_detected);
        assert_eq!(r.battery_level, 88);
    }

    #[test]
    fn raw_missing_sensor_or_timestamp_is_rejected() {
        let mut raw = RawReading::from(sample());
        raw.sensor_id = None;
        assert_eq!(Reading::try_from(raw), Err(ReadingError::MissingField("sensorId")));

        let mut raw = RawReading::from(sample());
        raw.timestamp = None;
        assert_eq!(Reading::try_from(raw), Err(ReadingError::MissingField("timestamp")));

        let mut raw = RawReading::from(sample());
        raw.sensor_id = Some("  ".into());
        assert_eq!(Reading::try_from(raw), Err(ReadingError::EmptySensorId));
    }

    #[test]
    fn raw_defaults_optional_fields() {
        let mut raw = RawReading::from(sample());
        raw.motion_detected = None;
        raw.battery_level = None;
        let r = Reading::try_from(raw).unwrap();
        assert!(!r.motion_detected);
        assert_eq!(r.battery_level, 100);
    }

    #[test]
    fn raw_rejects_nan_and_bad_battery() {
        let mut raw = RawReading::from(sample());
        raw.latitude = Some(f64::NAN);
        assert_eq!(Reading::try_from(raw), Err(ReadingError::NonFinite("latitude")));

        let mut raw = RawReading::from(sample());
        raw.battery_level = Some(140.0);
        assert_eq!(Reading::try_from(raw), Err(ReadingError::BatteryOutOfRange(140.0)));
    }
}

#[cfg(test)]
mod config {
    use crate::{MovementClass, TelemetryConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = TelemetryConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.tick_interval().as_secs(), 5);
        assert_eq!(cfg.steps.for_class(MovementClass::Fast), 0.005);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = TelemetryConfig::from_json_str(
            r#"{ "tickIntervalMs": 1000, "steps": { "fast": 0.01 }, "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(cfg.tick_interval_ms, 1000);
        assert_eq!(cfg.steps.fast, 0.01);
        assert_eq!(cfg.steps.slow, 0.001);
        assert_eq!(cfg.geofence_radius_deg, 0.1);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let cfg = TelemetryConfig { geofence_radius_deg: -0.1, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_temperature_range_is_rejected() {
        let cfg = TelemetryConfig {
            temperature_min_c: 40.0,
            temperature_max_c: 35.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn probability_and_battery_bounds() {
        let cfg = TelemetryConfig { motion_probability: 1.5, ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = TelemetryConfig { battery_floor: 60.0, battery_initial: 55.0, ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = TelemetryConfig { tick_interval_ms: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
