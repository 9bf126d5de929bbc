//! Tests for the reading stores.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use tempfile::TempDir;
use wt_core::{GeoPoint, MovementClass, Reading, SensorId, SensorProfile, TelemetryConfig};
use wt_sim::{ClockBuilder, ClockObserver, DispatchError, SimulationClock};

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap() + chrono::Duration::seconds(secs)
}

fn reading(sensor: &str, secs: i64) -> Reading {
    Reading {
        sensor_id:       SensorId::from(sensor),
        latitude:        -1.2921,
        longitude:       36.8219,
        temperature:     27.35,
        motion_detected: true,
        battery_level:   98,
        timestamp:       at(secs),
    }
}

fn ids_and_secs(readings: &[Reading]) -> Vec<(&str, i64)> {
    readings
        .iter()
        .map(|r| (r.sensor_id.as_str(), (r.timestamp - at(0)).num_seconds()))
        .collect()
}

/// One-sensor clock with a tight per-append timeout.
fn one_sensor_clock(dispatch_timeout_ms: u64) -> SimulationClock {
    let profiles = vec![SensorProfile::new("A", "a", GeoPoint::new(0.0, 0.0), MovementClass::Slow)];
    let config = TelemetryConfig { seed: Some(1), dispatch_timeout_ms, ..Default::default() };
    ClockBuilder::from_profiles(config, profiles).unwrap().build().unwrap()
}

/// Hold `resource` locked on another thread for `span`.  Returns once the
/// lock is taken.
fn hold<R: Send + 'static>(resource: &Arc<Mutex<R>>, span: Duration) -> std::thread::JoinHandle<()> {
    let resource = Arc::clone(resource);
    let (locked_tx, locked_rx) = std::sync::mpsc::channel();
    let handle = std::thread::spawn(move || {
        let _held = resource.lock();
        locked_tx.send(()).unwrap();
        std::thread::sleep(span);
    });
    locked_rx.recv().unwrap();
    handle
}

/// Counts dispatches that failed by timing out.
#[derive(Default)]
struct TimeoutCounter(usize);

impl ClockObserver for TimeoutCounter {
    fn on_dispatch_failed(&mut self, _sensor: &SensorId, error: &DispatchError) {
        if matches!(error, DispatchError::Timeout(_)) {
            self.0 += 1;
        }
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory_tests {
    use super::*;
    use crate::MemoryStore;
    use wt_aggregate::ReadingSource;
    use wt_sim::ReadingSink;

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        for (s, t) in [("A", 1), ("B", 3), ("A", 2), ("C", 0)] {
            store.append(reading(s, t)).await.unwrap();
        }
        let out = store.fetch_recent(3).await.unwrap();
        assert_eq!(
            ids_and_secs(&out),
            [("B", 3), ("A", 2), ("A", 1)]
        );
    }

    #[tokio::test]
    async fn equal_timestamps_latest_appended_first() {
        let store = MemoryStore::new();
        store.push(reading("A", 5));
        store.push(reading("B", 5));
        let out = store.fetch_recent(10).await.unwrap();
        assert_eq!(out[0].sensor_id.as_str(), "B");
        assert_eq!(out[1].sensor_id.as_str(), "A");
    }

    #[tokio::test]
    async fn fetch_sensor_filters() {
        let store = MemoryStore::new();
        for (s, t) in [("A", 1), ("B", 2), ("A", 3), ("A", 4)] {
            store.push(reading(s, t));
        }
        let out = store.fetch_sensor(&SensorId::from("A"), 2).await.unwrap();
        assert_eq!(ids_and_secs(&out), [("A", 4), ("A", 3)]);
        assert!(store.fetch_sensor(&SensorId::from("Z"), 5).await.unwrap().is_empty());
    }

    #[test]
    fn bounded_store_evicts_oldest() {
        let store = MemoryStore::bounded(3);
        for t in 0..5 {
            store.push(reading("A", t));
        }
        assert_eq!(store.len(), 3);
        let kept: Vec<i64> = ids_and_secs(&store.snapshot()).into_iter().map(|(_, t)| t).collect();
        assert_eq!(kept, [2, 3, 4]);
    }

    #[tokio::test]
    async fn clock_into_store_then_aggregate() {
        use wt_core::SteppedTimeSource;
        use wt_sim::NoopObserver;

        let profiles = (0..4)
            .map(|i| {
                SensorProfile::new(
                    format!("SENSOR-00{i}"),
                    "tracker",
                    GeoPoint::new(-1.3, 36.8),
                    MovementClass::Fast,
                )
            })
            .collect();
        let config = TelemetryConfig { seed: Some(3), ..Default::default() };
        let mut clock = ClockBuilder::from_profiles(config, profiles)
            .unwrap()
            .time_source(SteppedTimeSource::new(at(0), chrono::Duration::seconds(1)))
            .build()
            .unwrap();

        let store = MemoryStore::new();
        clock.run_ticks(6, &store, &mut NoopObserver).await;
        assert_eq!(store.len(), 24);

        let view = wt_aggregate::aggregate(store.fetch_recent(50).await.unwrap());
        assert_eq!(view.len(), 4);
        // The last tick's readings are the newest per sensor.
        let newest = store.fetch_recent(4).await.unwrap();
        for r in newest {
            assert_eq!(view.get(r.sensor_id.as_str()), Some(&r));
        }
    }
}

// ── CsvSink ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{CsvSink, OutputError, READING_COLUMNS};
    use wt_sim::ReadingSink;

    #[test]
    fn header_written_on_create() {
        let dir = tmp();
        let path = dir.path().join("readings.csv");
        let _sink = CsvSink::create(&path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, READING_COLUMNS);
    }

    #[tokio::test]
    async fn rows_visible_after_each_append() {
        let dir = tmp();
        let path = dir.path().join("readings.csv");
        let sink = CsvSink::create(&path).unwrap();
        sink.append(reading("SENSOR-001", 5)).await.unwrap();
        sink.append(reading("SENSOR-002", 5)).await.unwrap();
        assert_eq!(sink.rows(), 2);

        // Read back without calling finish: appends are flushed.
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "SENSOR-001");
        assert_eq!(&rows[0][4], "1");                        // motion
        assert_eq!(&rows[0][5], "98");                       // battery_level
        assert_eq!(&rows[1][6], "2025-03-04T09:00:05.000Z"); // timestamp
    }

    #[test]
    fn finish_idempotent_and_final() {
        let dir = tmp();
        let sink = CsvSink::create(&dir.path().join("r.csv")).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        assert!(matches!(sink.write(&reading("A", 0)), Err(OutputError::Finished)));
    }

    #[tokio::test]
    async fn stalled_write_times_out_and_is_never_written() {
        use wt_sim::RunSummary;

        let dir = tmp();
        let path = dir.path().join("readings.csv");
        let sink = CsvSink::create(&path).unwrap();
        let holder = hold(&sink.state, Duration::from_millis(300));

        let mut clock = one_sensor_clock(20);
        let mut timeouts = TimeoutCounter::default();
        let summary = clock.run_ticks(1, &sink, &mut timeouts).await;
        holder.join().unwrap();

        assert_eq!(summary, RunSummary { ticks: 1, dispatched: 0, failed: 1 });
        assert_eq!(timeouts.0, 1);
        assert_eq!(sink.rows(), 0);
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let path = dir.path().join("nope").join("r.csv");
        assert!(CsvSink::create(&path).is_err());
    }
}

// ── TickCsvObserver ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{MemoryStore, TICK_COLUMNS, TickCsvObserver};
    use wt_sim::RunSummary;

    #[tokio::test]
    async fn one_row_per_tick() {
        let dir = tmp();
        let path = dir.path().join("ticks.csv");
        let mut obs = TickCsvObserver::create(&path).unwrap();

        let profiles = vec![
            SensorProfile::new("A", "a", GeoPoint::new(0.0, 0.0), MovementClass::Slow),
            SensorProfile::new("B", "b", GeoPoint::new(0.0, 0.0), MovementClass::Slow),
        ];
        let config = TelemetryConfig { seed: Some(1), ..Default::default() };
        let mut clock = ClockBuilder::from_profiles(config, profiles).unwrap().build().unwrap();
        let summary = clock.run_ticks(4, &MemoryStore::new(), &mut obs).await;
        obs.on_stop(&summary);
        assert!(obs.take_error().is_none());
        assert_eq!(summary, RunSummary { ticks: 4, dispatched: 8, failed: 0 });

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TICK_COLUMNS);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[3][0], "3");
        assert_eq!(&rows[3][1], "2");
        assert_eq!(&rows[3][2], "0");
    }
}

// ── SqliteStore ───────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::SqliteStore;
    use wt_aggregate::ReadingSource;
    use wt_sim::ReadingSink;

    #[tokio::test]
    async fn schema_created_in_file() {
        let dir = tmp();
        let path = dir.path().join("iot.db");
        let store = SqliteStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.count().await.unwrap(), 0);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='iot_readings'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn stored_readings_read_back_unchanged() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = reading("SENSOR-003", 42);
        store.append(original.clone()).await.unwrap();

        let out = store.fetch_recent(10).await.unwrap();
        assert_eq!(out, [original]);
    }

    #[tokio::test]
    async fn recent_orders_by_time_then_insertion() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (s, t) in [("A", 1), ("B", 2), ("C", 2), ("D", 0)] {
            store.insert(reading(s, t)).await.unwrap();
        }
        let out = store.fetch_recent(3).await.unwrap();
        assert_eq!(
            ids_and_secs(&out),
            [("C", 2), ("B", 2), ("A", 1)]
        );
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn per_sensor_history() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (s, t) in [("A", 1), ("B", 2), ("A", 3)] {
            store.insert(reading(s, t)).await.unwrap();
        }
        let out = store.fetch_sensor(&SensorId::from("A"), 20).await.unwrap();
        assert_eq!(ids_and_secs(&out), [("A", 3), ("A", 1)]);
    }

    #[tokio::test]
    async fn timed_out_insert_is_not_stored() {
        use wt_sim::RunSummary;

        let store = SqliteStore::open_in_memory().unwrap();
        let holder = hold(&store.conn, Duration::from_millis(200));

        let mut clock = one_sensor_clock(20);
        let mut timeouts = TimeoutCounter::default();
        let summary = clock.run_ticks(1, &store, &mut timeouts).await;
        holder.join().unwrap();

        assert_eq!(summary, RunSummary { ticks: 1, dispatched: 0, failed: 1 });
        assert_eq!(timeouts.0, 1);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn checkpoint_idempotent() {
        let dir = tmp();
        let store = SqliteStore::open(&dir.path().join("iot.db")).unwrap();
        store.insert(reading("A", 0)).await.unwrap();
        store.checkpoint().await.unwrap();
        store.checkpoint().await.unwrap();
    }
}
