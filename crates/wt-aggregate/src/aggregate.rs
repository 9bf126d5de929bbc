//! Most-recent-wins reduction of a reading window.

use serde::Serialize;
use wt_core::{Reading, SensorId};

#[cfg(not(feature = "fx-hash"))]
type SensorMap = std::collections::HashMap<SensorId, Reading>;
#[cfg(feature = "fx-hash")]
type SensorMap = rustc_hash::FxHashMap<SensorId, Reading>;

/// Reduce `readings` to the single most recent reading per sensor.
///
/// - Input order is irrelevant when each sensor's timestamps are distinct.
/// - On equal timestamps for one sensor, the reading seen **first** wins.
/// - Sensors unknown to any configuration are aggregated like any other;
///   this function knows nothing about profiles.
/// - Empty input yields an empty view.
///
/// Pure and single-pass; any number of callers may run it concurrently over
/// their own snapshots.
pub fn aggregate<I>(readings: I) -> AggregatedView
where
    I: IntoIterator<Item = Reading>,
{
    readings.into_iter().collect()
}

/// Current reading per sensor.  A transient projection: recomputed on every
/// refresh, never persisted.
///
/// Serialises as a JSON object keyed by sensor id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregatedView {
    latest: SensorMap,
}

impl AggregatedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into the view.
    ///
    /// Inserts when the sensor is new; replaces only when `reading` is
    /// strictly newer than the stored one.  Returns `true` if the view
    /// changed.
    pub fn absorb(&mut self, reading: Reading) -> bool {
        if let Some(current) = self.latest.get_mut(&reading.sensor_id) {
            if reading.timestamp > current.timestamp {
                *current = reading;
                return true;
            }
            return false;
        }
        self.latest.insert(reading.sensor_id.clone(), reading);
        true
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    pub fn get(&self, sensor: &str) -> Option<&Reading> {
        self.latest.get(sensor)
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.latest.contains_key(sensor)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&SensorId, &Reading)> {
        self.latest.iter()
    }

    /// Readings ordered by sensor id, for stable rendering.
    pub fn sorted(&self) -> Vec<&Reading> {
        let mut out: Vec<&Reading> = self.latest.values().collect();
        out.sort_by(|a, b| a.sensor_id.cmp(&b.sensor_id));
        out
    }

    /// Consume the view, returning readings ordered by sensor id.
    pub fn into_sorted(self) -> Vec<Reading> {
        let mut out: Vec<Reading> = self.latest.into_values().collect();
        out.sort_by(|a, b| a.sensor_id.cmp(&b.sensor_id));
        out
    }
}

impl FromIterator<Reading> for AggregatedView {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        let mut view = AggregatedView::default();
        view.extend(iter);
        view
    }
}

impl Extend<Reading> for AggregatedView {
    fn extend<I: IntoIterator<Item = Reading>>(&mut self, iter: I) {
        for reading in iter {
            self.absorb(reading);
        }
    }
}
