//! The `ReadingSource` trait: where stored readings come back from.

use async_trait::async_trait;
use wt_core::{Reading, SensorId};

/// Window the live map asks for on each refresh.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// History length for a single sensor's detail view.
pub const DEFAULT_SENSOR_LIMIT: usize = 20;

/// Boxed error returned by source backends.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Read side of a reading store.
///
/// Results are conventionally most-recent-first, but consumers (the
/// aggregator in particular) must not rely on any order.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Up to `limit` of the newest readings across all sensors.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Reading>, SourceError>;

    /// Up to `limit` of the newest readings of one sensor.
    async fn fetch_sensor(&self, sensor: &SensorId, limit: usize) -> Result<Vec<Reading>, SourceError>;
}
