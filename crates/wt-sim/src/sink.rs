//! The `ReadingSink` trait: where generated readings go.

use async_trait::async_trait;
use wt_core::Reading;

/// Boxed error returned by sink backends.  Any `std::error::Error + Send +
/// Sync` converts into it with `?`.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Append-only destination for readings (a database table, an HTTP
/// endpoint, a CSV file, an in-memory log…).
///
/// The clock calls `append` once per reading, sequentially, roughly
/// `sensor_count / tick_interval` times per second.  Each call receives
/// ownership of one complete reading; implementations must write it as a
/// single unit.  The clock bounds every call with its dispatch timeout and
/// never retries, so any retry policy belongs inside the sink.
#[async_trait]
pub trait ReadingSink: Send + Sync {
    async fn append(&self, reading: Reading) -> Result<(), SinkError>;
}
