//! `wt-output` — where readings go, and where the live map reads them back.
//!
//! Backends:
//!
//! | Feature   | Type                 | Sink | Source | Storage                         |
//! |-----------|----------------------|------|--------|---------------------------------|
//! | *(none)*  | [`MemoryStore`]      | yes  | yes    | bounded in-memory log           |
//! | *(none)*  | [`CsvSink`]          | yes  | no     | one CSV row per reading         |
//! | `sqlite`  | `SqliteStore`        | yes  | yes    | `iot_readings` table            |
//!
//! Sinks implement `wt_sim::ReadingSink`; sources implement
//! `wt_aggregate::ReadingSource`.  [`TickCsvObserver`] is a
//! `wt_sim::ClockObserver` that logs one summary row per tick.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wt_output::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::bounded(10_000));
//! clock.run(&*store, &mut NoopObserver, &stop).await;
//! let view = LiveView::new(store).refresh().await;
//! ```

mod blocking;
pub mod csv;
pub mod error;
pub mod memory;
pub mod observer;
pub mod row;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryStore;
pub use observer::TickCsvObserver;
pub use row::{READING_COLUMNS, TICK_COLUMNS};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
