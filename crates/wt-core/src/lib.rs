//! `wt-core` — foundational types for the `wildtrack` telemetry feed.
//!
//! This crate is a dependency of every other `wt-*` crate.  It has no `wt-*`
//! dependencies and a small external footprint (`rand`, `thiserror`, `serde`,
//! `serde_json`, `chrono`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `SensorId` (string key), `SensorIndex` (dense slot)       |
//! | [`geo`]         | `GeoPoint`, degree-space and haversine distance           |
//! | [`time`]        | `Tick`, `TimeSource`, `SystemTimeSource`, `SteppedTimeSource` |
//! | [`rng`]         | `SensorRng` (per-sensor), `SimRng` (run-level)            |
//! | [`profile`]     | `SensorProfile`, `MovementClass`                          |
//! | [`reading`]     | `Reading` (wire shape), `RawReading` (boundary form)      |
//! | [`config`]      | `TelemetryConfig`, `MovementSteps`                        |
//! | [`error`]       | `WtError`, `WtResult`, `ReadingError`                     |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod profile;
pub mod reading;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MovementSteps, TelemetryConfig};
pub use error::{ReadingError, WtError, WtResult};
pub use geo::GeoPoint;
pub use ids::{SensorId, SensorIndex};
pub use profile::{MovementClass, SensorProfile};
pub use reading::{RawReading, Reading};
pub use rng::{SensorRng, SimRng};
pub use time::{SteppedTimeSource, SystemTimeSource, Tick, TimeSource};
