//! Core error types.
//!
//! Sub-crates define their own error enums and wrap `WtError` as one variant
//! where configuration problems can surface through them.

use thiserror::Error;

use crate::SensorId;

/// The top-level error type for `wt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("sensor {0} is configured more than once")]
    DuplicateSensor(SensorId),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wt-*` crates.
pub type WtResult<T> = Result<T, WtError>;

/// Why a [`RawReading`][crate::RawReading] was refused at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadingError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),

    #[error("sensorId is empty")]
    EmptySensorId,

    #[error("batteryLevel {0} is outside 0..=100")]
    BatteryOutOfRange(f64),
}
