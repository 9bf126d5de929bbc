//! `wt-aggregate` — from a window of stored readings to "where is every
//! sensor now".
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`source`]    | `ReadingSource` — fetch the most recent N readings              |
//! | [`aggregate`] | `aggregate`, `AggregatedView` — most-recent-wins reduction      |
//! | [`boundary`]  | `validate_batch`, `parse_batch_json` — reject malformed input   |
//! | [`live`]      | `LiveView` — periodic refresh with last-known-position fallback |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the per-sensor map.       |

pub mod aggregate;
pub mod boundary;
pub mod live;
pub mod source;


pub use aggregate::{AggregatedView, aggregate};
pub use boundary::{parse_batch_json, validate_batch};
pub use live::{LiveSnapshot, LiveView};
pub use source::{DEFAULT_RECENT_LIMIT, DEFAULT_SENSOR_LIMIT, ReadingSource, SourceError};
