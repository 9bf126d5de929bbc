//! `wt-sensor` — per-sensor runtime state and the reading generator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`state`]     | `SensorState` — position, battery, counters of one sensor      |
//! | [`store`]     | `SensorStore` (profiles + states) and `SensorRngs`             |
//! | [`builder`]   | `SensorStoreBuilder` — validates profiles, seeds RNGs          |
//! | [`generator`] | `generate` — advance one sensor by one tick, emit a `Reading`  |
//!
//! # Motion model
//!
//! Each sensor performs an independent bounded random walk around its base
//! location:
//!
//! 1. Step both axes by a uniform delta in `[-step/2, +step/2]`, where
//!    `step` depends on the profile's movement class.
//! 2. If the new position lies farther than the geofence radius from the
//!    base location, jump back to the base location plus a small uniform
//!    jitter on each axis (a reset, not a clamp).
//! 3. Drain the battery by a uniform amount, never below the floor.
//!
//! Temperature and motion are drawn fresh every tick with no memory.

pub mod builder;
pub mod generator;
pub mod state;
pub mod store;


pub use builder::SensorStoreBuilder;
pub use generator::generate;
pub use state::SensorState;
pub use store::{SensorRngs, SensorStore};
