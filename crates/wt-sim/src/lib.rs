//! `wt-sim` — the simulation clock for the wildtrack telemetry feed.
//!
//! # Two-phase tick
//!
//! ```text
//! tick 0 fires immediately, then one tick every config.tick_interval():
//!   ① Generate  — advance every SensorState by one step and collect one
//!                 Reading per sensor, in configuration order
//!                 (parallel with the `parallel` feature).
//!   ② Dispatch  — hand each Reading to the ReadingSink, one at a time, each
//!                 call bounded by config.dispatch_timeout().  A failure or
//!                 timeout drops that reading only; the tick carries on.
//! ```
//!
//! Cancellation is cooperative: once the stop token fires, the tick in
//! progress finishes dispatching and no further tick starts.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the generation phase on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//! use wt_sim::{ClockBuilder, NoopObserver};
//!
//! let mut clock = ClockBuilder::from_profiles(config, profiles)?.build()?;
//! let stop = CancellationToken::new();
//! let summary = clock.run(&sink, &mut NoopObserver, &stop).await;
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod observer;
pub mod sink;


pub use builder::ClockBuilder;
pub use clock::{RunSummary, SimulationClock, TickReport};
pub use error::{DispatchError, SimError, SimResult};
pub use observer::{ClockObserver, NoopObserver};
pub use sink::{ReadingSink, SinkError};
