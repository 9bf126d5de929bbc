//! Clock observer trait for progress reporting and data collection.

use wt_core::{Reading, SensorId, Tick};

use crate::{DispatchError, RunSummary, TickReport};

/// Callbacks invoked by [`SimulationClock`][crate::SimulationClock] at key
/// points of each tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — per-sensor failure counter
///
/// ```rust,ignore
/// struct FailureCounter(HashMap<SensorId, u64>);
///
/// impl ClockObserver for FailureCounter {
///     fn on_dispatch_failed(&mut self, sensor: &SensorId, _err: &DispatchError) {
///         *self.0.entry(sensor.clone()).or_default() += 1;
///     }
/// }
/// ```
pub trait ClockObserver: Send {
    /// Called at the very start of each tick, before generation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every generated reading, just before it is dispatched.
    fn on_reading(&mut self, _reading: &Reading) {}

    /// Called when the sink rejected a reading or timed out.  The reading
    /// has been dropped.
    fn on_dispatch_failed(&mut self, _sensor: &SensorId, _error: &DispatchError) {}

    /// Called after the last dispatch of a tick.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once when `run` returns.
    fn on_stop(&mut self, _summary: &RunSummary) {}
}

/// A [`ClockObserver`] that does nothing.
pub struct NoopObserver;

impl ClockObserver for NoopObserver {}
