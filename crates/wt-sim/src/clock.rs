//! The `SimulationClock` and its tick loop.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wt_core::{Reading, TelemetryConfig, Tick, TimeSource};
use wt_sensor::{SensorRngs, SensorStore, generate};

use crate::{ClockObserver, DispatchError, ReadingSink};

// ── Reports ───────────────────────────────────────────────────────────────────

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick:       Tick,
    /// Readings the sink accepted.
    pub dispatched: usize,
    /// Readings dropped after a sink error or timeout.
    pub failed:     usize,
}

/// Totals over a whole `run` / `run_ticks` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks:      u64,
    pub dispatched: u64,
    pub failed:     u64,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks      += 1;
        self.dispatched += report.dispatched as u64;
        self.failed     += report.failed as u64;
    }
}

// ── SimulationClock ───────────────────────────────────────────────────────────

/// Drives every sensor one step per tick and dispatches the readings.
///
/// The clock exclusively owns all sensor states and RNGs; nothing else
/// mutates them, so no locking is involved.  Create via
/// [`ClockBuilder`][crate::ClockBuilder].
pub struct SimulationClock {
    /// Validated configuration.
    pub config: TelemetryConfig,

    /// The next tick to run.
    pub tick: Tick,

    /// Profiles and states, in dispatch order.
    pub sensors: SensorStore,

    /// Per-sensor deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: SensorRngs,

    pub(crate) time: Arc<dyn TimeSource>,
}

impl SimulationClock {
    // ── Public API ────────────────────────────────────────────────────────

    /// Tick on the configured interval until `stop` is cancelled.
    ///
    /// The first tick runs immediately.  A tick that overruns the interval
    /// delays the next one instead of triggering a catch-up burst.  Stop is
    /// checked before every tick; a tick already dispatching runs to
    /// completion.
    pub async fn run<S, O>(
        &mut self,
        sink:     &S,
        observer: &mut O,
        stop:     &CancellationToken,
    ) -> RunSummary
    where
        S: ReadingSink + ?Sized,
        O: ClockObserver,
    {
        let mut ticker = interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            sensors     = self.sensors.len(),
            interval_ms = self.config.tick_interval_ms,
            "simulation clock started"
        );

        let mut summary = RunSummary::default();
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let report = self.step(sink, observer).await;
            summary.record(&report);
        }

        info!(
            ticks      = summary.ticks,
            dispatched = summary.dispatched,
            failed     = summary.failed,
            "simulation clock stopped"
        );
        observer.on_stop(&summary);
        summary
    }

    /// Run exactly `n` ticks back to back, ignoring the interval.
    ///
    /// Useful for tests, replays, and backfilling a fresh store.
    pub async fn run_ticks<S, O>(&mut self, n: u64, sink: &S, observer: &mut O) -> RunSummary
    where
        S: ReadingSink + ?Sized,
        O: ClockObserver,
    {
        let mut summary = RunSummary::default();
        for _ in 0..n {
            let report = self.step(sink, observer).await;
            summary.record(&report);
        }
        summary
    }

    /// Run a single tick: generate, then dispatch.
    pub async fn step<S, O>(&mut self, sink: &S, observer: &mut O) -> TickReport
    where
        S: ReadingSink + ?Sized,
        O: ClockObserver,
    {
        let tick = self.tick;
        observer.on_tick_start(tick);

        let readings = self.generate_tick();
        let report = self.dispatch(tick, readings, sink, observer).await;

        debug!(%tick, dispatched = report.dispatched, failed = report.failed, "tick complete");
        observer.on_tick_end(&report);
        self.tick = tick.next();
        report
    }

    /// Generation phase only: advance every sensor by one step and return
    /// one reading per sensor, in configuration order.
    ///
    /// Timestamps are taken up front, one per sensor in configuration order,
    /// so a deterministic time source stamps the same sensor with the same
    /// instant whether or not generation runs in parallel.
    pub fn generate_tick(&mut self) -> Vec<Reading> {
        let stamps: Vec<DateTime<Utc>> = (0..self.sensors.len()).map(|_| self.time.now()).collect();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let config   = &self.config;
        let profiles = self.sensors.profiles.as_slice();
        let states   = &mut self.sensors.states;
        let rngs     = &mut self.rngs.inner;

        #[cfg(not(feature = "parallel"))]
        {
            profiles
                .iter()
                .zip(states.iter_mut())
                .zip(rngs.iter_mut())
                .zip(stamps)
                .map(|(((profile, state), rng), now)| generate(profile, state, config, rng, now))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Indexed parallel iterators: `collect` keeps configuration order.
            profiles
                .par_iter()
                .zip(states.par_iter_mut())
                .zip(rngs.par_iter_mut())
                .zip(stamps.into_par_iter())
                .map(|(((profile, state), rng), now)| generate(profile, state, config, rng, now))
                .collect()
        }
    }

    // ── Dispatch phase ────────────────────────────────────────────────────

    /// Hand each reading to the sink in order.  One reading's failure never
    /// affects the others, and nothing is retried within the tick.
    async fn dispatch<S, O>(
        &self,
        tick:     Tick,
        readings: Vec<Reading>,
        sink:     &S,
        observer: &mut O,
    ) -> TickReport
    where
        S: ReadingSink + ?Sized,
        O: ClockObserver,
    {
        let limit = self.config.dispatch_timeout();
        let mut report = TickReport { tick, dispatched: 0, failed: 0 };

        for reading in readings {
            observer.on_reading(&reading);
            let sensor = reading.sensor_id.clone();

            let error = match timeout(limit, sink.append(reading)).await {
                Ok(Ok(()))  => None,
                Ok(Err(e))  => Some(DispatchError::Sink(e)),
                Err(_)      => Some(DispatchError::Timeout(limit)),
            };

            match error {
                None => report.dispatched += 1,
                Some(err) => {
                    warn!(%tick, %sensor, error = %err, "reading dropped");
                    observer.on_dispatch_failed(&sensor, &err);
                    report.failed += 1;
                }
            }
        }
        report
    }
}
