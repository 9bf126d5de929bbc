//! Fluent builder for constructing a [`SimulationClock`].

use std::sync::Arc;

use wt_core::{SensorProfile, SimRng, SystemTimeSource, TelemetryConfig, Tick, TimeSource};
use wt_sensor::{SensorRngs, SensorStore, SensorStoreBuilder};

use crate::{SimError, SimResult, SimulationClock};

/// Fluent builder for [`SimulationClock`].
///
/// # Required inputs
///
/// - [`TelemetryConfig`] — validated in [`build`](Self::build)
/// - [`SensorStore`] + [`SensorRngs`] — from [`SensorStoreBuilder`], or let
///   [`from_profiles`](Self::from_profiles) build them
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                          |
/// |---------------------|----------------------------------|
/// | `.time_source(t)`   | [`SystemTimeSource`] (UTC now)   |
///
/// # Example
///
/// ```rust,ignore
/// let mut clock = ClockBuilder::from_profiles(config, profiles)?
///     .time_source(SteppedTimeSource::new(start, Duration::seconds(5)))
///     .build()?;
/// ```
pub struct ClockBuilder {
    config:  TelemetryConfig,
    sensors: SensorStore,
    rngs:    SensorRngs,
    time:    Option<Arc<dyn TimeSource>>,
}

impl ClockBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: TelemetryConfig, sensors: SensorStore, rngs: SensorRngs) -> Self {
        Self { config, sensors, rngs, time: None }
    }

    /// Build the sensor store from `profiles`, seeding RNGs from
    /// `config.seed` (or OS entropy when unset) and starting every battery
    /// at `config.battery_initial`.
    pub fn from_profiles(config: TelemetryConfig, profiles: Vec<SensorProfile>) -> SimResult<Self> {
        let seed = config
            .seed
            .unwrap_or_else(|| SimRng::from_entropy().random::<u64>());
        let (sensors, rngs) = SensorStoreBuilder::new(seed)
            .profiles(profiles)
            .initial_battery(config.battery_initial)
            .build()?;
        Ok(Self::new(config, sensors, rngs))
    }

    /// Supply the source of reading timestamps.
    pub fn time_source(mut self, time: impl TimeSource + 'static) -> Self {
        self.time = Some(Arc::new(time));
        self
    }

    /// Validate the configuration and inputs and return a ready-to-run clock.
    ///
    /// # Errors
    ///
    /// Any configuration that fails [`TelemetryConfig::validate`], and
    /// mismatched store/RNG lengths.
    pub fn build(self) -> SimResult<SimulationClock> {
        self.config.validate()?;

        let sensor_count = self.sensors.len();
        if self.rngs.len() != sensor_count {
            return Err(SimError::SensorCountMismatch {
                expected: sensor_count,
                got:      self.rngs.len(),
                what:     "sensor RNGs",
            });
        }
        if self.sensors.states.len() != sensor_count {
            return Err(SimError::SensorCountMismatch {
                expected: sensor_count,
                got:      self.sensors.states.len(),
                what:     "sensor states",
            });
        }

        Ok(SimulationClock {
            config:  self.config,
            tick:    Tick::ZERO,
            sensors: self.sensors,
            rngs:    self.rngs,
            time:    self.time.unwrap_or_else(|| Arc::new(SystemTimeSource)),
        })
    }
}
