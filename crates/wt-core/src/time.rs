//! Time model.
//!
//! Two notions of time coexist:
//!
//! - [`Tick`] counts scheduled invocations of the generator across all
//!   sensors.  Tick 0 is the immediate tick fired at clock start.
//! - Reading timestamps are wall-clock instants taken from a [`TimeSource`]
//!   at generation time.  Production uses [`SystemTimeSource`]; tests and
//!   replays inject a [`SteppedTimeSource`] so that timestamps are
//!   reproducible alongside a fixed RNG seed.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, SubsecRound, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeSource ────────────────────────────────────────────────────────────────

/// Supplies the generation instant stamped onto each reading.
///
/// Implementations must be cheap; `now` is called once per sensor per tick,
/// possibly from several threads at once.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real UTC wall clock, truncated to whole milliseconds (the precision
/// readings are serialised with).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Deterministic clock: the first call returns `start`, each further call
/// advances by `step`.
///
/// Every call yields a distinct, strictly increasing instant when `step` is
/// positive, which is what aggregation tests over generated readings want.
#[derive(Debug)]
pub struct SteppedTimeSource {
    start_millis: i64,
    step_millis:  i64,
    calls:        AtomicI64,
}

impl SteppedTimeSource {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start_millis: start.timestamp_millis(),
            step_millis:  step.num_milliseconds(),
            calls:        AtomicI64::new(0),
        }
    }
}

impl TimeSource for SteppedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        let millis = self.start_millis + n * self.step_millis;
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }
}
