//! Sensor identifiers.
//!
//! Two kinds of identity exist side by side:
//!
//! - [`SensorId`] is the external, human-assigned key (`"SENSOR-001"`).  It is
//!   what readings carry on the wire and what the aggregator groups by.
//! - [`SensorIndex`] is the dense position of a profile in configuration
//!   order.  Per-sensor arrays (states, RNGs) are indexed by it, and it feeds
//!   the per-sensor RNG seed so that seeds do not depend on string hashing.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── SensorId ──────────────────────────────────────────────────────────────────

/// External sensor key, serialised as a plain string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(pub String);

impl SensorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SensorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for SensorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── SensorIndex ───────────────────────────────────────────────────────────────

/// Slot of a sensor in configuration order.  Max ~4.3 billion sensors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SensorIndex(pub u32);

impl SensorIndex {
    /// Sentinel meaning "no valid slot".
    pub const INVALID: SensorIndex = SensorIndex(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for SensorIndex {
    /// Returns the `INVALID` sentinel so uninitialized slots are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SensorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensorIndex({})", self.0)
    }
}

impl From<SensorIndex> for usize {
    #[inline(always)]
    fn from(id: SensorIndex) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for SensorIndex {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<SensorIndex, Self::Error> {
        u32::try_from(n).map(SensorIndex)
    }
}
