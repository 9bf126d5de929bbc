//! Static identity of a tracked animal's collar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, SensorId};

/// How far a tracked animal roams per tick.  The step size in degrees for
/// each class comes from [`MovementSteps`][crate::MovementSteps].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementClass {
    /// Elephants, gorillas.
    Slow,
    /// Cheetahs.
    Fast,
    /// Also the fallback for unrecognised class names in configuration.
    /// Must stay the last variant for `#[serde(other)]`.
    #[default]
    #[serde(other)]
    Medium,
}

impl fmt::Display for MovementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MovementClass::Slow   => "slow",
            MovementClass::Medium => "medium",
            MovementClass::Fast   => "fast",
        };
        f.write_str(s)
    }
}

/// Immutable description of one sensor, created at process start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorProfile {
    pub id: SensorId,

    /// Display name, e.g. "Cheetah Tracker Beta".
    #[serde(default)]
    pub name: String,

    /// Anchor point of the geofence.
    pub base_location: GeoPoint,

    #[serde(default)]
    pub movement_class: MovementClass,
}

impl SensorProfile {
    pub fn new(
        id:             impl Into<SensorId>,
        name:           impl Into<String>,
        base_location:  GeoPoint,
        movement_class: MovementClass,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_location,
            movement_class,
        }
    }
}
