//! Consumption kinds and the query result type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;
use crate::time::{Timestamp, now};

/// Which of the three readings of a state a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionKind {
    /// Declared typical consumption.
    Typical,
    /// Rated (nameplate) consumption.
    Nominal,
    /// Measured consumption.
    Actual,
}

impl ConsumptionKind {
    /// All kinds, in the order the best-consumption rule visits them.
    pub const ALL: [Self; 3] = [Self::Typical, Self::Nominal, Self::Actual];
}

impl fmt::Display for ConsumptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typical => f.write_str("typical"),
            Self::Nominal => f.write_str("nominal"),
            Self::Actual => f.write_str("actual"),
        }
    }
}

/// The answer to a consumption query: which device, which reading, and when
/// the answer was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePowerConsumption {
    pub device_uri: String,
    pub consumption: Measurement,
    pub retrieved_at: Timestamp,
}

impl DevicePowerConsumption {
    /// Wrap a reading for `device_uri`, stamped with the current time.
    #[must_use]
    pub fn new(device_uri: impl Into<String>, consumption: Measurement) -> Self {
        Self {
            device_uri: device_uri.into(),
            consumption,
            retrieved_at: now(),
        }
    }
}
