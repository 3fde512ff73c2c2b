//! Raw facts — what the reasoning collaborator hands over per
//! `ElectricPowerConsumption` individual.
//!
//! A fact names a device, one of its states, and zero to three measurement
//! descriptors whose numeric value is still an unparsed literal.

use serde::{Deserialize, Serialize};

use crate::consumption::ConsumptionKind;
use crate::error::ExtractionError;

/// One extracted consumption fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFact {
    pub device_uri: String,
    pub state_name: String,
    pub measurements: Vec<RawMeasurement>,
}

/// One measurement descriptor of a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub kind: ConsumptionKind,
    /// Power value literal. `None` when the measurement individual has no
    /// power value at all.
    pub value: Option<String>,
    /// Unit symbol. `None` when no unit is attached.
    pub unit: Option<String>,
}

impl RawFact {
    /// Start a fact with no measurements.
    #[must_use]
    pub fn new(device_uri: impl Into<String>, state_name: impl Into<String>) -> Self {
        Self {
            device_uri: device_uri.into(),
            state_name: state_name.into(),
            measurements: Vec::new(),
        }
    }

    /// Append a measurement descriptor.
    #[must_use]
    pub fn with_measurement(
        mut self,
        kind: ConsumptionKind,
        value: impl Into<String>,
        unit: Option<&str>,
    ) -> Self {
        self.measurements.push(RawMeasurement {
            kind,
            value: Some(value.into()),
            unit: unit.map(str::to_owned),
        });
        self
    }
}

impl RawMeasurement {
    /// Parse the power value literal.
    ///
    /// Returns `Ok(None)` when there is no literal. Surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidValue`] when the literal is not a
    /// decimal number and [`ExtractionError::NonFiniteValue`] when it parses
    /// to NaN or an infinity.
    pub fn parse_value(&self) -> Result<Option<f64>, ExtractionError> {
        let Some(raw) = self.value.as_deref() else {
            return Ok(None);
        };
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|source| ExtractionError::InvalidValue {
                kind: self.kind,
                raw: raw.to_owned(),
                source,
            })?;
        if !value.is_finite() {
            return Err(ExtractionError::NonFiniteValue {
                kind: self.kind,
                raw: raw.to_owned(),
            });
        }
        Ok(Some(value))
    }

    /// Unit symbol if one was supplied and is not blank.
    #[must_use]
    pub fn unit_symbol(&self) -> Option<&str> {
        self.unit.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
