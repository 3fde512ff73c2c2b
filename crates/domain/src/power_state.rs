//! Power state — the typical / nominal / actual readings of one operating mode.
//!
//! Identity is the state name alone: two `PowerState` values with the same
//! name are equal whatever readings they carry. Partial extractions of the
//! same state therefore collapse onto one entry inside a
//! [`PowerDevice`](crate::power_device::PowerDevice).

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::consumption::ConsumptionKind;
use crate::error::{PowerModelError, ValidationError};
use crate::measurement::Measurement;

/// Named operating mode of a device with up to three power readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerState {
    name: String,
    typical: Option<Measurement>,
    nominal: Option<Measurement>,
    actual: Option<Measurement>,
}

impl PowerState {
    /// Create a state with no readings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typical: None,
            nominal: None,
            actual: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PowerModelError::Validation`] when the name is empty.
    pub fn validate(&self) -> Result<(), PowerModelError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyStateName.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_typical(&mut self, value: f64, unit: impl Into<String>) {
        self.typical = Some(Measurement::new(value, unit));
    }

    pub fn set_nominal(&mut self, value: f64, unit: impl Into<String>) {
        self.nominal = Some(Measurement::new(value, unit));
    }

    pub fn set_actual(&mut self, value: f64, unit: impl Into<String>) {
        self.actual = Some(Measurement::new(value, unit));
    }

    /// Set the reading of the given kind. Last write wins.
    pub fn set(&mut self, kind: ConsumptionKind, measurement: Measurement) {
        *self.slot_mut(kind) = Some(measurement);
    }

    #[must_use]
    pub fn has_typical(&self) -> bool {
        self.typical.is_some()
    }

    #[must_use]
    pub fn has_nominal(&self) -> bool {
        self.nominal.is_some()
    }

    #[must_use]
    pub fn has_actual(&self) -> bool {
        self.actual.is_some()
    }

    #[must_use]
    pub fn typical(&self) -> Option<&Measurement> {
        self.typical.as_ref()
    }

    #[must_use]
    pub fn nominal(&self) -> Option<&Measurement> {
        self.nominal.as_ref()
    }

    #[must_use]
    pub fn actual(&self) -> Option<&Measurement> {
        self.actual.as_ref()
    }

    /// Reading of the given kind, if present.
    #[must_use]
    pub fn get(&self, kind: ConsumptionKind) -> Option<&Measurement> {
        match kind {
            ConsumptionKind::Typical => self.typical.as_ref(),
            ConsumptionKind::Nominal => self.nominal.as_ref(),
            ConsumptionKind::Actual => self.actual.as_ref(),
        }
    }

    /// Present readings, in typical → nominal → actual order.
    pub fn readings(&self) -> impl Iterator<Item = (ConsumptionKind, &Measurement)> {
        ConsumptionKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|m| (kind, m)))
    }

    /// Whether no reading at all is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.typical.is_none() && self.nominal.is_none() && self.actual.is_none()
    }

    /// Field-level merge: every reading present in `other` overwrites ours.
    pub fn merge_from(&mut self, other: Self) {
        let Self {
            typical,
            nominal,
            actual,
            ..
        } = other;
        if typical.is_some() {
            self.typical = typical;
        }
        if nominal.is_some() {
            self.nominal = nominal;
        }
        if actual.is_some() {
            self.actual = actual;
        }
    }

    fn slot_mut(&mut self, kind: ConsumptionKind) -> &mut Option<Measurement> {
        match kind {
            ConsumptionKind::Typical => &mut self.typical,
            ConsumptionKind::Nominal => &mut self.nominal,
            ConsumptionKind::Actual => &mut self.actual,
        }
    }
}

impl PartialEq for PowerState {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PowerState {}

impl Hash for PowerState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
