//! Measurement — a single power reading.
//!
//! The unit is carried as an opaque symbol (e.g. `"W"`, `"kW"`). Nothing here
//! converts or normalizes units: comparisons look at the numeric value only and
//! callers are responsible for comparing readings expressed in the same unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable value + unit pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    value: f64,
    unit: String,
}

impl Measurement {
    /// Create a measurement from a numeric value and a unit symbol.
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// `0 W`, the baseline of the highest-per-device aggregation.
    #[must_use]
    pub fn zero_watts() -> Self {
        Self::new(0.0, "W")
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit symbol, empty when the ontology did not declare one.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Whether this reading's numeric value is strictly lower than `other`'s.
    ///
    /// Units are not inspected.
    #[must_use]
    pub fn is_less_than(&self, other: &Self) -> bool {
        self.value < other.value
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_value_and_unit() {
        let m = Measurement::new(60.0, "W");
        assert!((m.value() - 60.0).abs() < f64::EPSILON);
        assert_eq!(m.unit(), "W");
    }

    #[test]
    fn should_compare_on_value_only_when_units_differ() {
        let watts = Measurement::new(500.0, "W");
        let kilowatts = Measurement::new(2.0, "kW");
        assert!(kilowatts.is_less_than(&watts));
        assert!(!watts.is_less_than(&kilowatts));
    }

    #[test]
    fn should_not_be_less_than_when_values_are_equal() {
        let a = Measurement::new(5.0, "W");
        let b = Measurement::new(5.0, "W");
        assert!(!a.is_less_than(&b));
    }

    #[test]
    fn should_display_value_and_unit() {
        assert_eq!(Measurement::new(12.5, "W").to_string(), "12.5 W");
    }

    #[test]
    fn should_display_bare_value_when_unit_is_empty() {
        assert_eq!(Measurement::new(3.0, "").to_string(), "3");
    }

    #[test]
    fn should_serialize_as_value_and_unit_object() {
        let json = serde_json::to_string(&Measurement::new(1.5, "W")).unwrap();
        assert_eq!(json, r#"{"value":1.5,"unit":"W"}"#);
    }
}
