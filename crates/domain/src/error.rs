//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PowerModelError`] via `#[from]` (or a manual `From` for adapters).

use std::num::ParseFloatError;

use crate::consumption::ConsumptionKind;

/// Top-level error shared by every layer of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PowerModelError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A single extracted fact could not be turned into a power state.
    #[error("extraction error")]
    Extraction(#[from] ExtractionError),

    /// The fact source (reasoning collaborator) failed.
    #[error("fact source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device URI must not be empty.
    #[error("device URI must not be empty")]
    EmptyDeviceUri,

    /// A state name must not be empty.
    #[error("state name must not be empty")]
    EmptyStateName,
}

/// Per-fact extraction failures. Never fatal for a whole run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    /// The raw power value is not a decimal number.
    #[error("{kind} consumption value {raw:?} is not a number")]
    InvalidValue {
        /// Which reading carried the value.
        kind: ConsumptionKind,
        /// The raw literal as received.
        raw: String,
        #[source]
        source: ParseFloatError,
    },

    /// The raw power value parsed to NaN or an infinity.
    #[error("{kind} consumption value {raw:?} is not finite")]
    NonFiniteValue {
        /// Which reading carried the value.
        kind: ConsumptionKind,
        /// The raw literal as received.
        raw: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_value_with_kind_and_raw() {
        let source = "abc".parse::<f64>().unwrap_err();
        let err = ExtractionError::InvalidValue {
            kind: ConsumptionKind::Nominal,
            raw: "abc".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "nominal consumption value \"abc\" is not a number"
        );
    }

    #[test]
    fn should_convert_validation_error_into_power_model_error() {
        let err: PowerModelError = ValidationError::EmptyStateName.into();
        assert!(matches!(
            err,
            PowerModelError::Validation(ValidationError::EmptyStateName)
        ));
    }

    #[test]
    fn should_convert_extraction_error_into_power_model_error() {
        let err: PowerModelError = ExtractionError::NonFiniteValue {
            kind: ConsumptionKind::Actual,
            raw: "NaN".to_string(),
        }
        .into();
        assert!(matches!(err, PowerModelError::Extraction(_)));
    }
}
