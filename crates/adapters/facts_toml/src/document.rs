//! Serde model of the facts document.

use serde::Deserialize;

use powermodel_domain::consumption::ConsumptionKind;
use powermodel_domain::fact::{RawFact, RawMeasurement};

use crate::error::FactsFileError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FactsDocument {
    pub ontology: Option<String>,
    pub consumption: Vec<ConsumptionRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConsumptionRow {
    device: String,
    state: String,
    #[serde(default)]
    measurement: Vec<MeasurementRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeasurementRow {
    kind: ConsumptionKind,
    value: Option<LiteralValue>,
    unit: Option<String>,
}

/// TOML allows bare numbers as well as quoted literals.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LiteralValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl LiteralValue {
    fn into_literal(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

impl FactsDocument {
    pub(crate) fn parse(text: &str) -> Result<Self, FactsFileError> {
        toml::from_str(text).map_err(FactsFileError::Parse)
    }

    pub(crate) fn into_facts(self) -> Vec<RawFact> {
        self.consumption
            .into_iter()
            .map(ConsumptionRow::into_fact)
            .collect()
    }
}

impl ConsumptionRow {
    fn into_fact(self) -> RawFact {
        RawFact {
            device_uri: self.device,
            state_name: self.state,
            measurements: self
                .measurement
                .into_iter()
                .map(|row| RawMeasurement {
                    kind: row.kind,
                    value: row.value.map(LiteralValue::into_literal),
                    unit: row.unit,
                })
                .collect(),
        }
    }
}
