//! Ontology events — notifications that a (new) ontology is available.

use serde::{Deserialize, Serialize};

use crate::id::LoadId;
use crate::time::{Timestamp, now};

/// Something that happened to the ontology backing the power model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OntologyEvent {
    /// The ontology was loaded or reloaded and facts can be extracted.
    Loaded {
        load_id: LoadId,
        /// Ontology IRI or a human-readable source description.
        ontology: String,
        at: Timestamp,
    },
}

impl OntologyEvent {
    /// A fresh [`Loaded`](Self::Loaded) event with a new load id.
    #[must_use]
    pub fn loaded(ontology: impl Into<String>) -> Self {
        Self::Loaded {
            load_id: LoadId::new(),
            ontology: ontology.into(),
            at: now(),
        }
    }

    #[must_use]
    pub fn load_id(&self) -> LoadId {
        match self {
            Self::Loaded { load_id, .. } => *load_id,
        }
    }
}
