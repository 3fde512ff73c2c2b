//! Identifier of one extraction run.
//!
//! Devices and states are keyed by the strings the ontology gives them, so the
//! only generated identifier is the one correlating a single ontology load with
//! the logs of the extraction it triggers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one ontology (re)load and the extraction run it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadId(uuid::Uuid);

impl Default for LoadId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl LoadId {
    /// Generate a new random load identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(LoadId::new(), LoadId::new());
    }

    #[test]
    fn should_serialize_as_bare_uuid_string_when_encoded() {
        let id = LoadId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
