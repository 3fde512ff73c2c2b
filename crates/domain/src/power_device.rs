//! Power device — a device URI and the power states declared for it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::power_state::PowerState;

/// How [`PowerDevice::add_state`] treats a state whose name is already known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keep the first state with a given name and ignore later ones.
    ///
    /// A typical reading extracted in one fact and a nominal reading extracted
    /// in another fact for the same state name do **not** combine: the second
    /// fact's readings are dropped.
    #[default]
    InsertOrIgnore,
    /// Combine readings: present fields of the incoming state overwrite the
    /// stored ones, absent fields are left untouched.
    Merge,
}

/// A device and its states, keyed by state name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerDevice {
    uri: String,
    states: BTreeMap<String, PowerState>,
}

impl PowerDevice {
    /// Create a device with no states.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            states: BTreeMap::new(),
        }
    }

    /// Create a device holding a single state.
    #[must_use]
    pub fn with_state(uri: impl Into<String>, state: PowerState) -> Self {
        let mut device = Self::new(uri);
        device.add_state(state);
        device
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Insert `state` unless a state with the same name is already present.
    ///
    /// Returns `true` when the state was inserted. An incoming duplicate is
    /// dropped as a whole: none of its readings reach the stored state.
    pub fn add_state(&mut self, state: PowerState) -> bool {
        match self.states.entry(state.name().to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(state);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Insert `state`, or merge its readings into the stored state of the
    /// same name.
    pub fn merge_state(&mut self, state: PowerState) {
        if let Some(existing) = self.states.get_mut(state.name()) {
            existing.merge_from(state);
        } else {
            self.states.insert(state.name().to_owned(), state);
        }
    }

    /// Add `state` according to `policy`.
    pub fn apply(&mut self, state: PowerState, policy: MergePolicy) {
        match policy {
            MergePolicy::InsertOrIgnore => {
                self.add_state(state);
            }
            MergePolicy::Merge => self.merge_state(state),
        }
    }

    /// State with exactly this name (case-sensitive).
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&PowerState> {
        self.states.get(name)
    }

    /// All states, ordered by name.
    pub fn states(&self) -> impl Iterator<Item = &PowerState> {
        self.states.values()
    }

    /// Distinct state names, ordered.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
