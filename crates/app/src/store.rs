//! Consumption store — the device URI → [`PowerDevice`] table.
//!
//! [`ConsumptionStore`] is a concurrent map with per-device atomicity: every
//! upsert happens under the device's shard lock and every read clones the
//! device out, so a reader never sees a half-applied upsert. There is no
//! cross-device atomicity inside one store.
//!
//! [`SharedStore`] adds whole-store atomicity across reloads: an extraction
//! run fills a fresh store off to the side, then the handle swaps it in. A
//! query pins one snapshot and sees either the old or the new table, never a
//! mix of both.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;

use powermodel_domain::power_device::{MergePolicy, PowerDevice};
use powermodel_domain::power_state::PowerState;

/// Concurrent mapping from device URI to [`PowerDevice`].
#[derive(Debug, Default)]
pub struct ConsumptionStore {
    devices: DashMap<String, PowerDevice>,
    policy: MergePolicy,
}

impl ConsumptionStore {
    /// Create an empty store using [`MergePolicy::InsertOrIgnore`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that adds states according to `policy`.
    #[must_use]
    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            devices: DashMap::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Record `state` for `device_uri`.
    ///
    /// Creates the device when it is unknown; otherwise adds the state to the
    /// existing device following the store's merge policy.
    pub fn upsert_state(&self, device_uri: &str, state: PowerState) {
        match self.devices.entry(device_uri.to_owned()) {
            Entry::Occupied(mut slot) => slot.get_mut().apply(state, self.policy),
            Entry::Vacant(slot) => {
                slot.insert(PowerDevice::with_state(device_uri, state));
            }
        }
    }

    /// Snapshot of one device.
    #[must_use]
    pub fn get(&self, device_uri: &str) -> Option<PowerDevice> {
        self.devices
            .get(device_uri)
            .map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains(&self, device_uri: &str) -> bool {
        self.devices.contains_key(device_uri)
    }

    /// URIs of every known device.
    #[must_use]
    pub fn all_device_uris(&self) -> BTreeSet<String> {
        self.devices.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Snapshot of every device. Each device is internally consistent; the
    /// set of devices is not a point-in-time view if writers are active.
    #[must_use]
    pub fn devices(&self) -> Vec<PowerDevice> {
        self.devices
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// A published store together with the number of swaps that produced it.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// `0` for the initial empty store, incremented on every swap.
    pub generation: u64,
    pub store: Arc<ConsumptionStore>,
}

/// Shared, swappable reference to the current [`ConsumptionStore`].
///
/// Cloning the handle is cheap; all clones observe the same swaps.
#[derive(Debug, Clone)]
pub struct SharedStore {
    sender: Arc<watch::Sender<StoreSnapshot>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(ConsumptionStore::new())
    }
}

impl SharedStore {
    /// Publish `initial` as generation `0`.
    #[must_use]
    pub fn new(initial: ConsumptionStore) -> Self {
        let (sender, _) = watch::channel(StoreSnapshot {
            generation: 0,
            store: Arc::new(initial),
        });
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The store readers should use right now.
    #[must_use]
    pub fn current(&self) -> Arc<ConsumptionStore> {
        Arc::clone(&self.sender.borrow().store)
    }

    /// Atomically make `store` the current store. Returns the new generation.
    pub fn replace(&self, store: ConsumptionStore) -> u64 {
        let store = Arc::new(store);
        let mut generation = 0;
        self.sender.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.store = store;
            generation = snapshot.generation;
        });
        generation
    }

    /// Number of swaps performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.sender.borrow().generation
    }

    /// Whether at least one extraction run has been published.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.generation() > 0
    }

    /// Receiver notified after every swap.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.sender.subscribe()
    }
}
