//! Query service — read API over the current consumption store.
//!
//! Every call pins the store snapshot current at its start, so an answer is
//! never assembled from two different extraction runs.
//!
//! State-name matching is exact for the single-reading queries and
//! case-insensitive for [`QueryService::get_best`] (and therefore for
//! [`QueryService::get_highest_per_device`]).

use powermodel_domain::consumption::{ConsumptionKind, DevicePowerConsumption};
use powermodel_domain::measurement::Measurement;
use powermodel_domain::power_device::PowerDevice;

use crate::store::SharedStore;

/// Application service answering power consumption queries.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: SharedStore,
}

impl QueryService {
    /// Create a new service reading from `store`.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Measured consumption of `device_uri` in `state_name`.
    #[must_use]
    pub fn get_actual(&self, device_uri: &str, state_name: &str) -> Option<DevicePowerConsumption> {
        self.reading(ConsumptionKind::Actual, device_uri, state_name)
    }

    /// Rated consumption of `device_uri` in `state_name`.
    #[must_use]
    pub fn get_nominal(
        &self,
        device_uri: &str,
        state_name: &str,
    ) -> Option<DevicePowerConsumption> {
        self.reading(ConsumptionKind::Nominal, device_uri, state_name)
    }

    /// Declared typical consumption of `device_uri` in `state_name`.
    #[must_use]
    pub fn get_typical(
        &self,
        device_uri: &str,
        state_name: &str,
    ) -> Option<DevicePowerConsumption> {
        self.reading(ConsumptionKind::Typical, device_uri, state_name)
    }

    /// Best-known consumption of `device_uri` in `state_name`.
    ///
    /// "Best" is the **highest** of the typical, nominal and actual readings
    /// of every state whose name matches `state_name` ignoring case. See
    /// [`best_reading`] for the exact selection order.
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_best(&self, device_uri: &str, state_name: &str) -> Option<DevicePowerConsumption> {
        let store = self.store.current();
        let Some(device) = store.get(device_uri) else {
            tracing::debug!(%device_uri, "device has no declared power consumption");
            return None;
        };
        best_reading(&device, state_name)
            .map(|best| DevicePowerConsumption::new(device_uri, best))
    }

    /// Highest best-consumption of every device, one entry per device.
    ///
    /// A device without any reading reports `0 W`. The order of the returned
    /// entries is unspecified.
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_highest_per_device(&self) -> Vec<DevicePowerConsumption> {
        let store = self.store.current();
        store
            .devices()
            .into_iter()
            .map(|device| {
                let highest = device
                    .state_names()
                    .filter_map(|name| best_reading(&device, name))
                    .fold(Measurement::zero_watts(), |highest, best| {
                        if highest.is_less_than(&best) {
                            best
                        } else {
                            highest
                        }
                    });
                DevicePowerConsumption::new(device.uri(), highest)
            })
            .collect()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn reading(
        &self,
        kind: ConsumptionKind,
        device_uri: &str,
        state_name: &str,
    ) -> Option<DevicePowerConsumption> {
        let store = self.store.current();
        let Some(device) = store.get(device_uri) else {
            tracing::error!(%device_uri, "device has no declared power consumption");
            return None;
        };
        device
            .state(state_name)
            .and_then(|state| state.get(kind))
            .map(|reading| DevicePowerConsumption::new(device_uri, reading.clone()))
    }
}

/// Select the best reading among the states of `device` matching
/// `state_name` case-insensitively.
///
/// For each matching state, in name order: a typical reading becomes the
/// candidate unconditionally; then nominal, then actual, replace the
/// candidate when there is none yet or when the candidate's value is
/// strictly lower. Units are not compared.
#[must_use]
pub fn best_reading(device: &PowerDevice, state_name: &str) -> Option<Measurement> {
    let mut best: Option<&Measurement> = None;
    for state in device
        .states()
        .filter(|state| eq_ignore_case(state.name(), state_name))
    {
        if let Some(typical) = state.typical() {
            best = Some(typical);
        }
        for candidate in [state.nominal(), state.actual()].into_iter().flatten() {
            if best.is_none_or(|current| current.is_less_than(candidate)) {
                best = Some(candidate);
            }
        }
    }
    best.cloned()
}

/// Character-by-character comparison under simple case mapping: two
/// characters match when they are equal, when their uppercase forms are
/// equal, or when the lowercase forms of those are equal.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            if x == y {
                return true;
            }
            let (x, y) = (simple_upper(x), simple_upper(y));
            x == y || simple_lower(x) == simple_lower(y)
        })
}

/// Single-character uppercase; expansions such as `ß` → `SS` keep `c`.
fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Single-character lowercase; `İ` maps to `i` rather than `i` + dot.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use powermodel_domain::power_state::PowerState;

    use crate::store::ConsumptionStore;

    fn service_with(store: ConsumptionStore) -> QueryService {
        let shared = SharedStore::default();
        shared.replace(store);
        QueryService::new(shared)
    }

    fn state(
        name: &str,
        typical: Option<f64>,
        nominal: Option<f64>,
        actual: Option<f64>,
    ) -> PowerState {
        let mut state = PowerState::new(name);
        if let Some(v) = typical {
            state.set_typical(v, "W");
        }
        if let Some(v) = nominal {
            state.set_nominal(v, "W");
        }
        if let Some(v) = actual {
            state.set_actual(v, "W");
        }
        state
    }

    fn value(result: Option<DevicePowerConsumption>) -> Option<f64> {
        result.map(|r| r.consumption.value())
    }

    #[test]
    fn should_return_nothing_when_requested_reading_is_absent() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(10.0), None, None));
        let svc = service_with(store);

        let typical = svc.get_typical("d1", "On").unwrap();
        assert_eq!(typical.device_uri, "d1");
        assert_eq!(typical.consumption, Measurement::new(10.0, "W"));
        assert!(svc.get_actual("d1", "On").is_none());
    }

    #[test]
    fn should_return_each_single_reading() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(10.0), Some(12.0), Some(9.0)));
        let svc = service_with(store);

        assert_eq!(value(svc.get_typical("d1", "On")), Some(10.0));
        assert_eq!(value(svc.get_nominal("d1", "On")), Some(12.0));
        assert_eq!(value(svc.get_actual("d1", "On")), Some(9.0));
    }

    #[test]
    fn should_return_nothing_when_device_is_unknown() {
        let svc = service_with(ConsumptionStore::new());
        assert!(svc.get_typical("ghost", "On").is_none());
        assert!(svc.get_nominal("ghost", "On").is_none());
        assert!(svc.get_actual("ghost", "On").is_none());
        assert!(svc.get_best("ghost", "On").is_none());
    }

    #[test]
    fn should_return_nothing_when_state_is_unknown() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(10.0), None, None));
        let svc = service_with(store);
        assert!(svc.get_typical("d1", "Standby").is_none());
    }

    #[test]
    fn should_return_nothing_when_single_reading_state_case_differs() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("on", Some(3.0), None, None));
        let svc = service_with(store);
        assert!(svc.get_typical("d1", "On").is_none());
    }

    #[test]
    fn should_match_state_when_best_query_case_differs() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("on", Some(3.0), None, None));
        let svc = service_with(store);
        assert_eq!(value(svc.get_best("d1", "ON")), Some(3.0));
    }

    #[test]
    fn should_match_state_when_lowercase_mapping_expands() {
        let mut device = PowerDevice::new("d1");
        device.add_state(state("\u{130}", Some(7.0), None, None));
        assert_eq!(best_reading(&device, "i"), Some(Measurement::new(7.0, "W")));
        assert_eq!(best_reading(&device, "I"), Some(Measurement::new(7.0, "W")));
    }

    #[test]
    fn should_not_match_state_when_uppercase_mapping_changes_length() {
        let mut device = PowerDevice::new("d1");
        device.add_state(state("stra\u{df}e", Some(7.0), None, None));
        assert!(best_reading(&device, "STRASSE").is_none());
        assert_eq!(
            best_reading(&device, "STRA\u{df}E"),
            Some(Measurement::new(7.0, "W"))
        );
    }

    #[test]
    fn should_pick_maximum_reading_when_several_are_present() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(10.0), Some(15.0), Some(12.0)));
        let svc = service_with(store);
        assert_eq!(value(svc.get_best("d1", "On")), Some(15.0));
    }

    #[test]
    fn should_keep_typical_when_it_is_highest() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(20.0), Some(15.0), Some(12.0)));
        let svc = service_with(store);
        assert_eq!(value(svc.get_best("d1", "On")), Some(20.0));
    }

    #[test]
    fn should_fall_back_to_actual_when_only_actual_present() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", None, None, Some(7.0)));
        let svc = service_with(store);
        assert_eq!(value(svc.get_best("d1", "On")), Some(7.0));
    }

    #[test]
    fn should_return_nothing_as_best_when_state_has_no_reading() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", None, None, None));
        let svc = service_with(store);
        assert!(svc.get_best("d1", "On").is_none());
    }

    #[test]
    fn should_compare_values_only_when_units_differ() {
        let store = ConsumptionStore::new();
        let mut mixed = PowerState::new("On");
        mixed.set_typical(500.0, "W");
        mixed.set_nominal(2.0, "kW");
        store.upsert_state("d1", mixed);
        let svc = service_with(store);

        let best = svc.get_best("d1", "On").unwrap();
        assert_eq!(best.consumption, Measurement::new(500.0, "W"));
    }

    #[test]
    fn should_let_later_typical_override_when_case_variants_exist() {
        let mut device = PowerDevice::new("d1");
        device.add_state(state("ON", None, Some(50.0), None));
        device.add_state(state("on", Some(5.0), None, None));

        // "ON" sorts before "on": its nominal is replaced by the typical of "on".
        assert_eq!(best_reading(&device, "On"), Some(Measurement::new(5.0, "W")));
    }

    #[test]
    fn should_report_highest_best_per_device_when_states_differ() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("S1", Some(5.0), None, None));
        store.upsert_state("d1", state("S2", Some(3.0), Some(12.0), None));
        store.upsert_state("d2", state("On", Some(1.0), None, None));
        let svc = service_with(store);

        let mut highest = svc.get_highest_per_device();
        highest.sort_by(|a, b| a.device_uri.cmp(&b.device_uri));

        assert_eq!(highest.len(), 2);
        assert_eq!(highest[0].device_uri, "d1");
        assert_eq!(highest[0].consumption, Measurement::new(12.0, "W"));
        assert_eq!(highest[1].consumption, Measurement::new(1.0, "W"));
    }

    #[test]
    fn should_report_zero_watts_when_device_has_no_readings() {
        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", None, None, None));
        let svc = service_with(store);

        let highest = svc.get_highest_per_device();
        assert_eq!(highest.len(), 1);
        assert_eq!(highest[0].consumption, Measurement::zero_watts());
    }

    #[test]
    fn should_report_nothing_when_store_is_empty() {
        let svc = service_with(ConsumptionStore::new());
        assert!(svc.get_highest_per_device().is_empty());
    }

    #[test]
    fn should_answer_from_new_store_when_swapped() {
        let shared = SharedStore::default();
        let svc = QueryService::new(shared.clone());
        assert!(svc.get_typical("d1", "On").is_none());

        let store = ConsumptionStore::new();
        store.upsert_state("d1", state("On", Some(10.0), None, None));
        shared.replace(store);

        assert_eq!(value(svc.get_typical("d1", "On")), Some(10.0));
    }
}
