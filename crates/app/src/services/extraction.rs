//! Extraction pipeline — turns raw facts into a populated consumption store.
//!
//! Every fact becomes one `upsert_state` call. Failures are isolated per fact:
//! a bad literal skips that fact and the run carries on.

use powermodel_domain::error::{PowerModelError, ValidationError};
use powermodel_domain::fact::RawFact;
use powermodel_domain::id::LoadId;
use powermodel_domain::measurement::Measurement;
use powermodel_domain::power_device::MergePolicy;
use powermodel_domain::power_state::PowerState;

use crate::store::ConsumptionStore;

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub load_id: LoadId,
    pub facts_seen: usize,
    pub facts_recorded: usize,
    pub facts_skipped: usize,
    /// Measurements recorded with an empty unit.
    pub missing_units: usize,
    /// Devices in the store once the run finished.
    pub devices: usize,
}

/// Stateless extraction use-case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionPipeline {
    policy: MergePolicy,
}

impl ExtractionPipeline {
    /// Create a pipeline whose stores add states following `policy`.
    #[must_use]
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Extract `facts`, in the given order, into a brand-new store.
    #[tracing::instrument(skip(self, facts), fields(policy = ?self.policy))]
    pub fn run(
        &self,
        load_id: LoadId,
        facts: impl IntoIterator<Item = RawFact>,
    ) -> (ConsumptionStore, ExtractionReport) {
        let store = ConsumptionStore::with_policy(self.policy);
        let report = self.extract_into(&store, load_id, facts);
        (store, report)
    }

    /// Extract `facts` into an existing store.
    pub fn extract_into(
        &self,
        store: &ConsumptionStore,
        load_id: LoadId,
        facts: impl IntoIterator<Item = RawFact>,
    ) -> ExtractionReport {
        tracing::info!(%load_id, "extracting power consumption facts");

        let mut report = ExtractionReport {
            load_id,
            ..ExtractionReport::default()
        };

        for fact in facts {
            report.facts_seen += 1;
            match build_state(&fact, &mut report.missing_units) {
                Ok(state) => {
                    store.upsert_state(&fact.device_uri, state);
                    report.facts_recorded += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        %err,
                        device_uri = %fact.device_uri,
                        state = %fact.state_name,
                        "skipping consumption fact"
                    );
                    report.facts_skipped += 1;
                }
            }
        }

        report.devices = store.len();
        dump(store);
        tracing::info!(
            %load_id,
            facts = report.facts_seen,
            recorded = report.facts_recorded,
            skipped = report.facts_skipped,
            missing_units = report.missing_units,
            devices = report.devices,
            "extraction done"
        );
        report
    }
}

/// Turn one fact into a [`PowerState`].
fn build_state(fact: &RawFact, missing_units: &mut usize) -> Result<PowerState, PowerModelError> {
    if fact.device_uri.is_empty() {
        return Err(ValidationError::EmptyDeviceUri.into());
    }
    let mut state = PowerState::new(fact.state_name.as_str());
    state.validate()?;

    for raw in &fact.measurements {
        let Some(value) = raw.parse_value()? else {
            tracing::debug!(
                device_uri = %fact.device_uri,
                state = %fact.state_name,
                kind = %raw.kind,
                "measurement has no power value"
            );
            continue;
        };
        let unit = if let Some(unit) = raw.unit_symbol() {
            unit
        } else {
            tracing::warn!(
                device_uri = %fact.device_uri,
                state = %fact.state_name,
                kind = %raw.kind,
                "consumption value has no unit of measure"
            );
            *missing_units += 1;
            ""
        };
        state.set(raw.kind, Measurement::new(value, unit));
    }

    Ok(state)
}

fn dump(store: &ConsumptionStore) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    for device in store.devices() {
        tracing::debug!(device_uri = %device.uri(), "device");
        for state in device.states() {
            for (kind, measurement) in state.readings() {
                tracing::debug!(
                    device_uri = %device.uri(),
                    state = %state.name(),
                    %kind,
                    %measurement,
                    "consumption"
                );
            }
        }
    }
}
