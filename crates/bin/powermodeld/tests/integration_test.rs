//! End-to-end tests for the full powermodeld stack.
//!
//! Each test wires the real TOML fact source, reload bus, reloader and query
//! service over the checked-in fixture — no signal handling or logging setup.

use std::path::PathBuf;
use std::time::Duration;

use powermodel_adapter_facts_toml::TomlFactSource;
use powermodel_app::ports::ReloadPublisher;
use powermodel_app::reload_bus::ReloadBus;
use powermodel_app::reloader::OntologyReloader;
use powermodel_app::services::extraction::ExtractionPipeline;
use powermodel_app::services::query_service::QueryService;
use powermodel_app::store::SharedStore;
use powermodel_domain::event::OntologyEvent;
use powermodel_domain::measurement::Measurement;
use powermodel_domain::power_device::MergePolicy;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/facts.toml")
}

/// Wire the stack, publish one load event and wait for the swap.
async fn loaded(policy: MergePolicy) -> QueryService {
    let store = SharedStore::default();
    let bus = ReloadBus::new(8);
    let mut swaps = store.subscribe();
    let handle = OntologyReloader::new(
        TomlFactSource::from_file(fixture()),
        ExtractionPipeline::new(policy),
        store.clone(),
    )
    .start(bus.subscribe());

    bus.publish(OntologyEvent::loaded("fixture"))
        .await
        .expect("publish should succeed");
    tokio::time::timeout(Duration::from_secs(5), swaps.changed())
        .await
        .expect("reload should complete in time")
        .expect("store should stay alive");

    drop(bus);
    handle.await.expect("reloader should stop cleanly");
    QueryService::new(store)
}

// ---------------------------------------------------------------------------
// Single readings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_answer_typical_and_nominal_from_fixture() {
    let queries = loaded(MergePolicy::default()).await;

    let typical = queries.get_typical("LivingRoomLamp", "OnState").unwrap();
    assert_eq!(typical.consumption, Measurement::new(60.0, "W"));

    let nominal = queries.get_nominal("KitchenFridge", "OnState").unwrap();
    assert_eq!(nominal.consumption, Measurement::new(150.0, "W"));
}

#[tokio::test]
async fn should_ignore_repeated_state_when_policy_is_default() {
    let queries = loaded(MergePolicy::InsertOrIgnore).await;
    assert!(queries.get_actual("LivingRoomLamp", "OnState").is_none());
}

#[tokio::test]
async fn should_combine_repeated_state_when_policy_is_merge() {
    let queries = loaded(MergePolicy::Merge).await;
    let actual = queries.get_actual("LivingRoomLamp", "OnState").unwrap();
    assert_eq!(actual.consumption, Measurement::new(58.0, "W"));
}

#[tokio::test]
async fn should_record_empty_unit_when_fixture_omits_unit() {
    let queries = loaded(MergePolicy::default()).await;
    let actual = queries.get_actual("KitchenFridge", "OnState").unwrap();
    assert_eq!(actual.consumption, Measurement::new(142.5, ""));
}

#[tokio::test]
async fn should_skip_only_one_fact_when_value_is_malformed() {
    let queries = loaded(MergePolicy::default()).await;
    assert!(queries.get_typical("KitchenFridge", "StandbyState").is_none());
    assert!(queries.get_best("HallSensor", "IdleState").is_none());
    assert!(queries.get_typical("LivingRoomLamp", "OffState").is_some());
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_answer_best_when_state_case_differs() {
    let queries = loaded(MergePolicy::default()).await;
    let best = queries.get_best("LivingRoomLamp", "onstate").unwrap();
    assert_eq!(best.consumption, Measurement::new(75.0, "W"));
}

#[tokio::test]
async fn should_report_highest_consumption_per_device() {
    let queries = loaded(MergePolicy::default()).await;

    let mut highest = queries.get_highest_per_device();
    highest.sort_by(|a, b| a.device_uri.cmp(&b.device_uri));
    let summary: Vec<_> = highest
        .iter()
        .map(|entry| (entry.device_uri.as_str(), entry.consumption.value()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("HallSensor", 0.0),
            ("KitchenFridge", 150.0),
            ("LivingRoomLamp", 75.0),
        ]
    );
}
