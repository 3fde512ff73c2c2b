//! # powermodeld — power model daemon
//!
//! Composition root that wires the fact source, the extraction pipeline and
//! the query service together.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialise logging
//! - Construct the fact source adapter and the shared consumption store
//! - Spawn the ontology reloader and trigger the initial load
//! - Reload on `SIGHUP`, log the highest consumption per device after each load
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use powermodel_adapter_facts_toml::TomlFactSource;
use powermodel_app::ports::ReloadPublisher;
use powermodel_app::reload_bus::ReloadBus;
use powermodel_app::reloader::OntologyReloader;
use powermodel_app::services::extraction::ExtractionPipeline;
use powermodel_app::services::query_service::QueryService;
use powermodel_app::store::{SharedStore, StoreSnapshot};
use powermodel_domain::event::OntologyEvent;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Store + services
    let store = SharedStore::default();
    let queries = QueryService::new(store.clone());
    let pipeline = ExtractionPipeline::new(config.extraction.merge_policy);

    // Reload wiring
    let source = TomlFactSource::from_file(&config.facts.path);
    tracing::debug!(facts = ?source.path(), "consumption facts source ready");
    let ontology = config.facts.path.display().to_string();
    let bus = ReloadBus::new(config.reload.bus_capacity);
    let reloader = OntologyReloader::new(source, pipeline, store.clone()).start(bus.subscribe());
    let reporter = tokio::spawn(report_highest(queries, store.subscribe()));

    bus.publish(OntologyEvent::loaded(ontology.as_str())).await?;
    tracing::info!(facts = %ontology, policy = ?pipeline.policy(), "powermodeld started");

    wait_for_shutdown(&bus, &ontology).await?;

    drop(bus);
    reloader.await?;
    reporter.abort();
    Ok(())
}

/// Log the highest consumption of every device after each store swap.
async fn report_highest(queries: QueryService, mut swaps: watch::Receiver<StoreSnapshot>) {
    while swaps.changed().await.is_ok() {
        let generation = swaps.borrow_and_update().generation;
        let mut highest = queries.get_highest_per_device();
        highest.sort_by(|a, b| a.device_uri.cmp(&b.device_uri));
        for entry in highest {
            tracing::info!(
                generation,
                device_uri = %entry.device_uri,
                consumption = %entry.consumption,
                "highest consumption"
            );
        }
    }
}

#[cfg(unix)]
async fn wait_for_shutdown(
    bus: &ReloadBus,
    ontology: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())?;
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("shutting down");
                return Ok(());
            }
            _ = hangup.recv() => {
                tracing::info!("SIGHUP received, reloading facts");
                bus.publish(OntologyEvent::loaded(ontology)).await?;
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown(
    _bus: &ReloadBus,
    _ontology: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
