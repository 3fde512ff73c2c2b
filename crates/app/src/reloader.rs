//! Ontology reloader — runs the extraction pipeline once per load event.
//!
//! The reloader subscribes to the reload bus. For every
//! [`OntologyEvent::Loaded`] it pulls facts from the [`FactSource`], extracts
//! them into a fresh store and swaps that store into the [`SharedStore`].
//! Queries keep being served from the previous store until the swap.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;

use powermodel_domain::error::PowerModelError;
use powermodel_domain::event::OntologyEvent;

use crate::ports::FactSource;
use crate::services::extraction::{ExtractionPipeline, ExtractionReport};
use crate::store::SharedStore;

/// Background task turning ontology events into store swaps.
pub struct OntologyReloader<S> {
    source: S,
    pipeline: ExtractionPipeline,
    store: SharedStore,
}

impl<S> OntologyReloader<S>
where
    S: FactSource + Send + Sync + 'static,
{
    /// Create a reloader writing into `store`.
    pub fn new(source: S, pipeline: ExtractionPipeline, store: SharedStore) -> Self {
        Self {
            source,
            pipeline,
            store,
        }
    }

    /// Spawn the reload loop. The task ends once every publisher of
    /// `events` has been dropped.
    pub fn start(self, events: broadcast::Receiver<OntologyEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    async fn run(self, mut events: broadcast::Receiver<OntologyEvent>) {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "reloader lagged behind ontology events");
                    match newest_buffered(&mut events) {
                        Some(event) => event,
                        None => continue,
                    }
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("reload bus closed, stopping reloader");
                    break;
                }
            };
            if let Err(err) = self.reload(&event).await {
                tracing::warn!(
                    %err,
                    load_id = %event.load_id(),
                    "reload failed, keeping previous consumption store"
                );
            }
        }
    }

    /// Handle one event: extract into a fresh store, then swap it in.
    ///
    /// # Errors
    ///
    /// Returns the fact source error; the current store is left untouched.
    #[tracing::instrument(skip(self, event), fields(load_id = %event.load_id()))]
    pub async fn reload(&self, event: &OntologyEvent) -> Result<ExtractionReport, PowerModelError> {
        let OntologyEvent::Loaded { load_id, ontology, .. } = event;
        tracing::info!(%ontology, "ontology loaded, extracting power model");

        let facts = self.source.load_facts().await?;
        let (store, report) = self.pipeline.run(*load_id, facts);
        let generation = self.store.replace(store);

        tracing::info!(generation, devices = report.devices, "power model ready");
        Ok(report)
    }
}

/// Drain every event still buffered and keep only the latest one.
fn newest_buffered(events: &mut broadcast::Receiver<OntologyEvent>) -> Option<OntologyEvent> {
    let mut newest = None;
    loop {
        match events.try_recv() {
            Ok(event) => newest = Some(event),
            Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty | TryRecvError::Closed) => return newest,
        }
    }
}
