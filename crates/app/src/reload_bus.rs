//! In-process reload bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use powermodel_domain::error::PowerModelError;
use powermodel_domain::event::OntologyEvent;

use crate::ports::ReloadPublisher;

/// In-process bus carrying [`OntologyEvent`]s to the reloader.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct ReloadBus {
    sender: broadcast::Sender<OntologyEvent>,
}

impl ReloadBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OntologyEvent> {
        self.sender.subscribe()
    }
}

impl ReloadPublisher for ReloadBus {
    fn publish(
        &self,
        event: OntologyEvent,
    ) -> impl Future<Output = Result<(), PowerModelError>> + Send {
        tracing::debug!(load_id = %event.load_id(), "publishing ontology event");
        // Only fails when nobody listens.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
