//! Reload port — announce that a new ontology is available.

use std::future::Future;

use powermodel_domain::error::PowerModelError;
use powermodel_domain::event::OntologyEvent;

/// Publishes ontology events to interested subscribers.
pub trait ReloadPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: OntologyEvent,
    ) -> impl Future<Output = Result<(), PowerModelError>> + Send;
}

impl<T: ReloadPublisher + Send + Sync> ReloadPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: OntologyEvent,
    ) -> impl Future<Output = Result<(), PowerModelError>> + Send {
        (**self).publish(event)
    }
}
