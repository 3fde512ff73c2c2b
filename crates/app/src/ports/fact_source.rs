//! Fact source port — the reasoning collaborator seen from the core.
//!
//! Ontology parsing and inference happen behind this trait. The core only
//! receives the already-extracted consumption facts.

use std::future::Future;

use powermodel_domain::error::PowerModelError;
use powermodel_domain::fact::RawFact;

/// Supplies the consumption facts of the currently loaded ontology.
pub trait FactSource {
    /// Return every `ElectricPowerConsumption` fact, in a stable order.
    ///
    /// The order matters: for two facts naming the same device and state,
    /// the first one wins under the default merge policy.
    fn load_facts(&self) -> impl Future<Output = Result<Vec<RawFact>, PowerModelError>> + Send;
}

impl<T: FactSource + Send + Sync> FactSource for std::sync::Arc<T> {
    fn load_facts(&self) -> impl Future<Output = Result<Vec<RawFact>, PowerModelError>> + Send {
        (**self).load_facts()
    }
}
