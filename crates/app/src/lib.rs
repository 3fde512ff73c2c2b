//! # powermodel-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `FactSource` — hands over the consumption facts of the current ontology
//!   - `ReloadPublisher` — announces ontology (re)loads
//! - Own the **consumption store**: a concurrent device map plus the
//!   `SharedStore` handle that swaps whole snapshots on reload
//! - Define **driving/inbound** use-cases:
//!   - `ExtractionPipeline` — turns raw facts into a fresh store
//!   - `QueryService` — actual / nominal / typical / best / highest queries
//!   - `OntologyReloader` — background task running the pipeline per load event
//! - Provide **in-process infrastructure** (reload bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `powermodel-domain` only (plus `tokio::sync` for channels and
//! `dashmap` for the device map). Never imports adapter crates.

pub mod ports;
pub mod reload_bus;
pub mod reloader;
pub mod services;
pub mod store;
