//! # powermodel-domain
//!
//! Pure domain model for the powermodel consumption lookup service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Measurements** (a numeric power reading plus an opaque unit symbol)
//! - Define **Power states** (typical / nominal / actual readings of one operating mode)
//! - Define **Power devices** (a device URI and its de-duplicated set of states)
//! - Define **Raw facts** (what the reasoning collaborator hands over per consumption individual)
//! - Define **Ontology events** (load / reload notifications)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod consumption;
pub mod event;
pub mod fact;
pub mod measurement;
pub mod power_device;
pub mod power_state;
