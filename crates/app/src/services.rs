//! Application services — use-case implementations.
//!
//! Services read and write the consumption store; the reloader wires them to
//! the fact source port.

pub mod extraction;
pub mod query_service;
