//! Core business logic - framework-agnostic and gateway-agnostic.
//!
//! `metrics` is the pure aggregation engine, `session` the edit-session
//! state machine, `service` the async coordinators that bind sessions to
//! the gateway and store, and `settings` the write-through holder for the
//! manual income figures.

/// Financial aggregation engine
pub mod metrics;
/// Async coordinators for transaction and loan edit sessions
pub mod service;
/// Record edit session state machine
pub mod session;
/// Manual income settings holder
pub mod settings;
