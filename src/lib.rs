//! `FinBuddy` - a personal finance dashboard core
//!
//! This crate provides the client-side core of the FinBuddy dashboard: an
//! in-memory entity store refreshed from a remote gateway, a pure financial
//! aggregation engine (totals, net, spend ratio, category breakdown), edit
//! sessions for transactions and loans with background category suggestions,
//! and a write-through holder for the manually entered income figures.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::inefficient_to_string,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Application configuration loaded from the environment
pub mod config;
/// Core business logic - aggregation, edit sessions, and income settings
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Ports to the remote gateway, suggestion service, and settings storage
pub mod gateway;
/// Domain entities and gateway payload types
pub mod models;
/// In-memory entity snapshot and refresh helpers
pub mod store;

#[cfg(test)]
pub mod test_utils;
