//! Nullable infrastructure for deterministic testing.
//!
//! Both external collaborators (order API, ledger RPC) are abstracted behind
//! traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be told to fail or stall
//! - Record every call so tests can assert on side effects
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod orders;

pub use ledger::NullLedger;
pub use orders::NullOrderApi;
