// crates/multisig-ledger-core/src/lib.rs
// ============================================================================
// Module: Multisig Ledger Core Library
// Description: Public API surface for the multisig authorization ledger.
// Purpose: Expose core types, interfaces, and runtime components.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Multisig Ledger core provides a threshold-authorization engine for custody
//! of a shared value pool. A fixed owner set jointly controls outgoing
//! transfers; each transfer needs confirmations from a minimum number of
//! distinct owners before it executes, and executes at most once.
//! Settlement and event delivery are reached through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::LedgerEventSink;
pub use interfaces::TransferError;
pub use interfaces::TransferExecutor;
pub use interfaces::TransferReceipt;
pub use interfaces::TransferRequest;
pub use runtime::AuthorizationLedger;
pub use runtime::ErrorKind;
pub use runtime::FileEventSink;
pub use runtime::InMemoryEventSink;
pub use runtime::InMemoryValuePool;
pub use runtime::LedgerError;
pub use runtime::NoopEventSink;
pub use runtime::StderrEventSink;
