// crates/multisig-ledger-core/src/runtime/mod.rs
// ============================================================================
// Module: Multisig Ledger Runtime
// Description: Authorization engine plus in-memory collaborators.
// Purpose: Execute the transaction-authorization state machine.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime components: the [`AuthorizationLedger`] engine, an in-memory value
//! pool for tests and demos, and built-in event sinks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod ledger;
pub mod pool;
pub mod sink;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ledger::AuthorizationLedger;
pub use ledger::ErrorKind;
pub use ledger::LedgerError;
pub use pool::InMemoryValuePool;
pub use sink::FileEventSink;
pub use sink::InMemoryEventSink;
pub use sink::NoopEventSink;
pub use sink::StderrEventSink;
