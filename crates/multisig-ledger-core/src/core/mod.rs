// crates/multisig-ledger-core/src/core/mod.rs
// ============================================================================
// Module: Multisig Ledger Core Types
// Description: Canonical identities, policies, transactions, and events.
// Purpose: Provide stable, serializable types for the authorization ledger.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Core types define owner identities, the validated owner policy, the
//! transaction view, ledger events, and snapshots. These types are the
//! canonical source of truth for every surface built on the ledger.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod events;
mod hex;
pub mod identifiers;
pub mod policy;
pub mod state;
pub mod transaction;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use events::LedgerEvent;
pub use events::LedgerEventRecord;
pub use identifiers::ADDRESS_LEN;
pub use identifiers::Address;
pub use identifiers::AddressParseError;
pub use identifiers::TransactionIndex;
pub use policy::OwnerPolicy;
pub use policy::OwnerPolicyError;
pub use state::LedgerSnapshot;
pub use state::SnapshotDigestError;
pub use state::TransactionSnapshot;
pub use transaction::Payload;
pub use transaction::Transaction;
pub use transaction::TransactionStatus;
