// crates/multisig-ledger-core/src/core/state.rs
// ============================================================================
// Module: Multisig Ledger Snapshots
// Description: Serializable, deterministic views of full ledger state.
// Purpose: Support audit export and bit-exact state comparison.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! A [`LedgerSnapshot`] captures owners, threshold, and every transaction with
//! its confirming owners in a deterministic order. Two snapshots hash to the
//! same digest exactly when the ledger states they describe are identical.
//! The digest is SHA-256 over the RFC 8785 (JCS) canonical JSON encoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::hex::hex_encode;
use crate::core::identifiers::Address;
use crate::core::identifiers::TransactionIndex;
use crate::core::transaction::Payload;

// ============================================================================
// SECTION: Snapshots
// ============================================================================

/// Full transaction state including per-owner confirmation records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    /// Transaction index.
    pub index: TransactionIndex,
    /// Transfer destination.
    pub destination: Address,
    /// Amount in native units.
    pub amount: u64,
    /// Opaque call data.
    pub payload: Payload,
    /// Executed flag.
    pub executed: bool,
    /// Owners holding an active confirmation, in ascending address order.
    pub confirmed_by: Vec<Address>,
}

/// Full ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Owners in creation order.
    pub owners: Vec<Address>,
    /// Confirmation threshold.
    pub required_confirmations: u32,
    /// Transactions in index order.
    pub transactions: Vec<TransactionSnapshot>,
}

impl LedgerSnapshot {
    /// Returns the lowercase hex SHA-256 digest of the canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotDigestError`] when canonicalization fails.
    pub fn digest(&self) -> Result<String, SnapshotDigestError> {
        let canonical = serde_jcs::to_vec(self)
            .map_err(|err| SnapshotDigestError::Canonicalization(err.to_string()))?;
        Ok(hex_encode(&Sha256::digest(&canonical)))
    }
}

/// Errors raised while digesting a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotDigestError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize snapshot: {0}")]
    Canonicalization(String),
}
