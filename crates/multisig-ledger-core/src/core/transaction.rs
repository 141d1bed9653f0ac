// crates/multisig-ledger-core/src/core/transaction.rs
// ============================================================================
// Module: Multisig Ledger Transactions
// Description: Proposed transfers, opaque payloads, and derived status.
// Purpose: Define the read-side view of a submitted transaction.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Transaction`] is the query-surface view of one proposed outgoing
//! transfer. Its confirmation count is computed from the active confirmation
//! records at read time; it is never stored independently. The
//! [`TransactionStatus`] is likewise derived: only `executed` is persisted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::core::hex::hex_decode;
use crate::core::hex::hex_encode;
use crate::core::identifiers::Address;

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Opaque call data attached to a transaction.
///
/// Serializes as `0x`-prefixed lowercase hex; the empty payload is `"0x"`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Returns an empty payload.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the payload carries no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Payload {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex_encode(&self.0))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({self})")
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let body = text
            .strip_prefix("0x")
            .ok_or_else(|| de::Error::custom("payload must start with 0x"))?;
        hex_decode(body).map(Self).ok_or_else(|| de::Error::custom("payload must be valid hex"))
    }
}

// ============================================================================
// SECTION: Transaction
// ============================================================================

/// Read-side view of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transfer destination.
    pub destination: Address,
    /// Amount in native units.
    pub amount: u64,
    /// Opaque call data.
    pub payload: Payload,
    /// Whether the transaction has executed.
    pub executed: bool,
    /// Number of owners holding an active confirmation.
    pub confirmations: u32,
}

impl Transaction {
    /// Returns the derived lifecycle status for `required` confirmations.
    #[must_use]
    pub const fn status(&self, required: u32) -> TransactionStatus {
        TransactionStatus::derive(self.executed, self.confirmations, required)
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Derived lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Fewer confirmations than the threshold.
    Pending,
    /// Threshold met; awaiting execution.
    Ready,
    /// Terminal: executed exactly once.
    Executed,
}

impl TransactionStatus {
    /// Derives the status from the stored flag and current confirmation count.
    #[must_use]
    pub const fn derive(executed: bool, confirmations: u32, required: u32) -> Self {
        if executed {
            Self::Executed
        } else if confirmations >= required {
            Self::Ready
        } else {
            Self::Pending
        }
    }
}
