// crates/multisig-ledger-core/src/core/events.rs
// ============================================================================
// Module: Multisig Ledger Events
// Description: Event notifications emitted by the authorization ledger.
// Purpose: Provide the observable record of submissions, votes, and executions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every successful state change produces exactly one [`LedgerEvent`]. The
//! ledger wraps each event in a [`LedgerEventRecord`] carrying a per-ledger
//! sequence number and wall-clock timestamp before handing it to the
//! configured sink. Rejected operations emit nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Address;
use crate::core::identifiers::TransactionIndex;
use crate::core::transaction::Payload;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Ledger event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A transaction was appended to the log.
    TransactionSubmitted {
        /// Owner that submitted the transaction.
        submitter: Address,
        /// Assigned index.
        index: TransactionIndex,
        /// Transfer destination.
        destination: Address,
        /// Amount in native units.
        amount: u64,
        /// Opaque call data.
        payload: Payload,
    },
    /// An owner confirmed a transaction.
    TransactionConfirmed {
        /// Confirming owner.
        owner: Address,
        /// Transaction index.
        index: TransactionIndex,
    },
    /// An owner withdrew a confirmation.
    ConfirmationRevoked {
        /// Revoking owner.
        owner: Address,
        /// Transaction index.
        index: TransactionIndex,
    },
    /// A transaction executed and its transfer settled.
    TransactionExecuted {
        /// Owner that triggered execution.
        caller: Address,
        /// Transaction index.
        index: TransactionIndex,
    },
}

impl LedgerEvent {
    /// Returns the stable event label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TransactionSubmitted {
                ..
            } => "transaction_submitted",
            Self::TransactionConfirmed {
                ..
            } => "transaction_confirmed",
            Self::ConfirmationRevoked {
                ..
            } => "confirmation_revoked",
            Self::TransactionExecuted {
                ..
            } => "transaction_executed",
        }
    }

    /// Returns the transaction index the event refers to.
    #[must_use]
    pub const fn index(&self) -> TransactionIndex {
        match self {
            Self::TransactionSubmitted {
                index,
                ..
            }
            | Self::TransactionConfirmed {
                index,
                ..
            }
            | Self::ConfirmationRevoked {
                index,
                ..
            }
            | Self::TransactionExecuted {
                index,
                ..
            } => *index,
        }
    }
}

// ============================================================================
// SECTION: Event Record
// ============================================================================

/// Sequenced, timestamped event as delivered to sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEventRecord {
    /// Per-ledger sequence number, starting at 1.
    pub seq: u64,
    /// Emission timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Event payload.
    #[serde(flatten)]
    pub event: LedgerEvent,
}

impl LedgerEventRecord {
    /// Creates a record stamped with the current wall-clock time.
    #[must_use]
    pub fn new(seq: u64, event: LedgerEvent) -> Self {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let timestamp_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        Self {
            seq,
            timestamp_ms,
            event,
        }
    }
}
