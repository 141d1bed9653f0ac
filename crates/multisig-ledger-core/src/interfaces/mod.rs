// crates/multisig-ledger-core/src/interfaces/mod.rs
// ============================================================================
// Module: Multisig Ledger Interfaces
// Description: Backend-agnostic interfaces for settlement and event delivery.
// Purpose: Define the contract surfaces used by the authorization ledger.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the ledger integrates with external systems without
//! embedding settlement or logging details. A [`TransferExecutor`] moves
//! value out of the shared pool; a [`LedgerEventSink`] receives the event
//! stream. Executors must be all-or-nothing: an error means no value moved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::Address;
use crate::core::LedgerEventRecord;
use crate::core::Payload;
use crate::core::TransactionIndex;

// ============================================================================
// SECTION: Transfer Executor
// ============================================================================

/// Transfer request handed to the executor for an approved transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Index of the transaction being executed.
    pub index: TransactionIndex,
    /// Transfer destination.
    pub destination: Address,
    /// Amount in native units.
    pub amount: u64,
    /// Opaque call data.
    pub payload: Payload,
}

/// Settlement receipt returned by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Index of the executed transaction.
    pub index: TransactionIndex,
    /// Credited destination.
    pub destination: Address,
    /// Amount moved.
    pub amount: u64,
}

/// Transfer executor errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Pool value is below the requested amount.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Requested amount.
        requested: u64,
        /// Available pool value.
        available: u64,
    },
    /// Destination rejected the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),
    /// Settlement backend is unavailable.
    #[error("transfer backend unavailable: {0}")]
    Unavailable(String),
}

/// Settlement collaborator that moves value out of the shared pool.
pub trait TransferExecutor {
    /// Transfers `request.amount` to `request.destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] when the transfer did not happen. On error no
    /// value may have left the pool.
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError>;
}

impl<T: TransferExecutor + ?Sized> TransferExecutor for Arc<T> {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        (**self).transfer(request)
    }
}

impl<T: TransferExecutor + ?Sized> TransferExecutor for Box<T> {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        (**self).transfer(request)
    }
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Sink for ledger events.
///
/// Sinks are best-effort: failures to record must never fail the ledger
/// operation that produced the event.
pub trait LedgerEventSink: Send + Sync {
    /// Records an event.
    fn record(&self, record: &LedgerEventRecord);
}

impl<T: LedgerEventSink + ?Sized> LedgerEventSink for Arc<T> {
    fn record(&self, record: &LedgerEventRecord) {
        (**self).record(record);
    }
}

impl<T: LedgerEventSink + ?Sized> LedgerEventSink for Box<T> {
    fn record(&self, record: &LedgerEventRecord) {
        (**self).record(record);
    }
}
