// crates/multisig-ledger-core/src/runtime/ledger.rs
// ============================================================================
// Module: Multisig Ledger Authorization Engine
// Description: Threshold-gated submission, confirmation, and execution.
// Purpose: Enforce owner authorization and exactly-once execution of transfers.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`AuthorizationLedger`] is the single canonical execution path for the
//! transaction-authorization state machine. Every operation is atomic with
//! respect to ledger state: it either applies all of its effects or none.
//!
//! Execution pre-commits the `executed` flag before the transfer executor is
//! invoked and releases the state lock for the duration of the call. Any
//! reentrant or concurrent execution of the same index therefore observes
//! `AlreadyExecuted`. If the executor fails (or unwinds) the flag is rolled
//! back and the ledger is left exactly as it was before the call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use thiserror::Error;

use crate::core::Address;
use crate::core::LedgerEvent;
use crate::core::LedgerEventRecord;
use crate::core::LedgerSnapshot;
use crate::core::OwnerPolicy;
use crate::core::OwnerPolicyError;
use crate::core::Payload;
use crate::core::Transaction;
use crate::core::TransactionIndex;
use crate::core::TransactionSnapshot;
use crate::core::TransactionStatus;
use crate::interfaces::LedgerEventSink;
use crate::interfaces::TransferError;
use crate::interfaces::TransferExecutor;
use crate::interfaces::TransferReceipt;
use crate::interfaces::TransferRequest;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error classification used for reporting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Construction was rejected.
    Setup,
    /// Caller lacks standing.
    Authorization,
    /// Index out of range.
    Lookup,
    /// Operation invalid for the current transaction state.
    StateConflict,
    /// The transfer executor declined.
    External,
    /// Ledger internals are unusable.
    Internal,
}

impl ErrorKind {
    /// Returns a stable snake_case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Authorization => "authorization",
            Self::Lookup => "lookup",
            Self::StateConflict => "state_conflict",
            Self::External => "external",
            Self::Internal => "internal",
        }
    }
}

/// Ledger operation errors.
///
/// Every error leaves ledger state exactly as it was before the call.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Owner policy failed validation.
    #[error("invalid owner policy: {0}")]
    Setup(#[from] OwnerPolicyError),
    /// Caller is not an owner.
    #[error("not owner: {0}")]
    NotOwner(Address),
    /// No transaction exists at the index.
    #[error("tx does not exist: {0}")]
    TransactionNotFound(TransactionIndex),
    /// Transaction already executed.
    #[error("transaction already executed: {0}")]
    AlreadyExecuted(TransactionIndex),
    /// Caller already holds an active confirmation.
    #[error("transaction {index} already confirmed by {owner}")]
    AlreadyConfirmed {
        /// Transaction index.
        index: TransactionIndex,
        /// Confirming owner.
        owner: Address,
    },
    /// Caller holds no active confirmation.
    #[error("transaction {index} not confirmed by {owner}")]
    NotConfirmed {
        /// Transaction index.
        index: TransactionIndex,
        /// Revoking owner.
        owner: Address,
    },
    /// Confirmation count is below the threshold.
    #[error("not enough confirmations for {index}: {confirmations} of {required}")]
    InsufficientConfirmations {
        /// Transaction index.
        index: TransactionIndex,
        /// Active confirmations.
        confirmations: u32,
        /// Required confirmations.
        required: u32,
    },
    /// Transfer executor declined; no state was committed.
    #[error("tx failed: {index}")]
    TransferFailed {
        /// Transaction index.
        index: TransactionIndex,
        /// Executor error.
        #[source]
        source: TransferError,
    },
    /// Ledger state mutex was poisoned.
    #[error("ledger state mutex poisoned")]
    StatePoisoned,
}

impl LedgerError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Setup(_) => ErrorKind::Setup,
            Self::NotOwner(_) => ErrorKind::Authorization,
            Self::TransactionNotFound(_) => ErrorKind::Lookup,
            Self::AlreadyExecuted(_)
            | Self::AlreadyConfirmed {
                ..
            }
            | Self::NotConfirmed {
                ..
            }
            | Self::InsufficientConfirmations {
                ..
            } => ErrorKind::StateConflict,
            Self::TransferFailed {
                ..
            } => ErrorKind::External,
            Self::StatePoisoned => ErrorKind::Internal,
        }
    }
}

// ============================================================================
// SECTION: Internal State
// ============================================================================

/// Stored transaction with its confirmation records.
#[derive(Debug, Clone)]
struct TransactionRecord {
    /// Transfer destination.
    destination: Address,
    /// Amount in native units.
    amount: u64,
    /// Opaque call data.
    payload: Payload,
    /// Terminal executed flag.
    executed: bool,
    /// Owners holding an active confirmation.
    confirmed_by: BTreeSet<Address>,
}

impl TransactionRecord {
    /// Returns the active confirmation count.
    fn confirmations(&self) -> u32 {
        u32::try_from(self.confirmed_by.len()).unwrap_or(u32::MAX)
    }

    /// Builds the read-side view.
    fn view(&self) -> Transaction {
        Transaction {
            destination: self.destination,
            amount: self.amount,
            payload: self.payload.clone(),
            executed: self.executed,
            confirmations: self.confirmations(),
        }
    }
}

/// Mutable ledger state guarded by the ledger mutex.
#[derive(Debug, Default)]
struct LedgerState {
    /// Append-only transaction log.
    transactions: Vec<TransactionRecord>,
    /// Last event sequence number handed out.
    last_seq: u64,
}

impl LedgerState {
    /// Reserves the next event sequence number.
    const fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    /// Returns the record at `index`.
    fn record(&self, index: TransactionIndex) -> Result<&TransactionRecord, LedgerError> {
        usize::try_from(index.get())
            .ok()
            .and_then(|position| self.transactions.get(position))
            .ok_or(LedgerError::TransactionNotFound(index))
    }

    /// Returns the mutable record at `index`, rejecting executed transactions.
    fn pending_record_mut(
        &mut self,
        index: TransactionIndex,
    ) -> Result<&mut TransactionRecord, LedgerError> {
        let record = usize::try_from(index.get())
            .ok()
            .and_then(|position| self.transactions.get_mut(position))
            .ok_or(LedgerError::TransactionNotFound(index))?;
        if record.executed {
            return Err(LedgerError::AlreadyExecuted(index));
        }
        Ok(record)
    }
}

/// Rolls back a pre-committed `executed` flag unless disarmed.
struct ExecutionGuard<'a> {
    /// Ledger state mutex.
    state: &'a Mutex<LedgerState>,
    /// Index whose flag was pre-committed.
    index: TransactionIndex,
    /// Whether drop should roll back.
    armed: bool,
}

impl ExecutionGuard<'_> {
    /// Keeps the executed flag.
    fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(record) =
            usize::try_from(self.index.get()).ok().and_then(|pos| state.transactions.get_mut(pos))
        {
            record.executed = false;
        }
    }
}

// ============================================================================
// SECTION: Authorization Ledger
// ============================================================================

/// Threshold-authorization ledger over a shared value pool.
pub struct AuthorizationLedger<T, E> {
    /// Validated owner set and threshold.
    policy: OwnerPolicy,
    /// Settlement collaborator.
    executor: T,
    /// Event sink.
    sink: E,
    /// Transaction log and confirmation records.
    state: Mutex<LedgerState>,
}

impl<T, E> AuthorizationLedger<T, E>
where
    T: TransferExecutor,
    E: LedgerEventSink,
{
    /// Validates the owner list and threshold, then creates an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Setup`] when the owner policy is invalid.
    pub fn new(
        owners: Vec<Address>,
        required_confirmations: u32,
        executor: T,
        sink: E,
    ) -> Result<Self, LedgerError> {
        let policy = OwnerPolicy::new(owners, required_confirmations)?;
        Ok(Self::from_policy(policy, executor, sink))
    }

    /// Creates an empty ledger from an already validated policy.
    #[must_use]
    pub fn from_policy(policy: OwnerPolicy, executor: T, sink: E) -> Self {
        Self {
            policy,
            executor,
            sink,
            state: Mutex::new(LedgerState::default()),
        }
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Appends a new transaction and returns its index.
    ///
    /// Submission does not confirm on behalf of the submitter.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotOwner`] when `caller` is not an owner.
    pub fn submit(
        &self,
        caller: &Address,
        destination: Address,
        amount: u64,
        payload: Payload,
    ) -> Result<TransactionIndex, LedgerError> {
        self.require_owner(caller)?;
        let (index, seq) = {
            let mut state = self.lock_state()?;
            let index = TransactionIndex::new(state.transactions.len() as u64);
            state.transactions.push(TransactionRecord {
                destination,
                amount,
                payload: payload.clone(),
                executed: false,
                confirmed_by: BTreeSet::new(),
            });
            (index, state.next_seq())
        };
        self.emit(
            seq,
            LedgerEvent::TransactionSubmitted {
                submitter: *caller,
                index,
                destination,
                amount,
                payload,
            },
        );
        Ok(index)
    }

    /// Records the caller's confirmation on a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the caller is not an owner, the index is
    /// unknown, the transaction executed, or the caller already confirmed.
    pub fn confirm_transaction(
        &self,
        caller: &Address,
        index: TransactionIndex,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        let seq = {
            let mut state = self.lock_state()?;
            let record = state.pending_record_mut(index)?;
            if !record.confirmed_by.insert(*caller) {
                return Err(LedgerError::AlreadyConfirmed {
                    index,
                    owner: *caller,
                });
            }
            state.next_seq()
        };
        self.emit(
            seq,
            LedgerEvent::TransactionConfirmed {
                owner: *caller,
                index,
            },
        );
        Ok(())
    }

    /// Withdraws the caller's confirmation from a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the caller is not an owner, the index is
    /// unknown, the transaction executed, or the caller has not confirmed.
    pub fn revoke_confirmation(
        &self,
        caller: &Address,
        index: TransactionIndex,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        let seq = {
            let mut state = self.lock_state()?;
            let record = state.pending_record_mut(index)?;
            if !record.confirmed_by.remove(caller) {
                return Err(LedgerError::NotConfirmed {
                    index,
                    owner: *caller,
                });
            }
            state.next_seq()
        };
        self.emit(
            seq,
            LedgerEvent::ConfirmationRevoked {
                owner: *caller,
                index,
            },
        );
        Ok(())
    }

    /// Executes a transaction whose confirmations meet the threshold.
    ///
    /// The transfer executor is invoked exactly once, without the state lock
    /// held, after the executed flag has been pre-committed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when the caller is not an owner, the index is
    /// unknown, the transaction executed, confirmations are insufficient, or
    /// the executor declines ([`LedgerError::TransferFailed`]).
    pub fn execute_transaction(
        &self,
        caller: &Address,
        index: TransactionIndex,
    ) -> Result<TransferReceipt, LedgerError> {
        self.require_owner(caller)?;
        let required = self.policy.required_confirmations();
        let request = {
            let mut state = self.lock_state()?;
            let record = state.pending_record_mut(index)?;
            let confirmations = record.confirmations();
            if confirmations < required {
                return Err(LedgerError::InsufficientConfirmations {
                    index,
                    confirmations,
                    required,
                });
            }
            record.executed = true;
            TransferRequest {
                index,
                destination: record.destination,
                amount: record.amount,
                payload: record.payload.clone(),
            }
        };
        let guard = ExecutionGuard {
            state: &self.state,
            index,
            armed: true,
        };
        let receipt = self.executor.transfer(&request).map_err(|source| {
            LedgerError::TransferFailed {
                index,
                source,
            }
        })?;
        guard.commit();
        let seq = self.state.lock().unwrap_or_else(PoisonError::into_inner).next_seq();
        self.emit(
            seq,
            LedgerEvent::TransactionExecuted {
                caller: *caller,
                index,
            },
        );
        Ok(receipt)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the owners in creation order.
    #[must_use]
    pub fn owners(&self) -> &[Address] {
        self.policy.owners()
    }

    /// Returns the confirmation threshold.
    #[must_use]
    pub const fn required_confirmations(&self) -> u32 {
        self.policy.required_confirmations()
    }

    /// Returns the validated owner policy.
    #[must_use]
    pub const fn policy(&self) -> &OwnerPolicy {
        &self.policy
    }

    /// Returns true when `address` is an owner.
    #[must_use]
    pub fn is_owner(&self, address: &Address) -> bool {
        self.policy.is_owner(address)
    }

    /// Returns the transfer executor.
    #[must_use]
    pub const fn executor(&self) -> &T {
        &self.executor
    }

    /// Returns the number of submitted transactions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StatePoisoned`] when the state lock is poisoned.
    pub fn transaction_count(&self) -> Result<u64, LedgerError> {
        Ok(self.lock_state()?.transactions.len() as u64)
    }

    /// Returns the transaction at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] for unknown indices.
    pub fn transaction(&self, index: TransactionIndex) -> Result<Transaction, LedgerError> {
        Ok(self.lock_state()?.record(index)?.view())
    }

    /// Returns every transaction in index order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StatePoisoned`] when the state lock is poisoned.
    pub fn transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.lock_state()?.transactions.iter().map(TransactionRecord::view).collect())
    }

    /// Returns the derived status of the transaction at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] for unknown indices.
    pub fn transaction_status(
        &self,
        index: TransactionIndex,
    ) -> Result<TransactionStatus, LedgerError> {
        let state = self.lock_state()?;
        let record = state.record(index)?;
        Ok(TransactionStatus::derive(
            record.executed,
            record.confirmations(),
            self.policy.required_confirmations(),
        ))
    }

    /// Returns whether `owner` holds an active confirmation on `index`.
    ///
    /// Unknown indices and non-owners report `false`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StatePoisoned`] when the state lock is poisoned.
    pub fn is_confirmed(
        &self,
        index: TransactionIndex,
        owner: &Address,
    ) -> Result<bool, LedgerError> {
        let state = self.lock_state()?;
        Ok(state.record(index).is_ok_and(|record| record.confirmed_by.contains(owner)))
    }

    /// Returns the owners confirming `index`, in owner-set order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] for unknown indices.
    pub fn confirmations(&self, index: TransactionIndex) -> Result<Vec<Address>, LedgerError> {
        let state = self.lock_state()?;
        let record = state.record(index)?;
        Ok(self
            .policy
            .owners()
            .iter()
            .filter(|owner| record.confirmed_by.contains(owner))
            .copied()
            .collect())
    }

    /// Returns a deterministic snapshot of the full ledger state.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StatePoisoned`] when the state lock is poisoned.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let state = self.lock_state()?;
        let transactions = state
            .transactions
            .iter()
            .enumerate()
            .map(|(position, record)| TransactionSnapshot {
                index: TransactionIndex::new(position as u64),
                destination: record.destination,
                amount: record.amount,
                payload: record.payload.clone(),
                executed: record.executed,
                confirmed_by: record.confirmed_by.iter().copied().collect(),
            })
            .collect();
        Ok(LedgerSnapshot {
            owners: self.policy.owners().to_vec(),
            required_confirmations: self.policy.required_confirmations(),
            transactions,
        })
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Rejects callers outside the owner set.
    fn require_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        if self.policy.is_owner(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotOwner(*caller))
        }
    }

    /// Acquires the state lock.
    fn lock_state(&self) -> Result<MutexGuard<'_, LedgerState>, LedgerError> {
        self.state.lock().map_err(|_| LedgerError::StatePoisoned)
    }

    /// Hands an event to the sink outside the state lock.
    fn emit(&self, seq: u64, event: LedgerEvent) {
        self.sink.record(&LedgerEventRecord::new(seq, event));
    }
}
