// crates/multisig-ledger-core/src/runtime/pool.rs
// ============================================================================
// Module: Multisig Ledger In-Memory Value Pool
// Description: Simple in-memory settlement backend for tests and demos.
// Purpose: Provide a deterministic transfer executor without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides [`InMemoryValuePool`], an all-or-nothing
//! implementation of [`TransferExecutor`] backed by a pool balance and a map
//! of credited destinations. It is not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::core::Address;
use crate::interfaces::TransferError;
use crate::interfaces::TransferExecutor;
use crate::interfaces::TransferReceipt;
use crate::interfaces::TransferRequest;

// ============================================================================
// SECTION: In-Memory Pool
// ============================================================================

/// Pool balances protected by the pool mutex.
#[derive(Debug, Default)]
struct PoolState {
    /// Value held by the shared pool.
    balance: u64,
    /// Value credited to each destination.
    credited: BTreeMap<Address, u64>,
    /// Settled transfers in order.
    receipts: Vec<TransferReceipt>,
}

/// In-memory value pool for tests and demos.
///
/// Clones share the same underlying balances.
#[derive(Debug, Default, Clone)]
pub struct InMemoryValuePool {
    /// Shared pool state.
    state: Arc<Mutex<PoolState>>,
}

impl InMemoryValuePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool holding `balance`.
    #[must_use]
    pub fn with_balance(balance: u64) -> Self {
        let pool = Self::new();
        pool.state().balance = balance;
        pool
    }

    /// Adds value to the pool and returns the new balance.
    ///
    /// Saturates at `u64::MAX`.
    pub fn deposit(&self, amount: u64) -> u64 {
        let mut state = self.state();
        state.balance = state.balance.saturating_add(amount);
        state.balance
    }

    /// Returns the pool balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.state().balance
    }

    /// Returns the value credited to `destination`.
    #[must_use]
    pub fn balance_of(&self, destination: &Address) -> u64 {
        self.state().credited.get(destination).copied().unwrap_or(0)
    }

    /// Returns settled transfers in order.
    #[must_use]
    pub fn transfers(&self) -> Vec<TransferReceipt> {
        self.state().receipts.clone()
    }

    /// Locks the pool, recovering from poisoning since every update is a
    /// single assignment.
    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TransferExecutor for InMemoryValuePool {
    fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        let mut state = self.state();
        if state.balance < request.amount {
            return Err(TransferError::InsufficientFunds {
                requested: request.amount,
                available: state.balance,
            });
        }
        let credited = state.credited.get(&request.destination).copied().unwrap_or(0);
        let Some(next_credit) = credited.checked_add(request.amount) else {
            return Err(TransferError::Rejected("destination balance overflow".to_string()));
        };
        state.balance -= request.amount;
        state.credited.insert(request.destination, next_credit);
        let receipt = TransferReceipt {
            index: request.index,
            destination: request.destination,
            amount: request.amount,
        };
        state.receipts.push(receipt.clone());
        drop(state);
        Ok(receipt)
    }
}
