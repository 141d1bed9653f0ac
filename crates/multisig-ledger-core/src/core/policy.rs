// crates/multisig-ledger-core/src/core/policy.rs
// ============================================================================
// Module: Multisig Ledger Owner Policy
// Description: Validated owner set and confirmation threshold.
// Purpose: Establish the owner-set invariants the ledger relies on.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! An [`OwnerPolicy`] is the only way to obtain an owner set and threshold
//! for a ledger. Validation happens once, at construction, and fails closed:
//! no partially valid policy is ever returned. Checks run in a fixed order
//! (empty list, null owners, duplicates, threshold range) so the reported
//! error is deterministic for a given input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::identifiers::Address;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Setup-time errors raised while validating an owner policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerPolicyError {
    /// The owner list is empty.
    #[error("owners required")]
    NoOwners,
    /// An owner entry is the null identity.
    #[error("invalid owner address at position {position}")]
    InvalidOwner {
        /// Zero-based position of the offending entry.
        position: usize,
    },
    /// An owner identity appears more than once.
    #[error("duplicated owner: {0}")]
    DuplicateOwner(Address),
    /// Threshold is zero or exceeds the owner count.
    #[error("invalid number of confirmations: {required} (owners: {owners})")]
    InvalidThreshold {
        /// Requested threshold.
        required: u32,
        /// Number of owners supplied.
        owners: usize,
    },
}

// ============================================================================
// SECTION: Owner Policy
// ============================================================================

/// Validated owner set plus confirmation threshold.
///
/// # Invariants
/// - At least one owner; no null or duplicate owners.
/// - `1 <= required_confirmations <= owners.len()`.
/// - Owner order is preserved exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerPolicy {
    /// Owners in submission order.
    owners: Vec<Address>,
    /// Minimum number of distinct confirmations required to execute.
    required_confirmations: u32,
    /// Membership index over `owners`.
    members: BTreeSet<Address>,
}

impl OwnerPolicy {
    /// Validates and builds an owner policy.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerPolicyError`] when the owner list or threshold is invalid.
    pub fn new(owners: Vec<Address>, required_confirmations: u32) -> Result<Self, OwnerPolicyError> {
        if owners.is_empty() {
            return Err(OwnerPolicyError::NoOwners);
        }
        let mut members = BTreeSet::new();
        for (position, owner) in owners.iter().enumerate() {
            if owner.is_zero() {
                return Err(OwnerPolicyError::InvalidOwner {
                    position,
                });
            }
            if !members.insert(*owner) {
                return Err(OwnerPolicyError::DuplicateOwner(*owner));
            }
        }
        let within_range = usize::try_from(required_confirmations)
            .is_ok_and(|required| required >= 1 && required <= owners.len());
        if !within_range {
            return Err(OwnerPolicyError::InvalidThreshold {
                required: required_confirmations,
                owners: owners.len(),
            });
        }
        Ok(Self {
            owners,
            required_confirmations,
            members,
        })
    }

    /// Returns the owners in the order they were supplied.
    #[must_use]
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Returns the confirmation threshold.
    #[must_use]
    pub const fn required_confirmations(&self) -> u32 {
        self.required_confirmations
    }

    /// Returns true when `address` is an owner.
    #[must_use]
    pub fn is_owner(&self, address: &Address) -> bool {
        self.members.contains(address)
    }
}
