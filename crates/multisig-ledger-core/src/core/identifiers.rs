// crates/multisig-ledger-core/src/core/identifiers.rs
// ============================================================================
// Module: Multisig Ledger Identifiers
// Description: Owner/destination addresses and transaction indices.
// Purpose: Provide strongly typed, serializable identities with stable string forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the identity types used throughout the ledger. An
//! [`Address`] is a fixed 20-byte identity rendered as `0x`-prefixed lowercase
//! hex; the all-zero address is the null identity and is never a valid owner.
//! A [`TransactionIndex`] is the zero-based position of a transaction in the
//! append-only submission log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use thiserror::Error;

use crate::core::hex::hex_encode;
use crate::core::hex::hex_nibble;

// ============================================================================
// SECTION: Address
// ============================================================================

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Owner or destination identity.
///
/// # Invariants
/// - Exactly [`ADDRESS_LEN`] bytes.
/// - [`Address::ZERO`] is the null identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The null identity.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose final 8 bytes hold `value` (big-endian).
    ///
    /// Handy for tests and demos where readable identities matter more than
    /// realistic ones. `from_low_u64(0)` is [`Address::ZERO`].
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8 ..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Returns the raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns true when this is the null identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex_encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Errors raised when parsing an [`Address`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Hex body has the wrong number of digits.
    #[error("address must be {expected} hex digits, got {actual}")]
    InvalidLength {
        /// Expected digit count.
        expected: usize,
        /// Observed digit count.
        actual: usize,
    },
    /// A non-hex character was found.
    #[error("address contains non-hex character at offset {0}")]
    InvalidCharacter(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let body = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let digits = body.as_bytes();
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::InvalidLength {
                expected: ADDRESS_LEN * 2,
                actual: digits.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        for (slot, (offset, pair)) in bytes.iter_mut().zip(digits.chunks_exact(2).enumerate()) {
            let high =
                hex_nibble(pair[0]).ok_or(AddressParseError::InvalidCharacter(offset * 2))?;
            let low =
                hex_nibble(pair[1]).ok_or(AddressParseError::InvalidCharacter(offset * 2 + 1))?;
            *slot = (high << 4) | low;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// SECTION: Transaction Index
// ============================================================================

/// Position of a transaction in the submission log.
///
/// # Invariants
/// - Zero-based and assigned in submission order; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionIndex(u64);

impl TransactionIndex {
    /// Creates a transaction index from a raw value.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for TransactionIndex {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
