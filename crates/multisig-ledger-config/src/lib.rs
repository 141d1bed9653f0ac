// crates/multisig-ledger-config/src/lib.rs
// ============================================================================
// Module: Multisig Ledger Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for multisig-ledger.toml semantics.
// Dependencies: multisig-ledger-core, serde, toml
// ============================================================================

//! ## Overview
//! `multisig-ledger-config` defines the configuration model for a multisig
//! ledger deployment: the owner set, the confirmation threshold, and the event
//! sink. Validation is strict and fails closed; a config that loads always
//! yields a valid owner policy.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
