// crates/multisig-ledger-core/tests/construction.rs
// ============================================================================
// Module: Ledger Construction Tests
// Description: Owner-set and threshold validation at creation time.
// Purpose: Ensure invalid policies never produce a ledger.
// Dependencies: multisig-ledger-core
// ============================================================================
//! ## Overview
//! Creation validates the owner list and threshold in a fixed order and fails
//! closed. Valid inputs are echoed back exactly, in the order supplied.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use multisig_ledger_core::Address;
use multisig_ledger_core::AuthorizationLedger;
use multisig_ledger_core::ErrorKind;
use multisig_ledger_core::InMemoryValuePool;
use multisig_ledger_core::LedgerError;
use multisig_ledger_core::NoopEventSink;
use multisig_ledger_core::OwnerPolicy;
use multisig_ledger_core::OwnerPolicyError;

use crate::common::addr;
use crate::common::owner1;
use crate::common::owner2;
use crate::common::owner3;
use crate::common::owners;

/// Attempts to build a ledger with default collaborators.
fn build(
    owners: Vec<Address>,
    required: u32,
) -> Result<AuthorizationLedger<InMemoryValuePool, NoopEventSink>, LedgerError> {
    AuthorizationLedger::new(owners, required, InMemoryValuePool::new(), NoopEventSink)
}

/// Extracts the setup error from a failed construction.
fn setup_error(
    result: Result<AuthorizationLedger<InMemoryValuePool, NoopEventSink>, LedgerError>,
) -> OwnerPolicyError {
    match result {
        Err(LedgerError::Setup(err)) => err,
        Err(other) => panic!("expected setup error, got {other}"),
        Ok(_) => panic!("expected construction to fail"),
    }
}

/// Verifies owners and threshold are echoed exactly.
#[test]
fn construction_sets_owners_and_threshold() {
    let ledger = build(owners(), 2).unwrap();
    assert_eq!(ledger.owners(), owners().as_slice());
    assert_eq!(ledger.required_confirmations(), 2);
    assert_eq!(ledger.transaction_count().unwrap(), 0);
}

/// Verifies every threshold in range is accepted.
#[test]
fn construction_accepts_every_threshold_in_range() {
    for required in 1 ..= 3 {
        let ledger = build(owners(), required).unwrap();
        assert_eq!(ledger.required_confirmations(), required);
    }
}

/// Verifies owner order is preserved, not sorted.
#[test]
fn construction_preserves_owner_order() {
    let shuffled = vec![owner3(), owner1(), owner2()];
    let ledger = build(shuffled.clone(), 1).unwrap();
    assert_eq!(ledger.owners(), shuffled.as_slice());
}

/// Verifies a single owner with threshold one is valid.
#[test]
fn construction_accepts_single_owner() {
    let ledger = build(vec![owner1()], 1).unwrap();
    assert!(ledger.is_owner(&owner1()));
    assert!(!ledger.is_owner(&owner2()));
}

/// Verifies an empty owner list is rejected.
#[test]
fn construction_rejects_empty_owner_list() {
    assert_eq!(setup_error(build(Vec::new(), 1)), OwnerPolicyError::NoOwners);
}

/// Verifies the zero address is rejected with its position.
#[test]
fn construction_rejects_zero_owner() {
    let err = setup_error(build(vec![owner1(), Address::ZERO], 1));
    assert_eq!(
        err,
        OwnerPolicyError::InvalidOwner {
            position: 1
        }
    );
}

/// Verifies duplicate owners are rejected.
#[test]
fn construction_rejects_duplicate_owner() {
    let err = setup_error(build(vec![owner1(), owner2(), owner1()], 2));
    assert_eq!(err, OwnerPolicyError::DuplicateOwner(owner1()));
}

/// Verifies a zero threshold is rejected.
#[test]
fn construction_rejects_zero_threshold() {
    let err = setup_error(build(owners(), 0));
    assert_eq!(
        err,
        OwnerPolicyError::InvalidThreshold {
            required: 0,
            owners: 3
        }
    );
}

/// Verifies a threshold above the owner count is rejected.
#[test]
fn construction_rejects_threshold_above_owner_count() {
    let err = setup_error(build(owners(), 10));
    assert_eq!(
        err,
        OwnerPolicyError::InvalidThreshold {
            required: 10,
            owners: 3
        }
    );
}

/// Verifies entries are scanned in order, the first violation wins, and the
/// threshold is only checked once the owner list is clean.
#[test]
fn construction_reports_first_violation_in_check_order() {
    let err = setup_error(build(vec![owner1(), owner1(), Address::ZERO], 0));
    assert_eq!(err, OwnerPolicyError::DuplicateOwner(owner1()));

    let err = setup_error(build(vec![Address::ZERO, owner1(), owner1()], 0));
    assert_eq!(
        err,
        OwnerPolicyError::InvalidOwner {
            position: 0
        }
    );
}

/// Verifies setup errors classify as setup-time failures.
#[test]
fn construction_errors_classify_as_setup() {
    let err = build(Vec::new(), 1).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Setup);
    assert_eq!(err.kind().label(), "setup");
    assert!(err.to_string().contains("owners required"));
}

/// Verifies a prevalidated policy builds an identical ledger.
#[test]
fn construction_from_policy_matches_direct_construction() {
    let policy = OwnerPolicy::new(vec![addr(7), addr(8)], 2).unwrap();
    let ledger =
        AuthorizationLedger::from_policy(policy.clone(), InMemoryValuePool::new(), NoopEventSink);
    assert_eq!(ledger.policy(), &policy);
    assert_eq!(ledger.owners(), &[addr(7), addr(8)]);
}
