// crates/multisig-ledger-core/tests/common/mod.rs
// ============================================================================
// Module: Ledger Test Fixtures
// Description: Shared owners, ledgers, and digests for integration tests.
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are not used by every test binary.")]
#![allow(
    clippy::expect_used,
    clippy::missing_panics_doc,
    reason = "Test-only fixtures panic on setup failure."
)]

use multisig_ledger_core::Address;
use multisig_ledger_core::AuthorizationLedger;
use multisig_ledger_core::InMemoryEventSink;
use multisig_ledger_core::InMemoryValuePool;

/// Ledger wired to in-memory collaborators.
pub type TestLedger = AuthorizationLedger<InMemoryValuePool, InMemoryEventSink>;

/// Threshold used by the standard fixture.
pub const REQUIRED: u32 = 2;

/// Returns a readable, non-zero test address.
pub fn addr(value: u64) -> Address {
    Address::from_low_u64(value)
}

/// First owner (the default caller).
pub fn owner1() -> Address {
    addr(1)
}

/// Second owner.
pub fn owner2() -> Address {
    addr(2)
}

/// Third owner.
pub fn owner3() -> Address {
    addr(3)
}

/// Identity outside the owner set.
pub fn external() -> Address {
    addr(0x10)
}

/// Second identity outside the owner set.
pub fn external2() -> Address {
    addr(0x11)
}

/// Standard owner list.
pub fn owners() -> Vec<Address> {
    vec![owner1(), owner2(), owner3()]
}

/// Ledger plus handles onto its collaborators.
pub struct Fixture {
    /// Ledger under test.
    pub ledger: TestLedger,
    /// Shared handle to the ledger's value pool.
    pub pool: InMemoryValuePool,
    /// Shared handle to the ledger's event sink.
    pub events: InMemoryEventSink,
}

/// Builds a 3-owner, threshold-2 ledger over a pool holding `balance`.
pub fn fixture(balance: u64) -> Fixture {
    let pool = InMemoryValuePool::with_balance(balance);
    let events = InMemoryEventSink::new();
    let ledger = AuthorizationLedger::new(owners(), REQUIRED, pool.clone(), events.clone())
        .expect("valid fixture policy");
    Fixture {
        ledger,
        pool,
        events,
    }
}

/// Canonical digest of the full ledger state.
pub fn state_hash(ledger: &TestLedger) -> String {
    ledger.snapshot().expect("snapshot").digest().expect("snapshot digest")
}
