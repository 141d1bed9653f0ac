// crates/multisig-ledger-core/tests/event_sinks.rs
// ============================================================================
// Module: Event Sink Tests
// Description: Event ordering and JSON-line delivery.
// Purpose: Ensure every state change is observable exactly once, in order.
// Dependencies: multisig-ledger-core, serde_json, tempfile
// ============================================================================
//! Event ordering and JSON-line delivery.

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

use std::sync::Arc;

use multisig_ledger_core::AuthorizationLedger;
use multisig_ledger_core::FileEventSink;
use multisig_ledger_core::InMemoryValuePool;
use multisig_ledger_core::LedgerEvent;
use multisig_ledger_core::LedgerEventRecord;
use multisig_ledger_core::LedgerEventSink;
use multisig_ledger_core::NoopEventSink;
use multisig_ledger_core::Payload;
use multisig_ledger_core::StderrEventSink;
use multisig_ledger_core::TransactionIndex;
use serde_json::Value;

use crate::common::REQUIRED;
use crate::common::external;
use crate::common::fixture;
use crate::common::owner1;
use crate::common::owner2;
use crate::common::owner3;
use crate::common::owners;

/// Verifies a full lifecycle emits one event per accepted call, in order.
#[test]
fn lifecycle_emits_ordered_events() {
    let fx = fixture(1);
    let index = fx.ledger.submit(&owner1(), external(), 1, Payload::empty()).unwrap();
    fx.ledger.confirm_transaction(&owner1(), index).unwrap();
    fx.ledger.revoke_confirmation(&owner1(), index).unwrap();
    fx.ledger.confirm_transaction(&owner2(), index).unwrap();
    assert!(fx.ledger.confirm_transaction(&owner2(), index).is_err());
    fx.ledger.confirm_transaction(&owner3(), index).unwrap();
    fx.ledger.execute_transaction(&owner2(), index).unwrap();

    let events = fx.events.events();
    let labels: Vec<&str> = events.iter().map(|record| record.event.label()).collect();
    assert_eq!(
        labels,
        vec![
            "transaction_submitted",
            "transaction_confirmed",
            "confirmation_revoked",
            "transaction_confirmed",
            "transaction_confirmed",
            "transaction_executed",
        ]
    );
    let seqs: Vec<u64> = events.iter().map(|record| record.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4, 5, 6]);
    assert!(events.iter().all(|record| record.event.index() == index));
    assert!(events.windows(2).all(|pair| pair[0].timestamp_ms <= pair[1].timestamp_ms));
}

/// Verifies records serialize flat with the event tag alongside the envelope.
#[test]
fn event_record_serializes_flat_json() {
    let record = LedgerEventRecord {
        seq: 4,
        timestamp_ms: 1_700_000_000_000,
        event: LedgerEvent::TransactionConfirmed {
            owner: owner2(),
            index: TransactionIndex::new(3),
        },
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["event"], "transaction_confirmed");
    assert_eq!(value["seq"], 4);
    assert_eq!(value["index"], 3);
    assert_eq!(value["owner"], owner2().to_string());

    let decoded: LedgerEventRecord = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, record);
}

/// Verifies the file sink appends one JSON object per event.
#[test]
fn file_sink_writes_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let sink = Arc::new(FileEventSink::new(&path).unwrap());
    let ledger =
        AuthorizationLedger::new(owners(), REQUIRED, InMemoryValuePool::new(), Arc::clone(&sink))
            .unwrap();

    let index = ledger.submit(&owner1(), external(), 0, Payload::from(vec![0xca, 0xfe])).unwrap();
    ledger.confirm_transaction(&owner3(), index).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "transaction_submitted");
    assert_eq!(lines[0]["payload"], "0xcafe");
    assert_eq!(lines[0]["amount"], 0);
    assert_eq!(lines[1]["event"], "transaction_confirmed");
    assert_eq!(lines[1]["seq"], 2);
}

/// Verifies reopening the file sink appends rather than truncating.
#[test]
fn file_sink_appends_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let record = LedgerEventRecord::new(
        1,
        LedgerEvent::TransactionExecuted {
            caller: owner1(),
            index: TransactionIndex::new(0),
        },
    );
    FileEventSink::new(&path).unwrap().record(&record);
    FileEventSink::new(&path).unwrap().record(&record);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

/// Verifies the file sink reports an unopenable path.
#[test]
fn file_sink_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("events.jsonl");
    assert!(FileEventSink::new(&path).is_err());
}

/// Verifies discard and stderr sinks accept records without affecting state.
#[test]
fn best_effort_sinks_accept_records() {
    let record = LedgerEventRecord::new(
        1,
        LedgerEvent::ConfirmationRevoked {
            owner: owner1(),
            index: TransactionIndex::new(0),
        },
    );
    NoopEventSink.record(&record);
    StderrEventSink.record(&record);
    let boxed: Box<dyn LedgerEventSink> = Box::new(NoopEventSink);
    boxed.record(&record);
}
