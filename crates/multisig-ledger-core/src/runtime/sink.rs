// crates/multisig-ledger-core/src/runtime/sink.rs
// ============================================================================
// Module: Multisig Ledger Event Sinks
// Description: Built-in sinks for ledger event records.
// Purpose: Emit structured JSON-line event logs without hard dependencies.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Built-in [`LedgerEventSink`] implementations. Records are serialized as
//! one JSON object per line so deployments can route them to their preferred
//! logging pipeline. Write failures are swallowed: event delivery is
//! best-effort and never affects ledger state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::LedgerEventRecord;
use crate::interfaces::LedgerEventSink;

// ============================================================================
// SECTION: No-op Sink
// ============================================================================

/// Sink that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl LedgerEventSink for NoopEventSink {
    fn record(&self, _record: &LedgerEventRecord) {}
}

// ============================================================================
// SECTION: In-Memory Sink
// ============================================================================

/// Sink that retains records in memory; clones share storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventSink {
    /// Recorded events in emission order.
    records: Arc<Mutex<Vec<LedgerEventRecord>>>,
}

impl InMemoryEventSink {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEventRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerEventSink for InMemoryEventSink {
    fn record(&self, record: &LedgerEventRecord) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
    }
}

// ============================================================================
// SECTION: JSON-Line Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrEventSink;

impl LedgerEventSink for StderrEventSink {
    fn record(&self, record: &LedgerEventRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
#[derive(Debug)]
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LedgerEventSink for FileEventSink {
    fn record(&self, record: &LedgerEventRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
