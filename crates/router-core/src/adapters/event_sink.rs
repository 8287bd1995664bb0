//! Event sink adapters: a recording sink for tests and introspection, and a
//! structured-logging sink.

use crate::events::{EventRecord, RouterEvent};
use crate::ports::outbound::EventSink;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Records every emitted event in order.
#[derive(Clone, Default)]
pub struct RecordingEventSink {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingEventSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records emitted so far, in emission order.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().expect("event sink lock poisoned").clone()
    }

    /// Event payloads only, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<RouterEvent> {
        self.records().into_iter().map(|r| r.event).collect()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.records.lock().expect("event sink lock poisoned").clear();
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, record: EventRecord) {
        self.records
            .lock()
            .expect("event sink lock poisoned")
            .push(record);
    }
}

/// Emits events as structured `tracing` records.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, record: EventRecord) {
        info!(
            correlation_id = %record.correlation_id,
            event = ?record.event,
            "router event"
        );
    }
}
