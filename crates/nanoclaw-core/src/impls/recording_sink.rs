//! RecordingEventSink - keeps every emitted event in memory.

use std::sync::{Mutex, PoisonError};

use crate::domain::MaintenanceEvent;
use crate::ports::EventSink;

#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<MaintenanceEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MaintenanceEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events with the given log message.
    pub fn count_of(&self, message: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.message() == message)
            .count()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: MaintenanceEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
