//! TracingEventSink - forwards maintenance events to `tracing` with structured fields.

use tracing::{debug, error, info, warn};

use crate::domain::MaintenanceEvent;
use crate::ports::EventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: MaintenanceEvent) {
        let message = event.message();
        match event {
            MaintenanceEvent::RuntimeReady => debug!("{message}"),
            MaintenanceEvent::RuntimeUnreachable { err } => error!(%err, "{message}"),
            MaintenanceEvent::OrphansStopped { count, names } => {
                info!(count, ?names, "{message}")
            }
            MaintenanceEvent::OrphanCleanupFailed { err } => warn!(%err, "{message}"),
            MaintenanceEvent::AttachmentsCleaned { count } => info!(count, "{message}"),
            MaintenanceEvent::GroupsRootUnreadable { path, err, missing } => {
                if missing {
                    debug!(path = %path.display(), %err, "{message}")
                } else {
                    warn!(path = %path.display(), %err, "{message}")
                }
            }
            MaintenanceEvent::CollectorPassAborted { err } => warn!(%err, "{message}"),
        }
    }
}
