//! RecordingRuntimeClient - scripted in-memory runtime for tests.
//!
//! It never spawns a process. Responses are configured up front and every call
//! is recorded so tests can assert exactly which containers were targeted.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{ContainerRecord, RuntimeError};
use crate::ports::RuntimeClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Status,
    ListAll,
    Stop(String),
}

#[derive(Debug, Clone)]
enum StatusScript {
    Ready,
    Fail(String),
    Hang,
}

#[derive(Debug)]
pub struct RecordingRuntimeClient {
    status: StatusScript,
    listing: Result<Vec<ContainerRecord>, String>,
    failing_stops: HashSet<String>,
    calls: Mutex<Vec<RuntimeCall>>,
}

impl RecordingRuntimeClient {
    /// A reachable runtime with no containers.
    pub fn new() -> Self {
        Self {
            status: StatusScript::Ready,
            listing: Ok(Vec::new()),
            failing_stops: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_containers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listing = Ok(ids.into_iter().map(ContainerRecord::new).collect());
        self
    }

    pub fn failing_listing(mut self, message: impl Into<String>) -> Self {
        self.listing = Err(message.into());
        self
    }

    pub fn failing_status(mut self, message: impl Into<String>) -> Self {
        self.status = StatusScript::Fail(message.into());
        self
    }

    /// `status` never resolves; only a caller-side timeout gets past it.
    pub fn hanging_status(mut self) -> Self {
        self.status = StatusScript::Hang;
        self
    }

    pub fn failing_stop(mut self, name: impl Into<String>) -> Self {
        self.failing_stops.insert(name.into());
        self
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names passed to `stop`, in call order (including failed attempts).
    pub fn stop_attempts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RuntimeCall::Stop(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RuntimeCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Default for RecordingRuntimeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuntimeClient for RecordingRuntimeClient {
    async fn status(&self) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Status);
        match &self.status {
            StatusScript::Ready => Ok(()),
            StatusScript::Fail(message) => Err(RuntimeError::Other(message.clone())),
            StatusScript::Hang => std::future::pending().await,
        }
    }

    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        self.record(RuntimeCall::ListAll);
        self.listing.clone().map_err(RuntimeError::Other)
    }

    async fn stop(&self, name: &str) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Stop(name.to_string()));
        if self.failing_stops.contains(name) {
            return Err(RuntimeError::Other(format!("container {name} is not running")));
        }
        Ok(())
    }
}
