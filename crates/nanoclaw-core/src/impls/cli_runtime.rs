//! CliRuntimeClient - drives the container runtime binary as a child process.
//!
//! All runtime-specific command lines live in this file, so swapping runtimes
//! means changing one adapter.

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::domain::{ContainerRecord, RuntimeError};
use crate::ports::RuntimeClient;

/// Runtime client backed by the `container` CLI (or a compatible binary).
#[derive(Debug, Clone)]
pub struct CliRuntimeClient {
    bin: String,
}

impl CliRuntimeClient {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.bin.clone();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    /// Run one runtime command to completion.
    ///
    /// The child is killed if this future is dropped, so a caller-side timeout
    /// does not leave a stray probe running.
    async fn run(&self, args: &[&str]) -> Result<Output, RuntimeError> {
        let command = self.describe(args);
        let output = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RuntimeError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RuntimeError::Exit {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl RuntimeClient for CliRuntimeClient {
    async fn status(&self) -> Result<(), RuntimeError> {
        self.run(&["system", "status"]).await.map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let output = self.run(&["list", "--format", "json", "--all"]).await?;
        parse_listing(&output.stdout)
    }

    async fn stop(&self, name: &str) -> Result<(), RuntimeError> {
        self.run(&["stop", name]).await.map(|_| ())
    }
}

/// One entry of `container list --format json`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ListedContainer {
    configuration: ListedConfiguration,
}

#[derive(Debug, Deserialize)]
struct ListedConfiguration {
    id: String,
}

/// Parse the JSON listing. Empty output means "no containers".
pub(crate) fn parse_listing(stdout: &[u8]) -> Result<Vec<ContainerRecord>, RuntimeError> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let listed: Vec<ListedContainer> = serde_json::from_slice(stdout)?;
    Ok(listed
        .into_iter()
        .map(|c| ContainerRecord::new(c.configuration.id))
        .collect())
}

/// CLI args for a read-only bind mount.
pub fn readonly_mount_args(host_path: &Path, container_path: &str) -> Vec<String> {
    vec![
        "-v".to_string(),
        format!("{}:{}:ro", host_path.display(), container_path),
    ]
}
