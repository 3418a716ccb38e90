//! Configuration for the maintenance subsystem.
//!
//! Defaults follow the reference policy (7 day attachment TTL, hourly cleanup,
//! 10 s runtime probe). Environment overrides are read once at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{AttachmentPolicy, DEFAULT_CONTAINER_PREFIX};

/// Overrides the runtime binary (path or command name).
pub const RUNTIME_BIN_ENV: &str = "CONTAINER_RUNTIME";
/// Overrides the groups root directory.
pub const GROUPS_DIR_ENV: &str = "NANOCLAW_GROUPS_DIR";

pub const DEFAULT_RUNTIME_BIN: &str = "/opt/homebrew/bin/container";
pub const DEFAULT_GROUPS_DIR: &str = "groups";
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceConfig {
    /// Runtime binary used by the CLI adapter.
    pub runtime_bin: String,
    /// `<groups_root>/<group>/attachments/<file>`
    pub groups_root: PathBuf,
    /// Naming-convention prefix of containers owned by this system.
    pub container_prefix: String,
    pub attachment_ttl: Duration,
    pub cleanup_interval: Duration,
    pub probe_timeout: Duration,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            runtime_bin: DEFAULT_RUNTIME_BIN.to_string(),
            groups_root: PathBuf::from(DEFAULT_GROUPS_DIR),
            container_prefix: DEFAULT_CONTAINER_PREFIX.to_string(),
            attachment_ttl: AttachmentPolicy::DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl MaintenanceConfig {
    /// Defaults with `CONTAINER_RUNTIME` / `NANOCLAW_GROUPS_DIR` applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut config = Self::default();
        if let Some(bin) = non_empty(RUNTIME_BIN_ENV) {
            config.runtime_bin = bin;
        }
        if let Some(dir) = non_empty(GROUPS_DIR_ENV) {
            config.groups_root = PathBuf::from(dir);
        }
        config
    }

    pub fn attachment_policy(&self) -> AttachmentPolicy {
        AttachmentPolicy::new(self.attachment_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_policy() {
        let config = MaintenanceConfig::default();
        assert_eq!(config.runtime_bin, "/opt/homebrew/bin/container");
        assert_eq!(config.container_prefix, "nanoclaw-");
        assert_eq!(config.attachment_ttl, Duration::from_secs(604_800));
        assert_eq!(config.cleanup_interval, Duration::from_secs(3_600));
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_overrides_runtime_and_groups_root() {
        let config = MaintenanceConfig::from_lookup(lookup_from(&[
            (RUNTIME_BIN_ENV, "docker"),
            (GROUPS_DIR_ENV, "/var/lib/nanoclaw/groups"),
        ]));
        assert_eq!(config.runtime_bin, "docker");
        assert_eq!(config.groups_root, PathBuf::from("/var/lib/nanoclaw/groups"));
    }

    #[test]
    fn empty_env_values_fall_back_to_defaults() {
        let config = MaintenanceConfig::from_lookup(lookup_from(&[(RUNTIME_BIN_ENV, "")]));
        assert_eq!(config.runtime_bin, DEFAULT_RUNTIME_BIN);
    }
}
