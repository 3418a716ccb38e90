//! CLI argument parsing

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nanoclaw_core::MaintenanceConfig;

const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

#[derive(Debug, Parser)]
#[command(name = "nanoclaw")]
#[command(version, about = "Maintenance for nanoclaw agent containers and attachments", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Container runtime binary (defaults to $CONTAINER_RUNTIME, then /opt/homebrew/bin/container)
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Directory holding one folder per group (defaults to $NANOCLAW_GROUPS_DIR, then ./groups)
    #[arg(long, global = true)]
    pub groups_dir: Option<PathBuf>,

    /// Name prefix of containers owned by nanoclaw
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Delete attachments older than this many hours
    #[arg(
        long,
        global = true,
        value_name = "HOURS",
        value_parser = clap::value_parser!(u64).range(1..=(u64::MAX / SECS_PER_HOUR))
    )]
    pub attachment_ttl_hours: Option<u64>,

    /// Minutes between attachment cleanup passes
    #[arg(
        long,
        global = true,
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(1..=(u64::MAX / SECS_PER_MINUTE))
    )]
    pub cleanup_interval_mins: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// Check the runtime, stop orphans, then clean attachments until Ctrl-C
    Serve,

    /// Verify the container runtime is reachable
    Check,

    /// Stop containers left over from previous runs
    Reap,

    /// Run one attachment cleanup pass
    Gc {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Environment-derived config with explicit flags applied on top.
    pub fn config(&self) -> Result<MaintenanceConfig> {
        let mut config = MaintenanceConfig::from_env();
        if let Some(runtime) = &self.runtime {
            config.runtime_bin = runtime.clone();
        }
        if let Some(dir) = &self.groups_dir {
            config.groups_root = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.container_prefix = prefix.clone();
        }
        if let Some(hours) = self.attachment_ttl_hours {
            let secs = hours
                .checked_mul(SECS_PER_HOUR)
                .with_context(|| format!("--attachment-ttl-hours {hours} is too large"))?;
            config.attachment_ttl = Duration::from_secs(secs);
        }
        if let Some(mins) = self.cleanup_interval_mins {
            let secs = mins
                .checked_mul(SECS_PER_MINUTE)
                .with_context(|| format!("--cleanup-interval-mins {mins} is too large"))?;
            config.cleanup_interval = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "nanoclaw",
            "gc",
            "--json",
            "--runtime",
            "docker",
            "--groups-dir",
            "/tmp/groups",
            "--prefix",
            "test-",
            "--attachment-ttl-hours",
            "24",
            "--cleanup-interval-mins",
            "5",
        ])
        .unwrap();

        assert!(matches!(args.command, SubCommand::Gc { json: true }));
        let config = args.config().unwrap();
        assert_eq!(config.runtime_bin, "docker");
        assert_eq!(config.groups_root, PathBuf::from("/tmp/groups"));
        assert_eq!(config.container_prefix, "test-");
        assert_eq!(config.attachment_ttl, Duration::from_secs(86_400));
        assert_eq!(config.cleanup_interval, Duration::from_secs(300));
    }

    #[test]
    fn oversized_durations_are_rejected_at_parse_time() {
        let too_many_hours = (u64::MAX / SECS_PER_HOUR + 1).to_string();
        let too_many_mins = (u64::MAX / SECS_PER_MINUTE + 1).to_string();

        let ttl = ["nanoclaw", "gc", "--attachment-ttl-hours", too_many_hours.as_str()];
        assert!(Args::try_parse_from(ttl).is_err());

        let interval = ["nanoclaw", "gc", "--cleanup-interval-mins", too_many_mins.as_str()];
        assert!(Args::try_parse_from(interval).is_err());
    }

    #[test]
    fn largest_accepted_ttl_does_not_wrap() {
        let max_hours = (u64::MAX / SECS_PER_HOUR).to_string();
        let argv = ["nanoclaw", "gc", "--attachment-ttl-hours", max_hours.as_str()];
        let config = Args::try_parse_from(argv).unwrap().config().unwrap();

        assert_eq!(
            config.attachment_ttl,
            Duration::from_secs(u64::MAX / SECS_PER_HOUR * SECS_PER_HOUR)
        );
    }

    #[test]
    fn config_rejects_overflowing_durations() {
        let mut args = Args::try_parse_from(["nanoclaw", "gc"]).unwrap();
        args.attachment_ttl_hours = Some(u64::MAX);
        assert!(args.config().is_err());

        args.attachment_ttl_hours = None;
        args.cleanup_interval_mins = Some(u64::MAX);
        assert!(args.config().is_err());
    }

    #[test]
    fn unset_flags_keep_reference_policy() {
        let args = Args::try_parse_from(["nanoclaw", "serve"]).unwrap();
        let config = args.config().unwrap();
        assert_eq!(config.container_prefix, "nanoclaw-");
        assert_eq!(config.attachment_ttl, Duration::from_secs(7 * 24 * 60 * 60));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["nanoclaw"]).is_err());
    }
}
