//! nanoclaw - maintenance entry point.
//!
//! `serve` runs the startup sequence (runtime health gate, orphan reaper,
//! attachment cleanup timer) and keeps the timer alive until Ctrl-C.

mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nanoclaw_core::SupervisorBuilder;

use crate::args::{Args, SubCommand};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args.config()?;
    let supervisor = SupervisorBuilder::new(config.clone())
        .build()
        .context("invalid maintenance configuration")?;

    match args.command {
        SubCommand::Serve => {
            let handle = supervisor.start().await?;
            tracing::info!(
                groups_root = %config.groups_root.display(),
                interval_secs = config.cleanup_interval.as_secs(),
                "Maintenance running"
            );

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl-C")?;
            let status = serde_json::to_string(&handle.status())
                .context("failed to serialize maintenance status")?;
            tracing::info!(%status, "Shutting down maintenance");
            handle.shutdown().await;
            Ok(())
        }

        SubCommand::Check => {
            supervisor.health_gate().ensure_runtime_running().await?;
            println!("Container runtime is reachable ({})", config.runtime_bin);
            Ok(())
        }

        SubCommand::Reap => {
            let count = supervisor.reaper().reap_orphans().await;
            println!("Stopped {count} orphaned container(s)");
            Ok(())
        }

        SubCommand::Gc { json } => {
            let collector = Arc::clone(supervisor.collector());
            let removed = tokio::task::spawn_blocking(move || collector.collect())
                .await
                .context("attachment cleanup pass panicked")?;
            if json {
                let report = serde_json::json!({
                    "groups_root": config.groups_root,
                    "ttl_secs": config.attachment_ttl.as_secs(),
                    "removed": removed,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Removed {removed} expired attachment(s)");
            }
            Ok(())
        }
    }
}
