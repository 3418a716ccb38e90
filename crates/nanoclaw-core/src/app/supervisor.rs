//! SupervisorBuilder - 保守サブシステムの構築とワイヤリング
//!
//! # ポイント
//! - Builder パターン（ports は差し替え可能、未指定なら本番用の実装）
//! - 起動時検証（Fail-fast 設計）: 空の prefix や 0 の間隔は build() で弾く
//! - 起動シーケンス: health gate → orphan reaper → scheduler

use std::sync::Arc;
use std::time::Duration;

use crate::app::attachment_gc::AttachmentGarbageCollector;
use crate::app::health_gate::RuntimeHealthGate;
use crate::app::orphan_reaper::OrphanReaper;
use crate::app::scheduler::{MaintenanceHandle, MaintenanceScheduler};
use crate::config::MaintenanceConfig;
use crate::domain::{MaintenanceError, NamingConvention, NamingConventionError};
use crate::impls::{CliRuntimeClient, TracingEventSink};
use crate::ports::{Clock, EventSink, RuntimeClient, SystemClock};

/// SupervisorBuilder は Supervisor を構築
///
/// # 使用例
/// ```ignore
/// let supervisor = SupervisorBuilder::new(MaintenanceConfig::from_env()).build()?;
/// let handle = supervisor.start().await?; // ランタイムに届かなければここで Err
/// ```
pub struct SupervisorBuilder {
    config: MaintenanceConfig,
    runtime_client: Option<Arc<dyn RuntimeClient>>,
    event_sink: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
}

/// BuildError は構築時の設定エラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Naming(#[from] NamingConventionError),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

impl SupervisorBuilder {
    pub fn new(config: MaintenanceConfig) -> Self {
        Self {
            config,
            runtime_client: None,
            event_sink: None,
            clock: None,
        }
    }

    pub fn runtime_client(mut self, client: Arc<dyn RuntimeClient>) -> Self {
        self.runtime_client = Some(client);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Supervisor, BuildError> {
        let config = self.config;
        let naming = NamingConvention::new(config.container_prefix.clone())?;
        non_zero("attachment TTL", config.attachment_ttl)?;
        non_zero("cleanup interval", config.cleanup_interval)?;
        non_zero("runtime probe timeout", config.probe_timeout)?;

        let client: Arc<dyn RuntimeClient> = self
            .runtime_client
            .unwrap_or_else(|| Arc::new(CliRuntimeClient::new(config.runtime_bin.clone())));
        let events: Arc<dyn EventSink> = self
            .event_sink
            .unwrap_or_else(|| Arc::new(TracingEventSink));
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let collector = Arc::new(AttachmentGarbageCollector::new(
            config.groups_root.clone(),
            config.attachment_policy(),
            clock.clone(),
            events.clone(),
        ));

        Ok(Supervisor {
            health_gate: RuntimeHealthGate::new(
                client.clone(),
                events.clone(),
                config.probe_timeout,
            ),
            reaper: OrphanReaper::new(client, naming, events.clone()),
            scheduler: MaintenanceScheduler::new(
                collector.clone(),
                config.cleanup_interval,
                clock,
                events,
            ),
            collector,
        })
    }
}

fn non_zero(what: &'static str, value: Duration) -> Result<(), BuildError> {
    if value.is_zero() {
        return Err(BuildError::ZeroDuration(what));
    }
    Ok(())
}

/// Supervisor は構築済みの保守コンポーネント一式
pub struct Supervisor {
    health_gate: RuntimeHealthGate,
    reaper: OrphanReaper,
    collector: Arc<AttachmentGarbageCollector>,
    scheduler: MaintenanceScheduler,
}

impl Supervisor {
    pub fn health_gate(&self) -> &RuntimeHealthGate {
        &self.health_gate
    }

    pub fn reaper(&self) -> &OrphanReaper {
        &self.reaper
    }

    pub fn collector(&self) -> &Arc<AttachmentGarbageCollector> {
        &self.collector
    }

    /// 起動シーケンスを実行
    ///
    /// 1. health gate（失敗したら Err を返し、以降は実行しない）
    /// 2. orphan reaper（失敗は warn のみ）
    /// 3. scheduler（1 回目の GC を実行してから戻る）
    pub async fn start(self) -> Result<MaintenanceHandle, MaintenanceError> {
        self.health_gate.ensure_runtime_running().await?;
        self.reaper.reap_orphans().await;
        Ok(self.scheduler.start().await)
    }
}
