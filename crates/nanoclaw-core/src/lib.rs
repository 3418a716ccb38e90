//! nanoclaw-core
//!
//! Maintenance building blocks for the nanoclaw container supervisor.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（container, attachment, errors, events）
//! - **ports**: 抽象化レイヤー（RuntimeClient, Clock, EventSink）
//! - **app**: 保守ロジック（health gate, orphan reaper, attachment GC, scheduler, supervisor）
//! - **impls**: ports の実装（CLI ランタイム、tracing sink、テスト用の記録実装）
//! - **config**: 設定と環境変数による上書き

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{
    AttachmentGarbageCollector, BuildError, MaintenanceHandle, MaintenanceScheduler,
    MaintenanceStatus, OrphanReaper, RuntimeHealthGate, Supervisor, SupervisorBuilder,
};
pub use config::MaintenanceConfig;
pub use domain::{MaintenanceError, MaintenanceEvent};
