//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて保守ロジックを実装します。
//!
//! # 主要コンポーネント
//! - **SupervisorBuilder / Supervisor**: 構築と起動シーケンス
//! - **RuntimeHealthGate**: 起動時のランタイム到達確認（致命）
//! - **OrphanReaper**: 前回プロセスの孤児コンテナ回収
//! - **AttachmentGarbageCollector**: 期限切れ添付の削除
//! - **MaintenanceScheduler**: GC の定期実行
//! - **MaintenanceStatus**: スケジューラの状態

pub mod attachment_gc;
pub mod best_effort;
pub mod health_gate;
pub mod orphan_reaper;
pub mod scheduler;
pub mod status;
pub mod supervisor;

// 主要な型を再エクスポート
pub use self::attachment_gc::AttachmentGarbageCollector;
pub use self::best_effort::best_effort;
pub use self::health_gate::{RuntimeHealthGate, remediation_banner};
pub use self::orphan_reaper::OrphanReaper;
pub use self::scheduler::{MaintenanceHandle, MaintenanceScheduler};
pub use self::status::MaintenanceStatus;
pub use self::supervisor::{BuildError, Supervisor, SupervisorBuilder};
