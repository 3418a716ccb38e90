//! EventSink port - イベント記録の抽象化
//!
//! # 実装
//! - TracingEventSink: tracing へ構造化ログとして出力（本番用）
//! - RecordingEventSink: 受け取ったイベントを保持するだけ（テスト用）

use crate::domain::MaintenanceEvent;

/// EventSink は保守イベントを記録
///
/// emit は失敗しない。ログが書けないことを理由に保守パスを止めない。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: MaintenanceEvent);
}
