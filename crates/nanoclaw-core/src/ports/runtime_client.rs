//! RuntimeClient port - コンテナランタイムへのコマンド発行
//!
//! # 実装
//! - CliRuntimeClient: ランタイムのバイナリを子プロセスとして実行（本番用）
//! - RecordingRuntimeClient: 台本どおりに応答して呼び出しを記録（テスト用）

use async_trait::async_trait;

use crate::domain::{ContainerRecord, RuntimeError};

/// RuntimeClient はランタイムへの狭いインターフェース
///
/// # 契約
/// - `status`: ランタイムに到達できるときだけ Ok。タイムアウトは呼び出し側が付ける
/// - `list_all`: 停止済みも含む全コンテナ。空の一覧はエラーではない
/// - `stop`: best-effort。すでに止まっている等の失敗は呼び出し側が無視できる
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    async fn status(&self) -> Result<(), RuntimeError>;

    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError>;

    async fn stop(&self, name: &str) -> Result<(), RuntimeError>;
}
