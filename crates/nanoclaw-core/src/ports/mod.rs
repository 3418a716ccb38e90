//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部（コンテナランタイム、時計、ログ出力先）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - コアはランタイムのバイナリを直接叩かない（RuntimeClient 経由）
//! - 現在時刻は Clock から取る（TTL 境界をテストで固定するため）
//! - ログは EventSink に渡す（`log(event, fields)` の契約だけに依存）

pub mod clock;
pub mod event_sink;
pub mod runtime_client;

// 主要な trait を再エクスポート
#[cfg(any(test, feature = "testing"))]
pub use self::clock::FixedClock;
pub use self::clock::{Clock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::runtime_client::RuntimeClient;
