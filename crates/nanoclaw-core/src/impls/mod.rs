//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **CliRuntimeClient**: ランタイムのバイナリを叩く本番用 RuntimeClient
//! - **TracingEventSink**: tracing に出力する本番用 EventSink
//! - **RecordingRuntimeClient**: 台本どおりに応答するテスト用 RuntimeClient
//! - **RecordingEventSink**: イベントを溜めるだけのテスト用 EventSink
//!
//! Recording* はテスト専用。下流クレートからは `testing` feature で使える。

pub mod cli_runtime;
#[cfg(any(test, feature = "testing"))]
pub mod recording_runtime;
#[cfg(any(test, feature = "testing"))]
pub mod recording_sink;
pub mod tracing_sink;

// 主要な型を再エクスポート
pub use self::cli_runtime::{CliRuntimeClient, readonly_mount_args};
#[cfg(any(test, feature = "testing"))]
pub use self::recording_runtime::{RecordingRuntimeClient, RuntimeCall};
#[cfg(any(test, feature = "testing"))]
pub use self::recording_sink::RecordingEventSink;
pub use self::tracing_sink::TracingEventSink;
