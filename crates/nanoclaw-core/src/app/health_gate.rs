//! RuntimeHealthGate - 起動時のランタイム到達確認
//!
//! # フロー
//! 1. RuntimeClient::status() を probe_timeout 付きで実行
//! 2. 成功: debug ログを出して戻る
//! 3. 失敗（非 0 終了 / タイムアウト / 起動失敗）: error ログ + stderr に対処法を表示し、
//!    MaintenanceError::RuntimeUnavailable を返す（呼び出し元は起動を中止する）

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{MaintenanceError, MaintenanceEvent, RuntimeError};
use crate::ports::{EventSink, RuntimeClient};

pub struct RuntimeHealthGate {
    client: Arc<dyn RuntimeClient>,
    events: Arc<dyn EventSink>,
    probe_timeout: Duration,
}

impl RuntimeHealthGate {
    pub fn new(
        client: Arc<dyn RuntimeClient>,
        events: Arc<dyn EventSink>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            client,
            events,
            probe_timeout,
        }
    }

    /// ランタイムに到達できなければ起動を止める
    ///
    /// ワークロードのスケジュールより前に await すること。
    pub async fn ensure_runtime_running(&self) -> Result<(), MaintenanceError> {
        let probe = tokio::time::timeout(self.probe_timeout, self.client.status())
            .await
            .unwrap_or(Err(RuntimeError::ProbeTimeout(self.probe_timeout)));

        match probe {
            Ok(()) => {
                self.events.emit(MaintenanceEvent::RuntimeReady);
                Ok(())
            }
            Err(err) => {
                self.events.emit(MaintenanceEvent::RuntimeUnreachable {
                    err: err.to_string(),
                });
                eprintln!("{}", remediation_banner());
                Err(MaintenanceError::RuntimeUnavailable(err))
            }
        }
    }
}

const BANNER_WIDTH: usize = 66;

/// stderr に出す致命エラーの案内
pub fn remediation_banner() -> String {
    let lines = [
        "FATAL: Container runtime failed to start",
        "",
        "Agents cannot run without a container runtime. To fix:",
        "1. Ensure Apple Container is installed (brew install container)",
        "2. Run: container system start",
        "3. Restart NanoClaw",
    ];

    let rule = "═".repeat(BANNER_WIDTH);
    let mut banner = format!("\n╔{rule}╗\n");
    for line in lines {
        banner.push_str(&format!("║  {line:<width$}║\n", width = BANNER_WIDTH - 2));
    }
    banner.push_str(&format!("╚{rule}╝\n"));
    banner
}
