//! Status - スケジューラの状態スナップショット
//!
//! MaintenanceHandle::status() で取得する。`nanoclaw serve` の終了時に JSON でログ出力する。

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    /// 完走したパスの数
    pub runs: u64,
    /// panic などで完走しなかったパスの数
    pub aborted_runs: u64,
    pub last_removed: Option<usize>,
    pub total_removed: u64,
    pub last_run_at: Option<DateTime<Utc>>,
}

impl MaintenanceStatus {
    /// 1 パス分の結果を反映。`removed` が None なら中断したパス。
    pub fn record(&mut self, removed: Option<usize>, at: DateTime<Utc>) {
        match removed {
            Some(removed) => {
                self.runs += 1;
                self.total_removed += removed as u64;
            }
            None => self.aborted_runs += 1,
        }
        self.last_removed = removed;
        self.last_run_at = Some(at);
    }
}
