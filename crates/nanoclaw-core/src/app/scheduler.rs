//! MaintenanceScheduler - 添付 GC の定期実行
//!
//! # フロー
//! 1. start() の中で 1 回目のパスを実行し、完了してから戻る
//! 2. 以後は interval ごとに 1 パス（単一タスクなのでパス同士は重ならない）
//! 3. MaintenanceHandle::stop() / shutdown() / drop でタイマーを止める
//!
//! reaper と health gate はここでは回さない（起動シーケンスで 1 回だけ実行する）。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::app::attachment_gc::AttachmentGarbageCollector;
use crate::app::status::MaintenanceStatus;
use crate::domain::MaintenanceEvent;
use crate::ports::{Clock, EventSink};

/// プロセスに 1 つだけのメンテナンスタイマー
///
/// `start` は self を消費するので、同じスケジューラから 2 本目のタイマーは作れない。
pub struct MaintenanceScheduler {
    collector: Arc<AttachmentGarbageCollector>,
    interval: Duration,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl MaintenanceScheduler {
    pub fn new(
        collector: Arc<AttachmentGarbageCollector>,
        interval: Duration,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            collector,
            interval,
            clock,
            events,
        }
    }

    /// 1 回目のパスを実行してからタイマーを起動する
    pub async fn start(self) -> MaintenanceHandle {
        let mut status = MaintenanceStatus::default();
        let removed = self.run_pass().await;
        status.record(removed, self.clock.now());

        let (status_tx, status_rx) = watch::channel(status);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(status_tx, shutdown_rx));

        MaintenanceHandle {
            shutdown_tx,
            status_rx,
            join,
        }
    }

    async fn run(
        self,
        status_tx: watch::Sender<MaintenanceStatus>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // sender が drop された（handle が捨てられた）場合も止める
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = self.run_pass().await;
                    let at = self.clock.now();
                    status_tx.send_modify(|status| status.record(removed, at));
                }
            }
        }
    }

    /// ブロッキング fs を使うので blocking pool で実行。panic してもループは続ける。
    async fn run_pass(&self) -> Option<usize> {
        let collector = Arc::clone(&self.collector);
        match tokio::task::spawn_blocking(move || collector.collect()).await {
            Ok(removed) => Some(removed),
            Err(err) => {
                self.events.emit(MaintenanceEvent::CollectorPassAborted {
                    err: err.to_string(),
                });
                None
            }
        }
    }
}

/// 起動済みタイマーのハンドル
/// - `stop()` で停止を要求（実行中のパスは最後まで走る）
/// - `shutdown()` で停止してタスクの終了を待つ
/// - handle を drop してもタイマーは止まる
#[derive(Debug)]
pub struct MaintenanceHandle {
    shutdown_tx: watch::Sender<bool>,
    status_rx: watch::Receiver<MaintenanceStatus>,
    join: JoinHandle<()>,
}

impl MaintenanceHandle {
    pub fn stop(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown(self) {
        self.stop();
        let _ = self.join.await;
    }

    pub fn status(&self) -> MaintenanceStatus {
        self.status_rx.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
