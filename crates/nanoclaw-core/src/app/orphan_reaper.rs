//! OrphanReaper - 前回のプロセスが残したコンテナの回収
//!
//! # フロー
//! 1. RuntimeClient::list_all() で停止済みも含めて一覧を取得
//!    - 失敗 / 解析不能: warn を 1 回出して 0 を返す（パス単位の失敗）
//! 2. 命名規約の prefix に一致する id だけを候補にする
//! 3. 候補ごとに stop。1 件の失敗で残りを止めない（best_effort）
//! 4. 候補数を返す。0 件でなければ info を 1 回出す

use std::sync::Arc;

use crate::app::best_effort::best_effort;
use crate::domain::{MaintenanceError, MaintenanceEvent, NamingConvention};
use crate::ports::{EventSink, RuntimeClient};

pub struct OrphanReaper {
    client: Arc<dyn RuntimeClient>,
    naming: NamingConvention,
    events: Arc<dyn EventSink>,
}

impl OrphanReaper {
    pub fn new(
        client: Arc<dyn RuntimeClient>,
        naming: NamingConvention,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            client,
            naming,
            events,
        }
    }

    /// 孤児コンテナを stop し、候補数を返す
    ///
    /// 戻り値は stop を試みた候補の数（stop が成功した数ではない）。
    pub async fn reap_orphans(&self) -> usize {
        let listing = match self.client.list_all().await {
            Ok(listing) => listing,
            Err(source) => {
                let err = MaintenanceError::ContainerListing(source);
                self.events.emit(MaintenanceEvent::OrphanCleanupFailed {
                    err: err.to_string(),
                });
                return 0;
            }
        };

        let orphans = self.naming.owned_names(listing);
        for name in &orphans {
            best_effort(self.client.stop(name).await.map_err(|source| {
                MaintenanceError::ContainerStop {
                    name: name.clone(),
                    source,
                }
            }));
        }

        let count = orphans.len();
        if count > 0 {
            self.events.emit(MaintenanceEvent::OrphansStopped {
                count,
                names: orphans,
            });
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{RecordingEventSink, RecordingRuntimeClient, RuntimeCall};

    fn reaper(
        client: RecordingRuntimeClient,
    ) -> (OrphanReaper, Arc<RecordingRuntimeClient>, Arc<RecordingEventSink>) {
        let client = Arc::new(client);
        let events = Arc::new(RecordingEventSink::new());
        let reaper = OrphanReaper::new(client.clone(), NamingConvention::default(), events.clone());
        (reaper, client, events)
    }

    #[tokio::test]
    async fn stops_only_prefixed_containers() {
        let (reaper, client, events) = reaper(
            RecordingRuntimeClient::new().with_containers(["nanoclaw-abc", "other-xyz"]),
        );

        let count = reaper.reap_orphans().await;

        assert_eq!(count, 1);
        assert_eq!(client.stop_attempts(), vec!["nanoclaw-abc"]);
        assert_eq!(
            events.events(),
            vec![MaintenanceEvent::OrphansStopped {
                count: 1,
                names: vec!["nanoclaw-abc".into()]
            }]
        );
    }

    #[tokio::test]
    async fn stop_failure_does_not_abort_remaining_candidates() {
        let (reaper, client, events) = reaper(
            RecordingRuntimeClient::new()
                .with_containers(["nanoclaw-a", "nanoclaw-b", "nanoclaw-c"])
                .failing_stop("nanoclaw-a"),
        );

        let count = reaper.reap_orphans().await;

        assert_eq!(count, 3);
        assert_eq!(
            client.stop_attempts(),
            vec!["nanoclaw-a", "nanoclaw-b", "nanoclaw-c"]
        );
        assert_eq!(events.count_of("Failed to clean up orphaned containers"), 0);
        assert_eq!(events.count_of("Stopped orphaned containers"), 1);
    }

    #[tokio::test]
    async fn listing_failure_is_a_warning_and_zero() {
        let (reaper, client, events) =
            reaper(RecordingRuntimeClient::new().failing_listing("unexpected token"));

        let count = reaper.reap_orphans().await;

        assert_eq!(count, 0);
        assert_eq!(client.calls(), vec![RuntimeCall::ListAll]);
        let recorded = events.events();
        assert_eq!(recorded.len(), 1);
        assert!(matches!(
            &recorded[0],
            MaintenanceEvent::OrphanCleanupFailed { err } if err.contains("unexpected token")
        ));
    }

    #[tokio::test]
    async fn empty_listing_is_quiet() {
        let (reaper, client, events) = reaper(RecordingRuntimeClient::new());

        assert_eq!(reaper.reap_orphans().await, 0);
        assert!(client.stop_attempts().is_empty());
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn no_matching_prefix_is_quiet() {
        let (reaper, client, events) =
            reaper(RecordingRuntimeClient::new().with_containers(["other-xyz", "postgres"]));

        assert_eq!(reaper.reap_orphans().await, 0);
        assert!(client.stop_attempts().is_empty());
        assert!(events.events().is_empty());
    }
}
