//! Events - 保守処理が記録するイベント
//!
//! すべてのログ出力は `MaintenanceEvent` として `EventSink` に渡す。
//! 出力先（tracing / テスト用の記録）は sink 側で決まる。

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// MaintenanceEvent は保守サブシステムで発生したイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceEvent {
    /// status probe が成功した
    RuntimeReady,

    /// status probe が失敗した（起動中止）
    RuntimeUnreachable { err: String },

    /// 孤児コンテナを stop した（1 パスにつき最大 1 回）
    OrphansStopped { count: usize, names: Vec<String> },

    /// 一覧取得に失敗したため、そのパスを諦めた
    OrphanCleanupFailed { err: String },

    /// 期限切れ添付を削除した（1 パスにつき最大 1 回）
    AttachmentsCleaned { count: usize },

    /// groups root が読めなかった。存在しないだけなら `missing`
    GroupsRootUnreadable {
        path: PathBuf,
        err: String,
        missing: bool,
    },

    /// GC パスが panic などで完走しなかった
    CollectorPassAborted { err: String },
}

impl MaintenanceEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            MaintenanceEvent::RuntimeReady => EventLevel::Debug,
            MaintenanceEvent::RuntimeUnreachable { .. } => EventLevel::Error,
            MaintenanceEvent::OrphansStopped { .. } => EventLevel::Info,
            MaintenanceEvent::OrphanCleanupFailed { .. } => EventLevel::Warn,
            MaintenanceEvent::AttachmentsCleaned { .. } => EventLevel::Info,
            MaintenanceEvent::GroupsRootUnreadable { missing: true, .. } => EventLevel::Debug,
            MaintenanceEvent::GroupsRootUnreadable { missing: false, .. } => EventLevel::Warn,
            MaintenanceEvent::CollectorPassAborted { .. } => EventLevel::Warn,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MaintenanceEvent::RuntimeReady => "Container runtime already running",
            MaintenanceEvent::RuntimeUnreachable { .. } => "Failed to reach container runtime",
            MaintenanceEvent::OrphansStopped { .. } => "Stopped orphaned containers",
            MaintenanceEvent::OrphanCleanupFailed { .. } => {
                "Failed to clean up orphaned containers"
            }
            MaintenanceEvent::AttachmentsCleaned { .. } => "Cleaned up old attachments",
            MaintenanceEvent::GroupsRootUnreadable { .. } => "Skipped attachment cleanup",
            MaintenanceEvent::CollectorPassAborted { .. } => "Attachment cleanup pass aborted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ready(MaintenanceEvent::RuntimeReady, EventLevel::Debug)]
    #[case::unreachable(MaintenanceEvent::RuntimeUnreachable { err: "x".into() }, EventLevel::Error)]
    #[case::orphans(MaintenanceEvent::OrphansStopped { count: 1, names: vec!["nanoclaw-a".into()] }, EventLevel::Info)]
    #[case::listing(MaintenanceEvent::OrphanCleanupFailed { err: "x".into() }, EventLevel::Warn)]
    #[case::cleaned(MaintenanceEvent::AttachmentsCleaned { count: 1 }, EventLevel::Info)]
    #[case::root_missing(
        MaintenanceEvent::GroupsRootUnreadable { path: PathBuf::from("groups"), err: "x".into(), missing: true },
        EventLevel::Debug
    )]
    #[case::root_denied(
        MaintenanceEvent::GroupsRootUnreadable { path: PathBuf::from("groups"), err: "x".into(), missing: false },
        EventLevel::Warn
    )]
    fn events_carry_expected_level(#[case] event: MaintenanceEvent, #[case] level: EventLevel) {
        assert_eq!(event.level(), level);
    }

    #[test]
    fn messages_match_log_contract() {
        assert_eq!(
            MaintenanceEvent::AttachmentsCleaned { count: 3 }.message(),
            "Cleaned up old attachments"
        );
        assert_eq!(
            MaintenanceEvent::OrphansStopped { count: 0, names: vec![] }.message(),
            "Stopped orphaned containers"
        );
    }
}
