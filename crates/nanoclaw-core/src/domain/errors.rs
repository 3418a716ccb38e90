//! Errors - エラー型と分類
//!
//! # 分類（運用上の扱い）
//! - Fatal: 起動時にランタイムへ到達できない。呼び出し元へ伝播し、起動を止める
//! - Pass: 一覧取得そのものが失敗。そのパスは 0 件で終わり、warn を 1 回出す
//! - Item: 1 ファイル / 1 コンテナの失敗。握りつぶして兄弟アイテムの処理を続ける

use std::path::PathBuf;
use std::time::Duration;

/// ErrorKind は保守処理のエラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fatal,
    Pass,
    Item,
}

/// Raw failure reported by a container runtime adapter.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "`{command}` failed ({}): {stderr}",
        .code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
    )]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("runtime status probe timed out after {0:?}")]
    ProbeTimeout(Duration),

    #[error("malformed container listing: {0}")]
    MalformedListing(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// MaintenanceError は保守サブシステムのエラー
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("Container runtime is required but failed to start")]
    RuntimeUnavailable(#[source] RuntimeError),

    #[error("failed to list containers: {0}")]
    ContainerListing(#[source] RuntimeError),

    #[error("failed to stop container {name}: {source}")]
    ContainerStop {
        name: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to read groups root {}: {source}", .path.display())]
    GroupsRootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to process attachment {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaintenanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MaintenanceError::RuntimeUnavailable(_) => ErrorKind::Fatal,
            MaintenanceError::ContainerListing(_)
            | MaintenanceError::GroupsRootUnreadable { .. } => ErrorKind::Pass,
            MaintenanceError::ContainerStop { .. } | MaintenanceError::Attachment { .. } => {
                ErrorKind::Item
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn runtime_unavailable_is_fatal_with_remediation_message() {
        let err = MaintenanceError::RuntimeUnavailable(RuntimeError::ProbeTimeout(
            Duration::from_secs(10),
        ));
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Container runtime is required but failed to start"
        );
    }

    #[test]
    fn listing_and_root_failures_are_pass_level() {
        let listing = MaintenanceError::ContainerListing(RuntimeError::Other("boom".into()));
        let root = MaintenanceError::GroupsRootUnreadable {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(listing.kind(), ErrorKind::Pass);
        assert_eq!(root.kind(), ErrorKind::Pass);
    }

    #[test]
    fn single_item_failures_are_item_level() {
        let stop = MaintenanceError::ContainerStop {
            name: "nanoclaw-abc".into(),
            source: RuntimeError::Other("already stopped".into()),
        };
        let file = MaintenanceError::Attachment {
            path: PathBuf::from("g1/attachments/a.jpg"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(stop.kind(), ErrorKind::Item);
        assert_eq!(file.kind(), ErrorKind::Item);
        assert!(stop.to_string().contains("nanoclaw-abc"));
    }

    #[test]
    fn exit_error_describes_code_or_signal() {
        let exited = RuntimeError::Exit {
            command: "container system status".into(),
            code: Some(1),
            stderr: "not running".into(),
        };
        let killed = RuntimeError::Exit {
            command: "container system status".into(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(
            exited.to_string(),
            "`container system status` failed (exit code 1): not running"
        );
        assert!(killed.to_string().contains("terminated by signal"));
    }
}
