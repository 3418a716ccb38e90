//! AttachmentGarbageCollector - 期限切れ添付ファイルの削除
//!
//! # フロー
//! 1. groups root 直下のディレクトリを列挙（読めなければ 0 を返して終了）
//! 2. 各グループの `attachments/` を列挙（無ければ黙ってスキップ）
//! 3. パス開始時に 1 度だけ `cutoff = now - TTL` を計算し、
//!    通常ファイルかつ `modified < cutoff` のものを削除
//! 4. ファイル単位の失敗（消えていた / 権限）は無視して続行
//! 5. 合計が 0 でなければ info を 1 回だけ出す
//!
//! ブロッキングな fs 呼び出しを使う。async から呼ぶときは spawn_blocking 経由。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::best_effort::best_effort;
use crate::domain::{
    ATTACHMENTS_DIR, AttachmentFile, AttachmentPolicy, MaintenanceError, MaintenanceEvent,
};
use crate::ports::{Clock, EventSink};

pub struct AttachmentGarbageCollector {
    groups_root: PathBuf,
    policy: AttachmentPolicy,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl AttachmentGarbageCollector {
    pub fn new(
        groups_root: impl Into<PathBuf>,
        policy: AttachmentPolicy,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            groups_root: groups_root.into(),
            policy,
            clock,
            events,
        }
    }

    /// 1 パス分の削除を行い、削除したファイル数を返す
    ///
    /// 決して失敗を返さない（スケジューラのループを落とさないため）。
    pub fn collect(&self) -> usize {
        let cutoff = self.policy.cutoff(self.clock.now());

        let groups = match self.group_dirs() {
            Ok(groups) => groups,
            Err(err) => {
                self.report_unreadable_root(err);
                return 0;
            }
        };

        let removed: usize = groups
            .iter()
            .map(|group| collect_group(&group.join(ATTACHMENTS_DIR), cutoff))
            .sum();

        if removed > 0 {
            self.events
                .emit(MaintenanceEvent::AttachmentsCleaned { count: removed });
        }
        removed
    }

    fn group_dirs(&self) -> Result<Vec<PathBuf>, MaintenanceError> {
        let entries = fs::read_dir(&self.groups_root).map_err(|source| {
            MaintenanceError::GroupsRootUnreadable {
                path: self.groups_root.clone(),
                source,
            }
        })?;

        Ok(entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .map(|entry| entry.path())
            .collect())
    }

    fn report_unreadable_root(&self, err: MaintenanceError) {
        let missing = matches!(
            &err,
            MaintenanceError::GroupsRootUnreadable { source, .. }
                if source.kind() == io::ErrorKind::NotFound
        );
        self.events.emit(MaintenanceEvent::GroupsRootUnreadable {
            path: self.groups_root.clone(),
            err: err.to_string(),
            missing,
        });
    }
}

/// One group's attachments directory. A missing directory yields 0.
fn collect_group(attachments: &Path, cutoff: DateTime<Utc>) -> usize {
    let Ok(entries) = fs::read_dir(attachments) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries {
        let Some(entry) = best_effort(entry.map_err(|source| MaintenanceError::Attachment {
            path: attachments.to_path_buf(),
            source,
        })) else {
            continue;
        };
        if best_effort(remove_if_expired(entry.path(), cutoff)) == Some(true) {
            removed += 1;
        }
    }
    removed
}

/// Returns `Ok(true)` if the file was expired and has been deleted.
fn remove_if_expired(path: PathBuf, cutoff: DateTime<Utc>) -> Result<bool, MaintenanceError> {
    let io_err = |source| MaintenanceError::Attachment {
        path: path.clone(),
        source,
    };

    let metadata = fs::metadata(&path).map_err(io_err)?;
    if !metadata.is_file() {
        return Ok(false);
    }
    let file = AttachmentFile {
        modified_at: metadata.modified().map_err(io_err)?.into(),
        path: path.clone(),
    };
    if !file.is_expired(cutoff) {
        return Ok(false);
    }
    fs::remove_file(&file.path).map_err(io_err)?;
    Ok(true)
}
