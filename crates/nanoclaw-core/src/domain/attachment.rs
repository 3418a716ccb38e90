//! Attachment - グループごとの添付ファイルと保持期間
//!
//! レイアウト: `<groupsRoot>/<groupName>/attachments/<filename>`

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// 各グループ配下の添付ディレクトリ名
pub const ATTACHMENTS_DIR: &str = "attachments";

/// An attachment file as seen during one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    pub path: PathBuf,
    pub modified_at: DateTime<Utc>,
}

impl AttachmentFile {
    /// Strictly earlier than the cutoff; a file modified exactly at the cutoff is kept.
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        self.modified_at < cutoff
    }
}

/// AttachmentPolicy は添付ファイルの保持期間（TTL）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    ttl: Duration,
}

impl AttachmentPolicy {
    /// 7 days.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// `now - ttl`。1 回のパスにつき 1 度だけ計算する。
    ///
    /// TTL が表現できないほど大きい場合は最小時刻を返す（何も期限切れにならない）。
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_ttl_is_seven_days() {
        let policy = AttachmentPolicy::default();
        assert_eq!(policy.cutoff(now()), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[rstest]
    #[case::eight_days_old(TimeDelta::days(8), true)]
    #[case::one_second_past(TimeDelta::days(7) + TimeDelta::seconds(1), true)]
    #[case::exactly_at_cutoff(TimeDelta::days(7), false)]
    #[case::fresh(TimeDelta::zero(), false)]
    fn expiry_is_strict(#[case] age: TimeDelta, #[case] expired: bool) {
        let cutoff = AttachmentPolicy::default().cutoff(now());
        let file = AttachmentFile {
            path: PathBuf::from("g1/attachments/a.jpg"),
            modified_at: now() - age,
        };
        assert_eq!(file.is_expired(cutoff), expired);
    }

    #[test]
    fn oversized_ttl_expires_nothing() {
        let policy = AttachmentPolicy::new(Duration::MAX);
        let cutoff = policy.cutoff(now());
        let file = AttachmentFile {
            path: PathBuf::from("ancient"),
            modified_at: DateTime::<Utc>::MIN_UTC,
        };
        assert!(!file.is_expired(cutoff));
    }
}
