//! Container - ランタイムが報告するコンテナと命名規約
//!
//! # 不変条件
//! - reaper は命名規約の prefix に一致しない id を絶対に stop しない
//! - prefix は空文字列にできない（空だと全コンテナに一致してしまう）

/// nanoclaw が作るコンテナ名の prefix
pub const DEFAULT_CONTAINER_PREFIX: &str = "nanoclaw-";

/// ContainerRecord はランタイムの一覧に現れる 1 コンテナ
///
/// 一覧結果としてのみ存在し、このサブシステムでは永続化しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRecord {
    pub id: String,
}

impl ContainerRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingConventionError {
    #[error("container name prefix must not be empty")]
    EmptyPrefix,
}

/// NamingConvention はこのシステムが所有するコンテナを見分ける
///
/// # 使用例
/// ```ignore
/// let naming = NamingConvention::new("nanoclaw-")?;
/// assert!(naming.owns("nanoclaw-abc"));
/// assert!(!naming.owns("other-xyz"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    prefix: String,
}

impl NamingConvention {
    pub fn new(prefix: impl Into<String>) -> Result<Self, NamingConventionError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(NamingConventionError::EmptyPrefix);
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// id がこのシステムの命名規約に従っているか
    pub fn owns(&self, id: &str) -> bool {
        id.starts_with(&self.prefix)
    }

    /// 一覧から自分が作った可能性のあるコンテナ名だけを取り出す（順序は維持）
    pub fn owned_names(&self, listing: Vec<ContainerRecord>) -> Vec<String> {
        listing
            .into_iter()
            .map(|record| record.id)
            .filter(|id| self.owns(id))
            .collect()
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CONTAINER_PREFIX.to_string(),
        }
    }
}
