//! best_effort - アイテム単位の失敗を握りつぶす
//!
//! reaper と collector の内側ループで一律に使う。
//! パス全体の失敗（一覧が取れない）はここでは扱わず、各パスの先頭で処理する。

use crate::domain::{ErrorKind, MaintenanceError};

/// 1 アイテム分の結果を受け取り、失敗なら None にしてパスを続行させる
///
/// # 使用例
/// ```ignore
/// for name in &orphans {
///     best_effort(client.stop(name).await.map_err(|source| MaintenanceError::ContainerStop {
///         name: name.clone(),
///         source,
///     }));
/// }
/// ```
pub fn best_effort<T>(result: Result<T, MaintenanceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug_assert_eq!(err.kind(), ErrorKind::Item, "pass-level error in item loop: {err}");
            tracing::trace!(error = %err, "skipping item");
            None
        }
    }
}
