//! ConnectionRegistry trait 定義
//!
//! 接続中のクライアントの集合を管理するインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connection, ConnectionId};

/// 接続レジストリ
///
/// ## 不変条件
///
/// - 挿入順を保持し、同じ接続を重複して保持しない
/// - `remove` は冪等（存在しない接続の削除は何もしない）
/// - 全ての操作は互いに排他的に実行される
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を末尾に追加
    async fn add(&self, connection: Arc<Connection>);

    /// 接続を削除（削除した場合は `true`）
    async fn remove(&self, connection_id: &ConnectionId) -> bool;

    /// 現在のメンバーのコピーを挿入順で取得
    async fn snapshot(&self) -> Vec<Arc<Connection>>;

    /// 接続数を取得
    async fn count(&self) -> usize;
}
