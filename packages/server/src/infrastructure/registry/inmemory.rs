//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! `Mutex<Vec<_>>` を挿入順付きの集合として使用します。
//!
//! ロックは各操作の間だけ保持され、送信（await）をまたいで保持されることはありません。
//! ブロードキャストは `snapshot()` のコピーを走査するため、走査中の削除の影響を受けません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry};

/// インメモリ接続レジストリ
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// 接続中のクライアント（挿入順）
    connections: Mutex<Vec<Arc<Connection>>>,
}

impl InMemoryConnectionRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, connection: Arc<Connection>) {
        let mut connections = self.connections.lock().await;
        if connections.iter().any(|c| c.id() == connection.id()) {
            tracing::debug!("Connection {} is already registered", connection.id());
            return;
        }
        connections.push(connection.clone());
        tracing::info!(
            connection_id = %connection.id(),
            peer = ?connection.peer_addr(),
            "New connection for '{}'. Total connections: {}",
            connection.username(),
            connections.len()
        );
    }

    async fn remove(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        match connections.iter().position(|c| &c.id() == connection_id) {
            Some(index) => {
                let removed = connections.remove(index);
                tracing::info!(
                    connection_id = %connection_id,
                    "Connection for '{}' closed. Total connections: {}",
                    removed.username(),
                    connections.len()
                );
                true
            }
            None => false,
        }
    }

    async fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.connections.lock().await.clone()
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }
}
