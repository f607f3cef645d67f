//! UseCase: 接続一覧の取得（デバッグ用 HTTP エンドポイント向け）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// 接続一覧取得のユースケース
pub struct ListConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ListConnectionsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続中の全接続を接続順で取得
    pub async fn execute(&self) -> Vec<Arc<Connection>> {
        self.registry.snapshot().await
    }
}
