//! UseCase: メッセージ送信処理
//!
//! クライアントから受信したテキストを、送信者のユーザー名付きの chat メッセージとして
//! 全接続にブロードキャストします。送信者本人にも届きます（エコー）。
//! 内容のフィルタリング・長さ制限・レート制限は行いません。

use std::sync::Arc;

use crate::domain::Connection;

use super::dispatcher::{BroadcastDispatcher, BroadcastReport};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    dispatcher: Arc<BroadcastDispatcher>,
}

impl SendMessageUseCase {
    pub fn new(dispatcher: Arc<BroadcastDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続
    /// * `text` - 受信したテキスト（そのまま配信する）
    pub async fn execute(&self, sender: &Connection, text: String) -> BroadcastReport {
        tracing::info!(
            "Broadcasting message from '{}' ({} bytes)",
            sender.username(),
            text.len()
        );
        self.dispatcher
            .broadcast_chat(sender.username(), text)
            .await
    }
}
