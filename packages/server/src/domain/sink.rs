//! MessageSink trait 定義
//!
//! 1 つの接続へペイロードを書き込むためのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::DeliveryError;

/// 接続への送信口
///
/// ## 契約
///
/// - `send_text` は 1 つのテキストペイロードを送信し、完了まで待つ
/// - 失敗した場合、その接続は死んでいるとみなされる（リトライしない）
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// テキストペイロードを送信
    async fn send_text(&self, payload: &str) -> Result<(), DeliveryError>;
}
