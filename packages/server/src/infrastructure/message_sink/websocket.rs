//! WebSocket を使った MessageSink 実装
//!
//! ## 責務
//!
//! - WebSocket の送信側ハーフを保持し、テキストフレームを書き込む
//! - 1 回の送信に時間制限をかける（応答しないピアがブロードキャストを止めないように）
//! - 一度失敗した接続への以降の送信を即座に失敗させる
//!
//! WebSocket の受け付けと分割は UI 層（`ui::handler::websocket`）で行われます。

use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, sink::SinkExt, stream::SplitSink};
use tokio::sync::Mutex;

use crate::domain::{DeliveryError, MessageSink};

/// WebSocket を使った MessageSink 実装
///
/// `S` は通常 `SplitSink<WebSocket, Message>`。テストでは任意の `Sink<Message>` を使う。
pub struct WebSocketSink<S = SplitSink<WebSocket, Message>> {
    /// WebSocket の送信側（同時送信を直列化するため Mutex で保護）
    sender: Mutex<S>,
    /// 1 回の送信の制限時間（`None` なら無制限）
    send_timeout: Option<Duration>,
    /// 一度でも送信に失敗したか
    closed: AtomicBool,
}

impl<S> WebSocketSink<S> {
    /// 新しい WebSocketSink を作成
    pub fn new(sender: S, send_timeout: Option<Duration>) -> Self {
        Self {
            sender: Mutex::new(sender),
            send_timeout,
            closed: AtomicBool::new(false),
        }
    }

    /// 送信失敗により閉じられているか
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    #[cfg(test)]
    fn into_inner(self) -> S {
        self.sender.into_inner()
    }
}

#[async_trait]
impl<S> MessageSink for WebSocketSink<S>
where
    S: Sink<Message> + Send + Unpin,
    S::Error: Display,
{
    async fn send_text(&self, payload: &str) -> Result<(), DeliveryError> {
        if self.is_closed() {
            return Err(DeliveryError::Closed);
        }

        let send = async {
            let mut sender = self.sender.lock().await;
            sender
                .send(Message::Text(payload.into()))
                .await
                .map_err(|e| DeliveryError::Transport(e.to_string()))
        };

        let result = match self.send_timeout {
            Some(limit) => match tokio::time::timeout(limit, send).await {
                Ok(result) => result,
                Err(_) => Err(DeliveryError::TimedOut(limit)),
            },
            None => send.await,
        };

        if result.is_err() {
            self.closed.store(true, Ordering::Release);
        }
        result
    }
}
