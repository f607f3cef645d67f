//! メッセージ送信口（MessageSink）の実装
//!
//! - `websocket`: WebSocket の送信側（SplitSink）を使った実装

pub mod websocket;

pub use websocket::WebSocketSink;
