//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::stream::StreamExt;

use crate::{
    domain::{Connection, InboundError, InboundFrame, Username},
    infrastructure::message_sink::WebSocketSink,
    ui::state::AppState,
};

/// Upgrade `/ws/{username}` to a WebSocket chat session.
///
/// The username is taken verbatim from the path: no validation and no
/// uniqueness check.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    ConnectInfo(peer_addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    tracing::debug!("WebSocket upgrade for '{}' from {}", username, peer_addr);
    ws.on_upgrade(move |socket| handle_socket(socket, state, Username::from(username), peer_addr))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    username: Username,
    peer_addr: SocketAddr,
) {
    let (sender, receiver) = socket.split();

    let sink = WebSocketSink::new(sender, state.send_timeout);
    let connection = Arc::new(Connection::new(username, Some(peer_addr), Arc::new(sink)));

    let inbound = receiver.map(|result| {
        result
            .map(to_inbound_frame)
            .map_err(|e| InboundError(e.to_string()))
    });

    let summary = state.chat_session.run(connection.clone(), inbound).await;
    tracing::debug!(
        connection_id = %connection.id(),
        "Session for '{}' from {} finished after relaying {} message(s)",
        connection.username(),
        peer_addr,
        summary.relayed
    );
}

fn to_inbound_frame(message: Message) -> InboundFrame {
    match message {
        Message::Text(text) => InboundFrame::Text(text.as_str().to_string()),
        Message::Binary(data) => InboundFrame::Binary(data.len()),
        Message::Ping(_) | Message::Pong(_) => InboundFrame::Control,
        Message::Close(frame) => InboundFrame::Close {
            code: frame.map(|f| f.code),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ws::CloseFrame;

    #[test]
    fn test_text_frame_is_kept_verbatim() {
        // テスト項目: テキストフレームは内容を変えずに変換される
        // given (前提条件):
        let message = Message::Text("  hello\n".into());

        // when (操作):
        let frame = to_inbound_frame(message);

        // then (期待する結果):
        assert_eq!(frame, InboundFrame::Text("  hello\n".to_string()));
    }

    #[test]
    fn test_close_frame_keeps_code() {
        // テスト項目: close フレームのステータスコードが保持される
        // given (前提条件):
        let message = Message::Close(Some(CloseFrame {
            code: 1001,
            reason: "going away".into(),
        }));

        // when (操作):
        let frame = to_inbound_frame(message);

        // then (期待する結果):
        assert_eq!(frame, InboundFrame::Close { code: Some(1001) });
    }

    #[test]
    fn test_control_and_binary_frames() {
        // テスト項目: ping/pong は制御フレーム、バイナリはサイズのみ保持される
        // given (前提条件):
        let ping = Message::Ping(vec![1, 2].into());
        let binary = Message::Binary(vec![0u8; 8].into());

        // when (操作):
        let ping_frame = to_inbound_frame(ping);
        let binary_frame = to_inbound_frame(binary);

        // then (期待する結果):
        assert_eq!(ping_frame, InboundFrame::Control);
        assert_eq!(binary_frame, InboundFrame::Binary(8));
    }
}
