//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::error::ClientError;

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Map a handshake failure to a client error
fn classify_connect_error(error: WsError) -> ClientError {
    match error {
        WsError::Http(response) => ClientError::Rejected(response.status().as_u16()),
        WsError::Url(e) => ClientError::InvalidUrl(e.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    }
}

/// Run one WebSocket client session.
///
/// Returns `Ok(())` when the user closes the input, and an error when the
/// connection could not be established or was lost.
pub async fn run_client_session(
    url: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(classify_connect_error)?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        username
    );

    let (mut write, mut read) = ws_stream.split();

    let username_for_read = username.to_string();
    let mut read_task = tokio::spawn(async move {
        let clock = SystemClock;

        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => MessageFormatter::format_text_frame(
                    text.as_str(),
                    &username_for_read,
                    clock.now(),
                ),
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&username_for_read);
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input_rx.recv() => match line {
                Some(line) => {
                    // Inbound frames are relayed verbatim, so send the raw line
                    if let Err(e) = write.send(Message::text(line)).await {
                        read_task.abort();
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                }
                None => {
                    read_task.abort();
                    if let Err(e) = write.close().await {
                        tracing::debug!("Failed to close connection cleanly: {}", e);
                    }
                    return Ok(());
                }
            }
        }
    }
}
