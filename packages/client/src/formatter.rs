//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use hiroba_server::infrastructure::dto::websocket::ServerMessage;
use hiroba_shared::time::format_local_time_of_day;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a text frame from the server.
    ///
    /// Frames that are not a known [`ServerMessage`] are shown raw.
    pub fn format_text_frame(
        text: &str,
        current_username: &str,
        received_at: DateTime<Utc>,
    ) -> String {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(ServerMessage::System { message }) => {
                Self::format_system_message(&message, received_at)
            }
            Ok(ServerMessage::Chat { username, message }) => {
                Self::format_chat_message(&username, &message, current_username, received_at)
            }
            Err(_) => Self::format_raw_message(text),
        }
    }

    /// Format a server notification (join, leave, welcome)
    pub fn format_system_message(message: &str, received_at: DateTime<Utc>) -> String {
        format!(
            "\n[{}] * {}\n",
            format_local_time_of_day(received_at),
            message
        )
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - Username of the sender
    /// * `content` - The message content
    /// * `current_username` - This client's username (to mark as "me")
    /// * `received_at` - When the message arrived
    pub fn format_chat_message(
        from: &str,
        content: &str,
        current_username: &str,
        received_at: DateTime<Utc>,
    ) -> String {
        let me_suffix = if from == current_username { " (me)" } else { "" };
        format!(
            "\n[{}] {}{}: {}\n",
            format_local_time_of_day(received_at),
            from,
            me_suffix,
            content
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
