//! Conversion logic between DTOs and domain types.

use crate::domain::{ChatEvent, Connection};
use crate::infrastructure::dto::{http as http_dto, websocket as ws_dto};

// ========================================
// Domain → DTO
// ========================================

impl From<ChatEvent> for ws_dto::ServerMessage {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::System { message } => Self::System { message },
            ChatEvent::Chat { username, message } => Self::Chat {
                username: username.into_string(),
                message,
            },
        }
    }
}

impl From<&ChatEvent> for ws_dto::ServerMessage {
    fn from(event: &ChatEvent) -> Self {
        event.clone().into()
    }
}

impl From<&Connection> for http_dto::ConnectionSummaryDto {
    fn from(connection: &Connection) -> Self {
        Self {
            id: connection.id().to_string(),
            username: connection.username().as_str().to_string(),
            peer_addr: connection.peer_addr().map(|addr| addr.to_string()),
        }
    }
}

/// Serialize a domain event into its JSON wire form.
pub fn encode_event(event: &ChatEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ws_dto::ServerMessage::from(event))
}
