//! WebSocket wire format.
//!
//! Every outbound frame is a JSON object tagged by `type`:
//!
//! ```text
//! {"type": "system", "message": "<text>"}
//! {"type": "chat", "username": "<text>", "message": "<text>"}
//! ```
//!
//! Inbound frames are raw text and have no DTO.

use serde::{Deserialize, Serialize};

/// Message sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    System { message: String },
    Chat { username: String, message: String },
}
