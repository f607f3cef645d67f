//! Outbound message model.

use super::Username;

pub const WELCOME_MESSAGE: &str = "Welcome to the chat!";

/// A message sent from the server to clients.
///
/// Transient: built, serialized once per broadcast, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Server-originated notification (join, leave, welcome)
    System { message: String },
    /// User-originated content
    Chat { username: Username, message: String },
}

impl ChatEvent {
    pub fn system(message: impl Into<String>) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn chat(username: Username, message: impl Into<String>) -> Self {
        Self::Chat {
            username,
            message: message.into(),
        }
    }

    pub fn welcome() -> Self {
        Self::system(WELCOME_MESSAGE)
    }

    pub fn joined(username: &Username) -> Self {
        Self::system(format!("{} has joined the chat.", username))
    }

    pub fn left(username: &Username) -> Self {
        Self::system(format!("{} has left the chat.", username))
    }
}
