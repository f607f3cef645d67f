//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Server answered the handshake with something other than 101
    #[error("Server rejected the WebSocket handshake with HTTP {0}")]
    Rejected(u16),

    /// Server URL or username cannot form a WebSocket URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
