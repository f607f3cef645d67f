//! Inbound frames and the reasons a session ends.

use std::fmt;

/// One frame received from a client, reduced to what a session cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Text payload, relayed verbatim as chat content
    Text(String),
    /// Binary payload; only its size is kept
    Binary(usize),
    /// Ping/pong, answered by the transport itself
    Control,
    /// Close handshake from the client
    Close { code: Option<u16> },
}

/// Why a session left the `Active` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Client sent a close frame
    ClientClosed { code: Option<u16> },
    /// Inbound stream ended without a close frame
    StreamEnded,
    /// Transport error while receiving
    TransportError(String),
    /// Client sent a frame the relay cannot interpret as text
    UnsupportedFrame,
    /// A delivery to this connection failed and it was removed from the registry
    Evicted,
    /// The receive loop panicked
    Aborted(String),
}

impl CloseReason {
    /// Whether this is an ordinary disconnect rather than a failure.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::ClientClosed { .. } | Self::StreamEnded)
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientClosed { code: Some(code) } => {
                write!(f, "client closed with code {}", code)
            }
            Self::ClientClosed { code: None } => f.write_str("client closed"),
            Self::StreamEnded => f.write_str("stream ended"),
            Self::TransportError(e) => write!(f, "transport error: {}", e),
            Self::UnsupportedFrame => f.write_str("unsupported frame"),
            Self::Evicted => f.write_str("evicted after a failed delivery"),
            Self::Aborted(e) => write!(f, "receive loop aborted: {}", e),
        }
    }
}
