//! Domain errors.

use std::time::Duration;

use thiserror::Error;

/// Failure to deliver one outbound payload to one connection.
///
/// Any variant is treated as the connection being dead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The sink already failed once and refuses further sends
    #[error("connection is closed")]
    Closed,

    /// The send did not complete within the configured limit
    #[error("send timed out after {0:?}")]
    TimedOut(Duration),

    /// The transport reported an error
    #[error("transport error: {0}")]
    Transport(String),
}

/// Error surfaced by the transport while waiting for the next inbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("receive failed: {0}")]
pub struct InboundError(pub String);
