//! Per-connection session lifecycle.
//!
//! ```text
//! Connecting ──register, announce join, welcome──▶ Active
//! Active ──close frame / stream end / error / eviction / panic──▶ Closing
//! Closing ──deregister, announce leave──▶ Closed
//! ```
//!
//! Every path out of `Active` converges on the same cleanup, which runs
//! exactly once per session.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use futures_util::{Stream, StreamExt};

use crate::domain::{CloseReason, Connection, InboundError, InboundFrame};

use super::{
    connect_participant::ConnectParticipantUseCase,
    disconnect_participant::DisconnectParticipantUseCase, send_message::SendMessageUseCase,
};

/// Lifecycle state of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    Closing,
    Closed,
}

/// What happened during a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of inbound text payloads broadcast as chat
    pub relayed: usize,
    pub close_reason: CloseReason,
}

/// Drives sessions from accept to cleanup.
pub struct ChatSession {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl ChatSession {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
        }
    }

    /// Run one session to completion.
    ///
    /// `inbound` yields the frames received from the client. The receive loop
    /// runs on its own task so that a panic while relaying is contained and
    /// still leads to cleanup.
    pub async fn run<S>(&self, connection: Arc<Connection>, inbound: S) -> SessionSummary
    where
        S: Stream<Item = Result<InboundFrame, InboundError>> + Send + Unpin + 'static,
    {
        let mut state = SessionState::Connecting;

        self.connect_participant_usecase.execute(connection.clone()).await;
        transition(&mut state, SessionState::Active, &connection);
        tracing::info!("'{}' joined the chat", connection.username());

        let relayed = Arc::new(AtomicUsize::new(0));
        let receive_loop = tokio::spawn(relay_inbound(
            self.send_message_usecase.clone(),
            connection.clone(),
            inbound,
            relayed.clone(),
        ));
        let close_reason = match receive_loop.await {
            Ok(reason) => reason,
            Err(e) => {
                tracing::error!(
                    "Unexpected error in session for '{}': {}",
                    connection.username(),
                    e
                );
                CloseReason::Aborted(e.to_string())
            }
        };
        transition(&mut state, SessionState::Closing, &connection);

        if close_reason.is_clean() {
            tracing::info!(
                "WebSocket disconnected for '{}': {}",
                connection.username(),
                close_reason
            );
        } else {
            tracing::warn!(
                "Session for '{}' ended abnormally: {}",
                connection.username(),
                close_reason
            );
        }

        self.disconnect_participant_usecase.execute(&connection).await;
        transition(&mut state, SessionState::Closed, &connection);
        tracing::info!("'{}' left the chat", connection.username());

        SessionSummary {
            relayed: relayed.load(Ordering::Relaxed),
            close_reason,
        }
    }
}

fn transition(state: &mut SessionState, next: SessionState, connection: &Connection) {
    tracing::debug!(
        connection_id = %connection.id(),
        "Session '{}': {:?} -> {:?}",
        connection.username(),
        state,
        next
    );
    *state = next;
}

async fn relay_inbound<S>(
    send_message_usecase: Arc<SendMessageUseCase>,
    connection: Arc<Connection>,
    mut inbound: S,
    relayed: Arc<AtomicUsize>,
) -> CloseReason
where
    S: Stream<Item = Result<InboundFrame, InboundError>> + Unpin,
{
    loop {
        let frame = tokio::select! {
            // an evicted connection must not relay anything further
            biased;
            _ = connection.evicted() => {
                tracing::debug!("'{}' was evicted, closing", connection.username());
                return CloseReason::Evicted;
            }
            frame = inbound.next() => frame,
        };

        match frame {
            Some(Ok(InboundFrame::Text(text))) => {
                tracing::debug!("Received text from '{}': {}", connection.username(), text);
                send_message_usecase.execute(&connection, text).await;
                relayed.fetch_add(1, Ordering::Relaxed);
            }
            Some(Ok(InboundFrame::Control)) => {
                // ping/pong is answered by the transport
            }
            Some(Ok(InboundFrame::Binary(len))) => {
                tracing::warn!(
                    "'{}' sent {} bytes of binary data, closing",
                    connection.username(),
                    len
                );
                return CloseReason::UnsupportedFrame;
            }
            Some(Ok(InboundFrame::Close { code })) => {
                tracing::debug!("'{}' requested close", connection.username());
                return CloseReason::ClientClosed { code };
            }
            Some(Err(InboundError(e))) => return CloseReason::TransportError(e),
            None => return CloseReason::StreamEnded,
        }
    }
}
