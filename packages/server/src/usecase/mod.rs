//! UseCase layer: broadcast fan-out and the per-connection session lifecycle.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod dispatcher;
pub mod list_connections;
pub mod send_message;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_participant::{ConnectOutcome, ConnectParticipantUseCase};
pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use dispatcher::{BroadcastDispatcher, BroadcastReport};
pub use list_connections::ListConnectionsUseCase;
pub use send_message::SendMessageUseCase;
pub use session::{ChatSession, SessionState, SessionSummary};
