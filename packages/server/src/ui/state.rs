//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{ChatSession, ListConnectionsUseCase};

/// Shared application state
pub struct AppState {
    /// Session lifecycle driver for WebSocket connections
    pub chat_session: Arc<ChatSession>,
    /// Registry introspection for the debug endpoint
    pub list_connections_usecase: Arc<ListConnectionsUseCase>,
    /// Limit applied to every outbound send
    pub send_timeout: Option<Duration>,
}
