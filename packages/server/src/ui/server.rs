//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{ChatSession, ListConnectionsUseCase},
};

use super::{
    error::ServerError,
    handler::{health_check, list_connections, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(chat_session, list_connections_usecase, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    chat_session: Arc<ChatSession>,
    list_connections_usecase: Arc<ListConnectionsUseCase>,
    config: ServerConfig,
}

impl Server {
    pub fn new(
        chat_session: Arc<ChatSession>,
        list_connections_usecase: Arc<ListConnectionsUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            chat_session,
            list_connections_usecase,
            config,
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            chat_session: self.chat_session.clone(),
            list_connections_usecase: self.list_connections_usecase.clone(),
            send_timeout: self.config.send_timeout,
        });
        let static_dir = &self.config.static_dir;

        Router::new()
            // Browser client
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(static_dir))
            // WebSocket endpoint
            .route("/ws/{username}", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/connections", get(list_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), ServerError> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("Chat relay server listening on {}", local_addr);
        tracing::info!("Open http://{}/ in a browser", local_addr);
        tracing::info!("Connect to: ws://{}/ws/{{username}}", local_addr);

        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
