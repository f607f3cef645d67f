//! Hiroba chat relay server.
//!
//! Every text frame received on `/ws/{username}` is broadcast to all
//! connected clients as a JSON chat message.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    config::{self, ServerConfig},
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::Server,
    usecase::{
        BroadcastDispatcher, ChatSession, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, ListConnectionsUseCase, SendMessageUseCase,
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket chat relay server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = config::DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Directory containing index.html and the browser client assets
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Time limit for a single outbound send in milliseconds (0 disables)
    #[arg(long, default_value_t = config::DEFAULT_SEND_TIMEOUT_MS)]
    send_timeout_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir.unwrap_or_else(config::default_static_dir),
            send_timeout: config::send_timeout_from_millis(args.send_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Dispatcher
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (in-memory connection set)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create Dispatcher (fan-out over the registry)
    let dispatcher = Arc::new(BroadcastDispatcher::new(registry.clone()));

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        dispatcher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(dispatcher.clone()));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        dispatcher.clone(),
    ));
    let list_connections_usecase = Arc::new(ListConnectionsUseCase::new(registry.clone()));
    let chat_session = Arc::new(ChatSession::new(
        connect_participant_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
    ));

    // 4. Create and run the server
    let server = Server::new(chat_session, list_connections_usecase, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
