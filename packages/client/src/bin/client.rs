//! Terminal chat client with reconnection support.
//!
//! Connects to `<url>/ws/<username>`, sends every line typed at the prompt
//! and prints messages broadcast by the server.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! cargo run --bin hiroba-client -- -u bob --url ws://127.0.0.1:8080
//! ```

use clap::Parser;

use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the Hiroba chat relay", long_about = None)]
struct Args {
    /// Username shown to other participants (need not be unique)
    #[arg(short = 'u', long)]
    username: String,

    /// Server base URL
    #[arg(long, default_value = "ws://127.0.0.1:8080")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hiroba_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
