//! Hiroba chat server.
//!
//! Tracks who is present and routes chat events (text, file, typing, reaction,
//! read receipt) to every connection or to a private pair.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 5000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    domain::DEFAULT_HISTORY_CAPACITY,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::{AppState, Server},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(
    about = "WebSocket chat server with presence, reactions and read receipts",
    long_about = None
)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of public messages kept in history
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Origin allowed by CORS (repeatable)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let allowed_origins = if args.allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect()
        } else {
            args.allowed_origins
        };

        Self {
            host: args.host,
            port: args.port,
            history_capacity: args.history_capacity,
            allowed_origins,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repository (in-memory store)
    let repository = Arc::new(InMemoryChatRepository::with_history_capacity(
        config.history_capacity,
    ));
    tracing::info!("Message history capacity: {}", config.history_capacity);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let state = Arc::new(AppState::new(
        repository,
        message_pusher,
        Arc::new(SystemClock),
    ));

    // 4. Create and run the server
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
