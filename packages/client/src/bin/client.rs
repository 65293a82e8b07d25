//! Terminal chat client with private threads, reactions and read receipts.
//!
//! Joins the chat under a display name, loads recent history over HTTP, and
//! reconnects automatically when the connection drops (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! cargo run --bin hiroba-client -- -u bob --url ws://127.0.0.1:5000/ws
//! ```

use clap::Parser;

use hiroba_client::{
    ClientConfig, ReconnectPolicy,
    config::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_URL, parse_page_size},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal chat client for the Hiroba server", long_about = None)]
struct Args {
    /// Display name announced to others
    #[arg(short = 'u', long)]
    username: String,

    /// WebSocket server URL
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Base URL of the HTTP API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Messages fetched per history page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    page_size: usize,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            username: args.username,
            url: args.url,
            api_url: args.api_url,
            page_size: args.page_size,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.into(), ReconnectPolicy::default()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
