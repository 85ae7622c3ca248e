//! Lobby server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rally-server
//! cargo run --bin rally-server -- --host 127.0.0.1 --port 3000
//! PORT=9000 cargo run --bin rally-server
//! ```

use std::sync::Arc;

use clap::Parser;
use rally_server::{domain::LobbyRules, ui::Server};
use rally_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "rally-server")]
#[command(about = "Real-time lobby coordinator over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8787")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let rules = LobbyRules::default();
    tracing::info!(
        "Lobby rules: {} players to start, {} ms countdown",
        rules.min_players,
        rules.countdown_ms
    );

    let server = Server::new(rules, Arc::new(SystemClock));
    if let Err(e) = server.run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
