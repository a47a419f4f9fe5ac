//! Multilingual WebSocket chat relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lingo-server -- --seed-user alice=en --seed-user bob=Chinese
//! ```

use clap::Parser;
use lingo_server::ServerConfig;
use lingo_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = lingo_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
