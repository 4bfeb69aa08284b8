//! `TaskDeck` task store server -- in-memory CRUD over HTTP.
//!
//! An axum server exposing the task collection the `TaskDeck` client
//! synchronizes against. Storage is in-memory only; restarting the
//! server starts from an empty collection.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:9400
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address with bearer auth
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080 --auth-token s3cret
//!
//! # Or via environment variable
//! TASKDECK_SERVER_ADDR=127.0.0.1:8080 cargo run --bin taskdeck-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::http::{self, ServerState};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        addr = %config.bind_addr,
        auth = config.auth_token.is_some(),
        "starting taskdeck task store server"
    );

    let state = Arc::new(ServerState::with_auth(config.auth_token));

    match http::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task store server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task store server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task store server");
            std::process::exit(1);
        }
    }
}
