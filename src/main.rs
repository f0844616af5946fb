//! Tic-tac-toe client - terminal front end
//!
//! Connects to a realtime game server and lets the local player take turns.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tictactoe_client::{ClientConfig, SERVER_URL_ENV, tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config =
        ClientConfig::resolve(&cli.config, std::env::var(SERVER_URL_ENV).ok(), cli.server_url)?;
    let config = match cli.log_file {
        Some(log_file) => config.with_log_file(log_file),
        None => config,
    };

    initialize_tracing(config.log_file())?;
    info!(server_url = %config.server_url(), "Configuration resolved");

    tui::run_tui(config).await
}

/// Sends logs to a file so they don't interfere with the TUI.
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let log_file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_client=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
