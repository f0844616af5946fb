//! Command-line interface for tictactoe_client.

use clap::Parser;

/// Tic-tac-toe terminal client for a realtime game server
#[derive(Parser, Debug)]
#[command(name = "tictactoe_client")]
#[command(about = "Play tic-tac-toe against another player over a game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game server URL (ws:// or wss://). Overrides the config file and environment.
    #[arg(long)]
    pub server_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, default_value = "tictactoe_client.toml")]
    pub config: std::path::PathBuf,

    /// Log file path. Logs never go to the terminal while the UI runs.
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}
