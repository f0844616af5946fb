//! Tic-tac-toe client library - realtime play against a remote game server
//!
//! The server owns the game: it validates moves, detects wins and decides
//! whose turn it is. This crate renders what the server pushes and relays
//! the local player's taps back to it.
//!
//! # Architecture
//!
//! - **Games**: snapshot and move-request types
//! - **Protocol**: text-frame codec (`make_turn#{...}` out, JSON snapshots in)
//! - **Messaging**: realtime channel trait and its WebSocket implementation
//! - **Presentation**: observable screen state and the tap gate
//! - **TUI**: ratatui renderer and terminal event loop
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_client::{GameViewModel, RealtimeMessagingClient, WebSocketMessagingClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client: Arc<dyn RealtimeMessagingClient> =
//!     Arc::new(WebSocketMessagingClient::new("ws://127.0.0.1:8080/play"));
//! let mut screen = GameViewModel::activate(client);
//!
//! // Claim the center cell once the server says it's free.
//! screen.finish_turn(1, 1).await;
//! screen.close().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod messaging;
mod presentation;
mod protocol;

/// Terminal front end.
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Game types
pub use games::tictactoe::{BOARD_SIZE, Board, Cell, Direction, GameState, MakeTurn, Mark, Outcome};

// Crate-level exports - Wire protocol
pub use protocol::{MAKE_TURN_TAG, ProtocolError, TAG_DELIMITER, decode_state, decode_turn, encode_turn};

// Crate-level exports - Realtime messaging
pub use messaging::{
    DEFAULT_SEND_TIMEOUT, MessagingError, MessagingErrorKind, RealtimeMessagingClient,
    StateStream, WebSocketMessagingClient,
};

// Crate-level exports - Presentation
pub use presentation::{GameViewModel, ScreenState};
