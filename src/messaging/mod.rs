//! Realtime messaging channel to the game server.

mod client;
mod error;
mod websocket;

pub use client::{RealtimeMessagingClient, StateStream};
pub use error::{MessagingError, MessagingErrorKind};
pub use websocket::{DEFAULT_SEND_TIMEOUT, WebSocketMessagingClient};
