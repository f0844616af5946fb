//! Realtime messaging seam between the screen and the game server.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::MessagingError;
use crate::games::tictactoe::{GameState, MakeTurn};

/// Stream of server snapshots.
///
/// Yields `Err` at most once, as its last item, when the transport fails.
pub type StateStream = BoxStream<'static, Result<GameState, MessagingError>>;

/// Bidirectional channel to the game server.
#[async_trait]
pub trait RealtimeMessagingClient: Send + Sync {
    /// Returns the snapshot stream.
    ///
    /// Lazy: nothing connects until the stream is polled. Each call opens a
    /// new session that replaces any previous one. Frames that fail to
    /// decode are skipped.
    fn state_stream(&self) -> StateStream;

    /// Sends one move request. No acknowledgement is awaited.
    async fn send_action(&self, turn: MakeTurn) -> Result<(), MessagingError>;

    /// Closes the session. Calling it again is a no-op.
    async fn close(&self) -> Result<(), MessagingError>;
}
