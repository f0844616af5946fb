//! State holder between the messaging channel and the renderer.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::ScreenState;
use crate::games::tictactoe::{Cell, MakeTurn};
use crate::messaging::{RealtimeMessagingClient, StateStream};

/// Mirrors server snapshots into observable [`ScreenState`] and forwards taps.
///
/// The holder never owns the socket; it only sees the derived
/// connecting/error flags. Dropping an unclosed holder closes the channel in
/// the background.
pub struct GameViewModel {
    client: Arc<dyn RealtimeMessagingClient>,
    state: watch::Receiver<ScreenState>,
    subscription: Option<JoinHandle<()>>,
    closed: bool,
}

impl GameViewModel {
    /// Opens the state stream and starts mirroring it.
    ///
    /// Must be called inside a tokio runtime.
    #[instrument(skip(client))]
    pub fn activate(client: Arc<dyn RealtimeMessagingClient>) -> Self {
        info!("Activating game screen");
        let (state_tx, state) = watch::channel(ScreenState::connecting());
        let subscription = tokio::spawn(mirror_states(client.state_stream(), state_tx));
        Self {
            client,
            state,
            subscription: Some(subscription),
            closed: false,
        }
    }

    /// Returns a copy of the current screen state.
    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.clone()
    }

    /// Returns true once [`GameViewModel::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Claims the cell at column `x`, row `y`.
    ///
    /// Sends nothing when the cell is taken, the game is decided, the
    /// coordinates are off the board, or the holder is closed. Returns
    /// whether a move request was issued. Send failures are logged only.
    #[instrument(skip(self))]
    pub async fn finish_turn(&self, x: usize, y: usize) -> bool {
        if self.closed {
            debug!("Screen closed, ignoring tap");
            return false;
        }
        let Some(cell) = Cell::new(x, y) else {
            debug!("Tap outside the board");
            return false;
        };
        let enabled = self.state.borrow().is_cell_enabled(cell);
        if !enabled {
            debug!(%cell, "Cell not playable, ignoring tap");
            return false;
        }

        info!(%cell, "Sending move");
        if let Err(e) = self.client.send_action(MakeTurn::from(cell)).await {
            warn!(error = %e, "Failed to send move");
        }
        true
    }

    /// Cancels the subscription and closes the channel. Idempotent.
    ///
    /// The subscription task has stopped before the channel is closed, so a
    /// session opened by an in-flight poll is closed too.
    #[instrument(skip(self))]
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        info!("Closing game screen");
        shut_down(Arc::clone(&self.client), self.subscription.take()).await;
    }
}

/// Aborts and joins the subscription, then closes the channel.
async fn shut_down(client: Arc<dyn RealtimeMessagingClient>, subscription: Option<JoinHandle<()>>) {
    if let Some(subscription) = subscription {
        subscription.abort();
        match subscription.await {
            Err(e) if !e.is_cancelled() => warn!(error = %e, "Subscription task failed"),
            _ => debug!("Subscription stopped"),
        }
    }
    if let Err(e) = client.close().await {
        warn!(error = %e, "Failed to close game session");
    }
}

impl Drop for GameViewModel {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let subscription = self.subscription.take();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(shut_down(Arc::clone(&self.client), subscription));
            }
            Err(_) => {
                if let Some(subscription) = subscription {
                    subscription.abort();
                }
                warn!("Game screen dropped outside a runtime, session left open");
            }
        }
    }
}

impl std::fmt::Debug for GameViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameViewModel")
            .field("state", &*self.state.borrow())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Copies every snapshot into `state_tx` until the stream ends or fails.
#[instrument(skip_all)]
async fn mirror_states(mut stream: StateStream, state_tx: watch::Sender<ScreenState>) {
    while let Some(item) = stream.next().await {
        match item {
            Ok(game) => {
                debug!(player_at_turn = ?game.player_at_turn(), "Applying snapshot");
                state_tx.send_modify(|state| state.apply_snapshot(game));
            }
            Err(e) => {
                warn!(error = %e, connect = e.is_connect(), "Game state stream failed");
                state_tx.send_modify(ScreenState::apply_failure);
                return;
            }
        }
    }

    info!("Game state stream ended");
    state_tx.send_if_modified(|state| {
        let was_connecting = *state.is_connecting();
        state.apply_stream_end();
        was_connecting
    });
}
