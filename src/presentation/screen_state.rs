//! Observable state of the game screen.

use derive_getters::Getters;

use crate::games::tictactoe::{Cell, GameState};

/// Everything the renderer needs to draw the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct ScreenState {
    /// Latest snapshot from the server.
    game: GameState,
    /// True until the first snapshot or a terminal failure arrives.
    is_connecting: bool,
    /// True once the connection failed.
    show_connection_error: bool,
}

impl ScreenState {
    /// State shown while the first connection attempt is in flight.
    pub fn connecting() -> Self {
        Self {
            is_connecting: true,
            ..Self::default()
        }
    }

    /// Creates a state from its parts.
    pub fn new(game: GameState, is_connecting: bool, show_connection_error: bool) -> Self {
        Self {
            game,
            is_connecting,
            show_connection_error,
        }
    }

    /// Checks whether a tap on the cell is enabled.
    pub fn is_cell_enabled(&self, cell: Cell) -> bool {
        self.game.accepts_turn(cell)
    }

    pub(crate) fn apply_snapshot(&mut self, game: GameState) {
        self.game = game;
        self.is_connecting = false;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.is_connecting = false;
        self.show_connection_error = true;
    }

    pub(crate) fn apply_stream_end(&mut self) {
        self.is_connecting = false;
    }
}
