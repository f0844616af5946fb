//! Core domain types for tic-tac-toe snapshots.
//!
//! The server owns the game. Everything here describes what the server
//! pushed, plus the few read-only questions the screen needs answered.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Cell;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// Player X.
    X,
    /// Player O.
    O,
}

/// 3x3 tic-tac-toe board, indexed `[row][column]`.
///
/// Serialized as nested arrays of `"X"`, `"O"` or `null`, matching the
/// server's `field` layout. Any other shape fails to deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from rows of marks.
    pub fn from_rows(rows: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { rows }
    }

    /// Gets the mark at the given cell.
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        self.rows[cell.row()][cell.column()]
    }

    /// Places a mark at the given cell.
    pub fn set(&mut self, cell: Cell, mark: Option<Mark>) {
        self.rows[cell.row()][cell.column()] = mark;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Returns true when every cell carries a mark.
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Option<Mark>; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }
}

/// Why a game is no longer accepting moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Outcome {
    /// A player completed a line.
    #[display("Player {} won!", _0)]
    Won(Mark),
    /// Every cell is taken and nobody won.
    #[display("It's a draw!")]
    Draw,
}

fn default_player_at_turn() -> Option<Mark> {
    Some(Mark::X)
}

/// Complete game snapshot as pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Mark whose turn it is, if any.
    #[serde(default = "default_player_at_turn")]
    player_at_turn: Option<Mark>,
    /// The board.
    #[serde(default)]
    field: Board,
    /// Winner, once the server has declared one.
    #[serde(default)]
    winning_player: Option<Mark>,
    /// Server-side "no more moves" flag.
    #[serde(default)]
    is_board_full: bool,
    /// Marks of the players currently connected.
    #[serde(default)]
    connected_players: Vec<Mark>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player_at_turn: default_player_at_turn(),
            field: Board::new(),
            winning_player: None,
            is_board_full: false,
            connected_players: Vec::new(),
        }
    }
}

impl GameState {
    /// Creates a snapshot from its parts.
    pub fn new(
        field: Board,
        connected_players: Vec<Mark>,
        player_at_turn: Option<Mark>,
        winning_player: Option<Mark>,
    ) -> Self {
        Self {
            player_at_turn,
            field,
            winning_player,
            is_board_full: false,
            connected_players,
        }
    }

    /// Returns the board.
    pub fn field(&self) -> &Board {
        &self.field
    }

    /// Returns the mark whose turn it is.
    pub fn player_at_turn(&self) -> Option<Mark> {
        self.player_at_turn
    }

    /// Returns the winner, if any.
    pub fn winning_player(&self) -> Option<Mark> {
        self.winning_player
    }

    /// Returns the connected players.
    pub fn connected_players(&self) -> &[Mark] {
        &self.connected_players
    }

    /// Checks whether the given mark has a connected player.
    pub fn is_connected(&self, mark: Mark) -> bool {
        self.connected_players.contains(&mark)
    }

    /// Returns true when the server flagged the board full or no cell is free.
    pub fn is_board_full(&self) -> bool {
        self.is_board_full || self.field.is_full()
    }

    /// Returns the terminal outcome. A winner takes precedence over a full board.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winning_player {
            Some(mark) => Some(Outcome::Won(mark)),
            None if self.is_board_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Returns true once the game has an outcome.
    pub fn is_decided(&self) -> bool {
        self.outcome().is_some()
    }

    /// Checks whether tapping the cell should produce a move request.
    ///
    /// Only a local gate: the server still decides whether the move stands.
    #[instrument(skip(self))]
    pub fn accepts_turn(&self, cell: Cell) -> bool {
        !self.is_decided() && self.field.is_empty(cell)
    }
}
