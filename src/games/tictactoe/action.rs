//! Client-originated move requests.

use super::Cell;
use serde::{Deserialize, Serialize};

/// A claim on one cell, sent to the server as-is.
///
/// `x` is the column, `y` the row, both zero-based. The server decides
/// whether the claim stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MakeTurn {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl MakeTurn {
    /// Returns the cell this request targets, if it lies on the board.
    pub fn cell(&self) -> Option<Cell> {
        Cell::new(self.x, self.y)
    }
}

impl From<Cell> for MakeTurn {
    fn from(cell: Cell) -> Self {
        Self::new(cell.column(), cell.row())
    }
}

impl std::fmt::Display for MakeTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "make_turn({}, {})", self.x, self.y)
    }
}
