//! Board coordinates.

use super::types::BOARD_SIZE;
use tracing::instrument;

/// A cell on the board, addressed by zero-based column and row.
///
/// Only constructible for coordinates inside the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    column: usize,
    row: usize,
}

impl Cell {
    /// The center cell.
    pub const CENTER: Cell = Cell { column: 1, row: 1 };

    /// Creates a cell, or `None` when the coordinates are off the board.
    pub fn new(column: usize, row: usize) -> Option<Self> {
        (column < BOARD_SIZE && row < BOARD_SIZE).then_some(Self { column, row })
    }

    /// Zero-based column (`x` on the wire).
    pub fn column(self) -> usize {
        self.column
    }

    /// Zero-based row (`y` on the wire).
    pub fn row(self) -> usize {
        self.row
    }

    /// Converts to a row-major index (0-8).
    pub fn to_index(self) -> usize {
        self.row * BOARD_SIZE + self.column
    }

    /// Creates a cell from a row-major index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < BOARD_SIZE * BOARD_SIZE).then(|| Self {
            column: index % BOARD_SIZE,
            row: index / BOARD_SIZE,
        })
    }

    /// Parses a keypad digit: `1` is top-left, `9` is bottom-right.
    #[instrument]
    pub fn from_digit(c: char) -> Option<Self> {
        let digit = c.to_digit(10)? as usize;
        digit.checked_sub(1).and_then(Self::from_index)
    }

    /// Steps one cell in the given direction, staying put at the edge.
    pub fn step(self, direction: Direction) -> Self {
        let (column, row) = match direction {
            Direction::Up => (self.column, self.row.saturating_sub(1)),
            Direction::Down => (self.column, (self.row + 1).min(BOARD_SIZE - 1)),
            Direction::Left => (self.column.saturating_sub(1), self.row),
            Direction::Right => ((self.column + 1).min(BOARD_SIZE - 1), self.row),
        };
        Self { column, row }
    }

    /// All 9 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE * BOARD_SIZE).map(|index| Self {
            column: index % BOARD_SIZE,
            row: index / BOARD_SIZE,
        })
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 9] = [
            "Top-left",
            "Top-center",
            "Top-right",
            "Middle-left",
            "Center",
            "Middle-right",
            "Bottom-left",
            "Bottom-center",
            "Bottom-right",
        ];
        LABELS[self.to_index()]
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::CENTER
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.column, self.row)
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}
