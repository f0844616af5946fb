mod action;
mod position;
mod types;

pub use action::MakeTurn;
pub use position::{Cell, Direction};
pub use types::{BOARD_SIZE, Board, GameState, Mark, Outcome};
