//! Keyboard and mouse mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::ui::BoardLayout;
use crate::games::tictactoe::{Cell, Direction};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the game.
    Quit,
    /// Move the cursor.
    MoveCursor(Direction),
    /// Tap the cell under the cursor.
    TapCursor,
    /// Tap a specific cell.
    Tap(Cell),
    /// Nothing to do.
    None,
}

/// Maps a key press to an action.
pub fn map_key(key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Action::TapCursor,
        KeyCode::Char(c) => Cell::from_digit(c).map_or(Action::None, Action::Tap),
        _ => Action::None,
    }
}

/// Maps a left click on a board cell to a tap.
pub fn map_mouse(mouse: MouseEvent, layout: &BoardLayout) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout
            .hit_test(mouse.column, mouse.row)
            .map_or(Action::None, Action::Tap),
        _ => Action::None,
    }
}
