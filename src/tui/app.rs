//! Application state and logic.

use crossterm::event::Event;
use ratatui::Frame;
use tracing::{debug, instrument};

use super::input::{self, Action};
use super::ui::{self, BoardLayout};
use crate::games::tictactoe::Cell;
use crate::presentation::GameViewModel;

/// Main application state.
#[derive(Debug)]
pub struct App {
    view_model: GameViewModel,
    cursor: Cell,
    tick: usize,
    layout: BoardLayout,
    should_quit: bool,
}

impl App {
    /// Creates a new application around an activated view model.
    pub fn new(view_model: GameViewModel) -> Self {
        Self {
            view_model,
            cursor: Cell::default(),
            tick: 0,
            layout: BoardLayout::default(),
            should_quit: false,
        }
    }

    /// Returns the view model.
    pub fn view_model(&self) -> &GameViewModel {
        &self.view_model
    }

    /// Returns the cursor cell.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draws the current state and remembers where the cells went.
    pub fn draw(&mut self, frame: &mut Frame) {
        let state = self.view_model.state();
        self.layout = ui::draw(frame, &state, self.cursor, self.tick);
    }

    /// Advances the spinner.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handles one terminal event.
    #[instrument(skip(self))]
    pub async fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) => input::map_key(key),
            Event::Mouse(mouse) => input::map_mouse(mouse, &self.layout),
            _ => Action::None,
        };
        self.apply(action).await;
    }

    /// Applies an action.
    pub async fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                debug!("User quit");
                self.should_quit = true;
            }
            Action::MoveCursor(direction) => self.cursor = self.cursor.step(direction),
            Action::TapCursor => self.tap(self.cursor).await,
            Action::Tap(cell) => {
                self.cursor = cell;
                self.tap(cell).await;
            }
            Action::None => {}
        }
    }

    async fn tap(&self, cell: Cell) {
        self.view_model.finish_turn(cell.column(), cell.row()).await;
    }

    /// Closes the game session.
    pub async fn shutdown(&mut self) {
        self.view_model.close().await;
    }
}
