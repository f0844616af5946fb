//! Presentation state for the game screen.

mod screen_state;
mod view_model;

pub use screen_state::ScreenState;
pub use view_model::GameViewModel;
