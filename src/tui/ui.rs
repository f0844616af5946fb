//! Stateless UI rendering for the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::games::tictactoe::{BOARD_SIZE, Cell, GameState, Mark, Outcome};
use crate::presentation::ScreenState;

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown when the connection failed.
pub const CONNECTION_ERROR_MESSAGE: &str = "Couldn't connect to the server";

/// Where each cell landed on screen during the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardLayout {
    cells: [[Rect; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardLayout {
    /// Returns the screen area of a cell.
    pub fn area(&self, cell: Cell) -> Rect {
        self.cells[cell.row()][cell.column()]
    }

    /// Maps a terminal position (e.g. a mouse click) to the cell under it.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Cell> {
        let point = Position::new(column, row);
        Cell::all().find(|cell| self.area(*cell).contains(point))
    }
}

/// Returns the game message for the status area, if any.
///
/// Checked in order: winner, full board, missing players, turn.
pub fn game_message(game: &GameState) -> Option<String> {
    match game.outcome() {
        Some(outcome) => Some(outcome.to_string()),
        None if game.connected_players().len() < 2 => Some("Waiting for players...".to_string()),
        None => game.player_at_turn().map(|mark| format!("Player {}'s turn", mark)),
    }
}

/// Renders the whole screen and returns where the board cells were drawn.
pub fn draw(frame: &mut Frame, state: &ScreenState, cursor: Cell, tick: usize) -> BoardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Player cards
            Constraint::Min(CELL_HEIGHT * BOARD_SIZE as u16),
            Constraint::Length(4), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_header(frame, chunks[1], state.game());
    let layout = draw_board(frame, chunks[2], state, cursor);
    draw_status(frame, chunks[3], state, tick);

    let help = Paragraph::new("Arrows/hjkl: move | Enter/Space or 1-9: play | Click: play | Q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    layout
}

fn draw_header(frame: &mut Frame, area: Rect, game: &GameState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_player_card(frame, center_rect(cards[0], 16, 4), game, Mark::X);
    draw_player_card(frame, center_rect(cards[1], 16, 4), game, Mark::O);
}

fn draw_player_card(frame: &mut Frame, area: Rect, game: &GameState, mark: Mark) {
    let connected = game.is_connected(mark);
    let at_turn = game.player_at_turn() == Some(mark) && !game.is_decided();

    let border_style = if at_turn {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if connected { "Connected" } else { "Waiting..." };
    let label_style = if connected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = vec![
        Line::from(Span::styled(mark.to_string(), mark_style(mark))),
        Line::from(Span::styled(label, label_style)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if at_turn { BorderType::Thick } else { BorderType::Rounded })
        .border_style(border_style);
    let card = Paragraph::new(text).alignment(Alignment::Center).block(block);
    frame.render_widget(card, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &ScreenState, cursor: Cell) -> BoardLayout {
    let size = BOARD_SIZE as u16;
    let board_area = center_rect(area, CELL_WIDTH * size, CELL_HEIGHT * size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CELL_HEIGHT); BOARD_SIZE])
        .split(board_area);

    let mut layout = BoardLayout::default();
    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_WIDTH); BOARD_SIZE])
            .split(*row_area);
        for (column, cell_area) in cols.iter().enumerate() {
            if let Some(cell) = Cell::new(column, row) {
                draw_cell(frame, *cell_area, state, cell, cell == cursor);
                layout.cells[row][column] = *cell_area;
            }
        }
    }
    layout
}

fn draw_cell(frame: &mut Frame, area: Rect, state: &ScreenState, cell: Cell, selected: bool) {
    let enabled = state.is_cell_enabled(cell);
    let (text, style) = match state.game().field().get(cell) {
        Some(mark) => (mark.to_string(), mark_style(mark)),
        None if enabled => (
            (cell.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        None => (String::new(), Style::default()),
    };

    let border_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let style = if selected && enabled {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &ScreenState, tick: usize) {
    let mut lines = Vec::new();
    if *state.is_connecting() {
        lines.push(Line::from(Span::styled(
            format!("{} Connecting...", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(Color::Cyan),
        )));
    }
    if *state.show_connection_error() {
        lines.push(Line::from(Span::styled(
            CONNECTION_ERROR_MESSAGE,
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(message) = game_message(state.game()) {
        let style = match state.game().outcome() {
            Some(Outcome::Won(_)) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Some(Outcome::Draw) => Style::default().add_modifier(Modifier::BOLD),
            None => Style::default().fg(Color::Yellow),
        };
        lines.push(Line::from(Span::styled(message, style)));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).title("Status"));
    frame.render_widget(status, area);
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(horizontal[1])[1]
}
