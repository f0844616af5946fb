//! Terminal UI for the tic-tac-toe client.

mod app;
mod input;
mod ui;

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::messaging::{RealtimeMessagingClient, WebSocketMessagingClient};
use crate::presentation::GameViewModel;

pub use app::App;
pub use input::{Action, map_key, map_mouse};
pub use ui::{BoardLayout, CONNECTION_ERROR_MESSAGE, draw, game_message};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the client until the user quits.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    info!("Starting tic-tac-toe client");

    let mut terminal = enter_terminal(io::stdout())?;

    let client: Arc<dyn RealtimeMessagingClient> =
        Arc::new(WebSocketMessagingClient::new(config.server_url()).with_send_timeout(
            Duration::from_millis(*config.send_timeout_ms()),
        ));
    let mut app = App::new(GameViewModel::activate(client));

    let tick_rate = Duration::from_millis(*config.tick_rate_ms());
    let res = run_app(&mut terminal, &mut app, tick_rate).await;

    app.shutdown().await;
    restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Client stopped");
    res
}

async fn run_app(terminal: &mut Tui, app: &mut App, tick_rate: Duration) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(tick_rate)? {
            app.handle_event(event::read()?).await;
        }
        app.on_tick();
    }
    Ok(())
}

/// Switches to raw mode and the alternate screen, undoing both on failure.
fn enter_terminal<W: Write>(writer: W) -> Result<Terminal<CrosstermBackend<W>>> {
    enable_raw_mode()?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(writer)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };
    if let Err(e) = execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture) {
        if let Err(restore) = restore_terminal(&mut terminal) {
            error!(error = ?restore, "Failed to restore terminal");
        }
        return Err(e.into());
    }
    Ok(terminal)
}

fn restore_terminal<W: Write>(terminal: &mut Terminal<CrosstermBackend<W>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::terminal::is_raw_mode_enabled;

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_setup_leaves_raw_mode_off() {
        assert!(enter_terminal(ClosedWriter).is_err());
        assert!(!is_raw_mode_enabled().unwrap_or(false));
    }
}
