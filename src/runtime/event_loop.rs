use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::ui;

/// State tracked by the preview loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Draw and handle input until the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the preview should close.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.bottom(),
        KeyCode::Char('K') => app.toggle_details_window(),
        _ => {}
    }
    false
}
