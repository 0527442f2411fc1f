//! Terminal user interface built on ratatui
//!
//! Hosts one modal prompt at a time on the alternate screen.

pub mod app;
pub mod components;
pub mod events;
pub mod keys;
pub mod styles;

pub use app::{PromptApp, PromptExit, PromptRequest};
pub use events::{Event, EventHandler};
pub use keys::KeyMap;

use crate::config::Config;
use crate::tui::components::dialogs::KeyEventBus;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Instant;
use tracing::debug;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;
    Ok(())
}

/// Show one prompt and wait until it is answered and gone
pub async fn run_prompt(request: PromptRequest, config: &Config) -> Result<PromptExit> {
    let mut event_handler = EventHandler::new(config.tick_rate());
    let mut app = PromptApp::new(request, config, KeyEventBus::global(), event_handler.sender())?;

    let mut terminal = init_terminal(config.mouse_enabled)?;
    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;
    restore_terminal(&mut terminal, config.mouse_enabled)?;

    result?;
    Ok(app.exit())
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut PromptApp,
    event_handler: &mut EventHandler,
) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.open(Instant::now());
    event_handler.start();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event, Instant::now()).await? {
                    break;
                }
            }
            None => {
                debug!("Event channel closed");
                break;
            }
        }
    }
    Ok(())
}
