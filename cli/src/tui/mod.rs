pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use savings_core::{KeyValueStore, SavingsService};
use tracing::{error, info};

use crate::tui::app::App;

pub fn run<S: KeyValueStore>(service: SavingsService<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service);
    info!("tui started");
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    finish(&mut app, res)
}

/// Writes goal edits still pending when the loop ended, then hands back the
/// loop's result. A loop error wins over a commit error.
fn finish<S: KeyValueStore>(app: &mut App<S>, res: Result<()>) -> Result<()> {
    if let Err(err) = &res {
        error!("tui stopped: {:#}", err);
    }
    let committed = app.service.commit_goal();
    res.and(committed)
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }
    Ok(())
}
