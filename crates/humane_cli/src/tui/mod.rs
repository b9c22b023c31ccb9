//! Interactive terminal explorer (categories -> habits -> entries).
//!
//! # Invariants
//! - The terminal is restored even when drawing or input fails.

mod app;
mod ui;

use app::ExplorerApp;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use humane_core::HabitData;
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

/// Runs the explorer until the user quits.
pub fn run_explorer(data: &HabitData) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let mut terminal = match execute!(stdout, EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)))
    {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(err);
        }
    };

    info!(
        "event=explore module=cli status=start habits={} entries={}",
        data.habits().len(),
        data.entries().len()
    );
    let mut app = ExplorerApp::new(data);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("event=explore module=cli status={}", if result.is_ok() { "ok" } else { "error" });
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut ExplorerApp<'_>,
) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}
