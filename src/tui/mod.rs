pub mod render;
pub mod state;
pub mod usmap;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::{AppState, View};
use std::io::stdout;
use std::time::Duration;

/// Run the dashboard. Blocks until the user quits. The state snapshot is
/// computed before this is called; the loop only re-renders it.
pub fn run_tui(state: AppState) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state: AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| render::draw(f, &state))?;

        // Block on input; the timeout keeps resize handling responsive.
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('1') => state.set_view(View::Geography),
                KeyCode::Char('2') => state.set_view(View::Institutions),
                KeyCode::Char('3') => state.set_view(View::Correlations),
                KeyCode::Char('4') => state.set_view(View::About),
                KeyCode::Tab | KeyCode::Right => state.set_view(state.view.next()),
                KeyCode::BackTab | KeyCode::Left => state.set_view(state.view.prev()),
                KeyCode::Down | KeyCode::Char('j') => state.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => state.scroll_up(),
                _ => {}
            }
        }
    }
}
