use {
    crate::{error::MarketError, state::DashboardState, ui::input::handle_key},
    crossterm::event::{Event, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::time::Duration,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI event loop until the user quits or the store fails
///
/// Every key press is handled synchronously; pages rebuild from the store
/// before the next frame is drawn.
pub fn run_ui(state: &mut DashboardState<'_>) -> Result<(), MarketError> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs off the dashboard
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    let result = event_loop(&mut terminal, state);

    // Restore the terminal even when the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut DashboardState<'_>,
) -> Result<(), MarketError> {
    while state.is_running() {
        terminal.draw(|f| crate::ui::layout::render_layout(f, state))?;

        if crossterm::event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key)?;
                }
            }
        }
    }

    log::info!("Dashboard closed");
    Ok(())
}
