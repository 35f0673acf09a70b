//! Terminal setup and the event loop.

use crate::{App, ui};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tabula_error::{TuiError, TuiErrorKind};
use tabula_interface::Driver;
use tracing::{info, instrument};

/// Takes over the terminal, runs `app` until it quits, then restores the
/// terminal even if the loop failed.
#[instrument(skip_all)]
pub fn run<D: Driver>(app: &mut App<D>) -> Result<(), TuiError> {
    let mut terminal = ratatui::try_init()?;
    info!("Terminal initialized");
    app.start();
    let result = event_loop(&mut terminal, app);
    ratatui::restore();
    info!("Terminal restored");
    result
}

fn event_loop<D: Driver>(terminal: &mut DefaultTerminal, app: &mut App<D>) -> Result<(), TuiError> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| TuiError::new(TuiErrorKind::Render(e.to_string())))?;

        let event = event::read().map_err(|e| TuiError::new(TuiErrorKind::Input(e.to_string())))?;
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}
