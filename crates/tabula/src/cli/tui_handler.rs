//! Terminal UI launcher.

use tabula::{Driver, Session, TabulaResult, tui::App};

/// Runs the terminal UI over `driver` until the user quits.
#[tracing::instrument(skip(driver))]
pub fn launch_tui<D: Driver>(driver: D, page_size: u64) -> TabulaResult<()> {
    let label = driver.describe();
    let mut app = App::new(Session::new(driver, page_size), label);
    tabula::tui::run(&mut app)?;
    tracing::info!("TUI exited");
    Ok(())
}
