//! Terminal UI for Tabula.
//!
//! [`App`] holds the browsing [`Session`](tabula_database::Session) plus the
//! on-screen state (mode, selected row, open form) and turns key presses into
//! session operations. [`ui::draw`] renders it and [`run`] drives the
//! terminal.

mod app;
mod form;
mod layout;
mod picker;
mod terminal;
pub mod ui;

pub use app::{App, AppMode, Status, StatusLevel};
pub use form::{FilterForm, FilterRow, FormField, QuickFilter, RecordForm};
pub use layout::{CELL_PADDING, MAX_COLUMN_WIDTH, column_widths};
pub use picker::Picker;
pub use terminal::run;
