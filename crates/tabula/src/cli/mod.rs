//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the tabula binary.

mod catalog;
mod commands;
mod query;
mod tui_handler;

pub use catalog::{handle_columns, handle_databases, handle_schemas, handle_tables};
pub use commands::{Cli, Commands, TableArgs};
pub use query::handle_query;
pub use tui_handler::launch_tui;
