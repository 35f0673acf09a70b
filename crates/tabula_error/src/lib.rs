//! Error types for Tabula.
//!
//! Every concern has a `*ErrorKind` enum describing what went wrong and a
//! wrapping `*Error` struct that records where the error was created.
//! [`TabulaError`] unifies them for callers that cross crate boundaries.

mod config;
mod database;
mod error;
mod tui;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use error::{TabulaError, TabulaResult};
pub use tui::{TuiError, TuiErrorKind};
