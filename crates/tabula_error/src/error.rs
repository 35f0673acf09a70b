//! Top-level error type.

use crate::{ConfigError, DatabaseError, TuiError};

/// Any error Tabula can produce.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TabulaError {
    /// Database or driver failure
    #[display("{}", _0)]
    Database(DatabaseError),
    /// Configuration problem
    #[display("{}", _0)]
    Config(ConfigError),
    /// Terminal UI failure
    #[display("{}", _0)]
    Tui(TuiError),
}

impl TabulaError {
    /// The user-facing message, without source location.
    pub fn message(&self) -> String {
        match self {
            TabulaError::Database(e) => e.message(),
            TabulaError::Config(e) => e.message.clone(),
            TabulaError::Tui(e) => e.kind.to_string(),
        }
    }
}

/// Result type used across Tabula crates.
pub type TabulaResult<T> = Result<T, TabulaError>;
