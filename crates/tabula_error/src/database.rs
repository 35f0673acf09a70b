//! Database error types.

/// Database error conditions.
///
/// `Query` is the driver/operation failure; its message is the driver's text,
/// unchanged. The remaining kinds are preconditions checked before any
/// statement reaches the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Connection failed
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// Query execution failed
    #[display("{}", _0)]
    Query(String),
    /// Transaction control (begin/commit/rollback) failed
    #[display("Transaction error: {}", _0)]
    Transaction(String),
    /// An operation needed a selected table
    #[display("Please select a table first.")]
    NoTableSelected,
    /// An operation needed a selected row
    #[display("Please select a record.")]
    NoRecordSelected,
    /// An update had nothing to write
    #[display("No changes to save.")]
    NoChanges,
    /// A column name is not part of the selected table
    #[display("Unknown column: {}", _0)]
    UnknownColumn(String),
    /// A quick filter was applied without a column or value
    #[display("Please select a column and enter a filter value.")]
    EmptyFilter,
    /// A filter operator could not be parsed
    #[display("Invalid filter operator: {}", _0)]
    InvalidOperator(String),
}

impl DatabaseErrorKind {
    /// Whether this kind is a user-input warning rather than a driver failure.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DatabaseErrorKind::NoTableSelected
                | DatabaseErrorKind::NoRecordSelected
                | DatabaseErrorKind::NoChanges
                | DatabaseErrorKind::EmptyFilter
        )
    }
}

/// Database error with source location tracking.
///
/// # Examples
///
/// ```
/// use tabula_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::NoChanges);
/// assert!(format!("{}", err).contains("No changes"));
/// assert_eq!(err.message(), "No changes to save.");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a driver/operation failure carrying the driver's message.
    #[track_caller]
    pub fn query(message: impl Into<String>) -> Self {
        Self::new(DatabaseErrorKind::Query(message.into()))
    }

    /// The user-facing message, without source location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
