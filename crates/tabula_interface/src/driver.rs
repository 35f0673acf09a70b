//! Synchronous database driver trait.

use serde::{Deserialize, Serialize};
use tabula_core::{Row, SqlValue};
use tabula_error::DatabaseResult;

/// Rows returned by a query, with the column names of the first result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct QueryOutput {
    /// Column names
    columns: Vec<String>,
    /// Result rows
    rows: Vec<Row>,
}

impl QueryOutput {
    /// Creates query output.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Consumes the output, returning `(columns, rows)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    /// The first column of the first row, if present.
    pub fn scalar(&self) -> Option<&SqlValue> {
        self.rows.first().and_then(|row| row.first())
    }

    /// The first column of every row, rendered as text.
    pub fn first_column_text(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.first())
            .map(ToString::to_string)
            .collect()
    }
}

/// A synchronous call/response connection to a SQL engine.
///
/// Statements use `@P1..@Pn` placeholders, matched positionally to `params`.
/// Calls block until the engine answers. Implementations hold one
/// connection; there is no pooling and no concurrency.
pub trait Driver {
    /// Runs a statement that returns rows.
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<QueryOutput>;

    /// Runs a statement that modifies data, returning the affected row count.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<u64>;

    /// Switches the connection's current database.
    fn use_database(&mut self, database: &str) -> DatabaseResult<()>;

    /// Starts a transaction.
    fn begin(&mut self) -> DatabaseResult<()>;

    /// Commits the open transaction.
    fn commit(&mut self) -> DatabaseResult<()>;

    /// Rolls back the open transaction.
    fn rollback(&mut self) -> DatabaseResult<()>;

    /// A short description of the server this driver is connected to.
    fn describe(&self) -> String {
        "connected".to_string()
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<QueryOutput> {
        (**self).query(sql, params)
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<u64> {
        (**self).execute(sql, params)
    }

    fn use_database(&mut self, database: &str) -> DatabaseResult<()> {
        (**self).use_database(database)
    }

    fn begin(&mut self) -> DatabaseResult<()> {
        (**self).begin()
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        (**self).rollback()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
