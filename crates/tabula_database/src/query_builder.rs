//! Statement construction for one table.

use crate::{Statement, WhereClause};
use tabula_core::{ColumnMeta, PageWindow, RecordValues, SqlValue, TableRef, quote_ident};
use tabula_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};

/// Builds count, page and mutation statements for a selected table.
///
/// The first column is treated as the primary key. No key metadata is
/// consulted.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct QueryBuilder {
    /// The table statements target
    table: TableRef,
    /// Columns in physical order
    columns: Vec<ColumnMeta>,
}

impl QueryBuilder {
    /// Creates a builder.
    pub fn new(table: TableRef, columns: Vec<ColumnMeta>) -> Self {
        Self { table, columns }
    }

    /// The assumed primary-key column.
    pub fn primary_key(&self) -> DatabaseResult<&ColumnMeta> {
        self.columns
            .first()
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoTableSelected))
    }

    /// `SELECT COUNT(*) FROM [schema].[table] [WHERE ...]`
    pub fn count(&self, filter: &WhereClause) -> Statement {
        let mut params = Vec::new();
        let where_sql = filter.render_suffix(&mut params);
        Statement::new(
            format!(
                "SELECT COUNT(*) FROM {}{}",
                self.table.qualified_name(),
                where_sql
            ),
            params,
        )
    }

    /// One page of rows.
    ///
    /// `ORDER BY (SELECT NULL)` only satisfies the OFFSET syntax; it imposes
    /// no order, so page contents depend on the engine's scan order.
    pub fn page(&self, filter: &WhereClause, window: &PageWindow) -> Statement {
        let mut params = Vec::new();
        let where_sql = filter.render_suffix(&mut params);
        Statement::new(
            format!(
                "SELECT * FROM {}{} ORDER BY (SELECT NULL) OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
                self.table.qualified_name(),
                where_sql,
                window.offset(),
                window.page_size()
            ),
            params,
        )
    }

    /// `INSERT` over every column; empty text binds NULL.
    pub fn insert(&self, record: &RecordValues) -> DatabaseResult<Statement> {
        if record.is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::NoTableSelected));
        }
        let mut params = Vec::new();
        let mut names = Vec::new();
        let mut placeholders = Vec::new();
        for (column, text) in record.iter() {
            self.require_column(column)?;
            names.push(quote_ident(column));
            placeholders.push(Statement::bind(&mut params, SqlValue::from_input(text)));
        }
        Ok(Statement::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table.qualified_name(),
                names.join(", "),
                placeholders.join(", ")
            ),
            params,
        ))
    }

    /// `UPDATE` of the columns whose text changed, keyed on the original
    /// primary-key value.
    ///
    /// The primary-key column is never written. Fails with
    /// [`DatabaseErrorKind::NoChanges`] when nothing else changed.
    pub fn update(
        &self,
        original: &RecordValues,
        edited: &RecordValues,
    ) -> DatabaseResult<Statement> {
        let pk = self.primary_key()?;
        let pk_value = original
            .get(pk.name())
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoRecordSelected))?;

        let mut params = Vec::new();
        let mut set_clauses = Vec::new();
        for (column, text) in edited.iter() {
            if column == pk.name() {
                continue;
            }
            self.require_column(column)?;
            if original.get(column) == Some(text) {
                continue;
            }
            let placeholder = Statement::bind(&mut params, SqlValue::from_input(text));
            set_clauses.push(format!("{} = {}", quote_ident(column), placeholder));
        }

        if set_clauses.is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::NoChanges));
        }

        let key_placeholder = Statement::bind(&mut params, SqlValue::Text(pk_value.to_string()));
        Ok(Statement::new(
            format!(
                "UPDATE {} SET {} WHERE {} = {}",
                self.table.qualified_name(),
                set_clauses.join(", "),
                quote_ident(pk.name()),
                key_placeholder
            ),
            params,
        ))
    }

    /// `DELETE` of the row whose primary key matches `record`.
    pub fn delete(&self, record: &RecordValues) -> DatabaseResult<Statement> {
        let pk = self.primary_key()?;
        let pk_value = record
            .get(pk.name())
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoRecordSelected))?;
        Ok(Statement::new(
            format!(
                "DELETE FROM {} WHERE {} = @P1",
                self.table.qualified_name(),
                quote_ident(pk.name())
            ),
            vec![SqlValue::Text(pk_value.to_string())],
        ))
    }

    fn require_column(&self, column: &str) -> DatabaseResult<()> {
        if self.columns.iter().any(|c| c.name() == column) {
            Ok(())
        } else {
            Err(DatabaseError::new(DatabaseErrorKind::UnknownColumn(
                column.to_string(),
            )))
        }
    }
}
