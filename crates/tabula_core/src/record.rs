//! Validated form values.

use crate::{ColumnMeta, Row, SqlValue};
use serde::{Deserialize, Serialize};
use tabula_error::{DatabaseError, DatabaseErrorKind};

/// Text entered for each column of a table, in column order.
///
/// Every column of the table has an entry, so builders can rely on the
/// first entry being the primary key. Names that are not columns of the
/// table are rejected.
///
/// # Examples
///
/// ```
/// use tabula_core::{ColumnMeta, RecordValues, SqlValue};
///
/// let columns = vec![
///     ColumnMeta::new("Id", "int", false, None),
///     ColumnMeta::new("Name", "nvarchar", true, None),
/// ];
/// let record = RecordValues::from_pairs(&columns, [("Name", "Ada")]).unwrap();
/// assert_eq!(record.get("Id"), Some(""));
/// assert_eq!(record.param("Id"), Some(SqlValue::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValues {
    entries: Vec<(String, String)>,
}

impl RecordValues {
    /// An all-empty record for the given columns.
    pub fn blank(columns: &[ColumnMeta]) -> Self {
        Self {
            entries: columns
                .iter()
                .map(|c| (c.name().clone(), String::new()))
                .collect(),
        }
    }

    /// Builds a record from `(column, text)` pairs. Missing columns are empty.
    pub fn from_pairs<I, K, V>(columns: &[ColumnMeta], pairs: I) -> Result<Self, DatabaseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::blank(columns);
        for (name, value) in pairs {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    /// Builds a record from a result row, rendering each value as grid text.
    pub fn from_row(columns: &[ColumnMeta], row: &Row) -> Self {
        Self {
            entries: columns
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let text = row.get(i).map(ToString::to_string).unwrap_or_default();
                    (c.name().clone(), text)
                })
                .collect(),
        }
    }

    /// Replaces the text for `column`.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> Result<(), DatabaseError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|(name, _)| name == column)
            .ok_or_else(|| {
                DatabaseError::new(DatabaseErrorKind::UnknownColumn(column.to_string()))
            })?;
        entry.1 = value.into();
        Ok(())
    }

    /// The text for `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// The bound value for `column`: NULL when the text is empty.
    pub fn param(&self, column: &str) -> Option<SqlValue> {
        self.get(column).map(SqlValue::from_input)
    }

    /// The primary key `(column, text)`, by convention the first column.
    pub fn primary_key(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates `(column, text)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("Id", "int", false, None),
            ColumnMeta::new("Name", "nvarchar", true, None),
            ColumnMeta::new("Email", "nvarchar", true, None),
        ]
    }

    #[test]
    fn test_unknown_column_rejected() {
        let err = RecordValues::from_pairs(&columns(), [("Nope", "x")]).unwrap_err();
        assert_eq!(err.kind, DatabaseErrorKind::UnknownColumn("Nope".to_string()));
    }

    #[test]
    fn test_order_follows_columns() {
        let record =
            RecordValues::from_pairs(&columns(), [("Email", "a@b.c"), ("Id", "4")]).unwrap();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Id", "Name", "Email"]);
        assert_eq!(record.primary_key(), Some(("Id", "4")));
    }

    #[test]
    fn test_from_row_renders_text() {
        let row = vec![
            SqlValue::Int(9),
            SqlValue::Null,
            SqlValue::Text("z@y.x".to_string()),
        ];
        let record = RecordValues::from_row(&columns(), &row);
        assert_eq!(record.get("Id"), Some("9"));
        assert_eq!(record.get("Name"), Some(""));
        assert_eq!(record.param("Name"), Some(SqlValue::Null));
        assert_eq!(record.param("Email"), Some(SqlValue::Text("z@y.x".to_string())));
    }
}
