//! A SQL statement with its bound parameters.

use tabula_core::SqlValue;

/// SQL text with `@P1..@Pn` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct Statement {
    /// SQL text
    sql: String,
    /// Parameters, in placeholder order
    params: Vec<SqlValue>,
}

impl Statement {
    /// Creates a statement.
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Placeholder for the next parameter pushed onto `params`.
    pub fn placeholder(params: &[SqlValue]) -> String {
        format!("@P{}", params.len() + 1)
    }

    /// Pushes `value` and returns its placeholder.
    pub fn bind(params: &mut Vec<SqlValue>, value: SqlValue) -> String {
        let placeholder = Self::placeholder(params);
        params.push(value);
        placeholder
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}
