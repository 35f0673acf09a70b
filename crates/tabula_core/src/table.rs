//! Table identity.

use serde::{Deserialize, Serialize};

/// Quote an identifier with square brackets, doubling any closing bracket.
///
/// ```
/// use tabula_core::quote_ident;
///
/// assert_eq!(quote_ident("Order Details"), "[Order Details]");
/// assert_eq!(quote_ident("odd]name"), "[odd]]name]");
/// ```
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// A fully-qualified reference to a table or view.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct TableRef {
    /// Database (catalog) name
    database: String,
    /// Schema name
    schema: String,
    /// Table or view name
    table: String,
}

impl TableRef {
    /// Creates a new table reference.
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// `[schema].[table]`, the form used in FROM/INTO clauses.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.table))
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}

/// Kind of relation listed by `INFORMATION_SCHEMA.TABLES`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum TableKind {
    /// A base table
    #[strum(serialize = "BASE TABLE")]
    BaseTable,
    /// A view
    #[strum(serialize = "VIEW")]
    View,
}

/// A table or view as listed for selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableEntry {
    /// Table name
    pub name: String,
    /// Relation kind
    pub kind: TableKind,
}

impl TableEntry {
    /// Creates a new table entry.
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl std::fmt::Display for TableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
