//! Tabula: browse, filter and edit SQL Server tables.
//!
//! This crate re-exports the workspace crates behind one name and adds the
//! pieces the `tabula` binary shares with library users: the TOML
//! configuration file and the page renderers used for non-interactive
//! output.
//!
//! ```no_run
//! use tabula::{Session, TabulaConfig, establish_connection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TabulaConfig::from_file("tabula.toml")?;
//! let driver = establish_connection(&config.connection)?;
//! let mut session = Session::new(driver, config.browse.page_size);
//! session.load_databases()?;
//! println!("{}", session.window());
//! # Ok(())
//! # }
//! ```

mod config;
mod output;

pub use config::{BrowseSettings, TabulaConfig};
pub use output::{OutputFormat, render_page};

pub use tabula_core::{
    ColumnMeta, ColumnMetaBuilder, DEFAULT_PAGE_SIZE, FilterOperator, FilterPredicate, PageWindow,
    RecordValues, ResultPage, Row, SqlValue, TableEntry, TableKind, TableRef, quote_ident,
};
pub use tabula_database::{
    ConnectionSettings, ConnectionSettingsBuilder, DriverCall, MssqlDriver, PageFetcher,
    QueryBuilder, ScriptedDriver, Session, Statement, WhereClause, establish_connection,
    list_columns, list_databases, list_schemas, list_tables,
};
pub use tabula_error::{
    ConfigError, DatabaseError, DatabaseErrorKind, DatabaseResult, TabulaError, TabulaResult,
    TuiError, TuiErrorKind,
};
pub use tabula_interface::{Driver, QueryOutput};

/// Terminal UI.
pub mod tui {
    pub use tabula_tui::*;
}
