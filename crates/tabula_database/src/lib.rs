//! SQL Server integration for Tabula.
//!
//! Builds the statements a table browser needs (filtered counts, paged
//! selects, single-row mutations), runs them through a [`Driver`], and keeps
//! the browsing state in an explicit [`Session`].
//!
//! [`Driver`]: tabula_interface::Driver

mod catalog;
mod connection;
mod fetcher;
mod mssql;
mod query_builder;
mod scripted;
mod session;
mod statement;
mod where_clause;

pub use catalog::{
    EXCLUDED_SCHEMAS, default_schema, filter_schemas, list_columns, list_databases, list_schemas,
    list_tables,
};
pub use connection::{ConnectionSettings, ConnectionSettingsBuilder, establish_connection};
pub use fetcher::PageFetcher;
pub use mssql::MssqlDriver;
pub use query_builder::QueryBuilder;
pub use scripted::{DriverCall, ScriptedDriver};
pub use session::Session;
pub use statement::Statement;
pub use where_clause::WhereClause;
