//! Core data types for Tabula.
//!
//! These types describe what the user is looking at (a table and its
//! columns), what they asked for (filters and a page), and what came back
//! (values and rows). They carry no driver state.

mod column;
mod filter;
mod page;
mod record;
mod table;
mod value;

pub use column::{ColumnMeta, ColumnMetaBuilder};
pub use filter::{FilterOperator, FilterPredicate};
pub use page::{DEFAULT_PAGE_SIZE, PageWindow};
pub use record::RecordValues;
pub use table::{TableEntry, TableKind, TableRef, quote_ident};
pub use value::{ResultPage, Row, SqlValue};
