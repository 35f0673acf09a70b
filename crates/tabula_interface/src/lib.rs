//! Trait definitions for Tabula.
//!
//! The [`Driver`] trait is the only seam between query construction and a
//! concrete database client.

mod driver;

pub use driver::{Driver, QueryOutput};
