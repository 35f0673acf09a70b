//! `query` command handler.

use super::TableArgs;
use tabula::{
    Driver, FilterPredicate, OutputFormat, PageFetcher, QueryBuilder, TableRef, WhereClause,
    list_columns, render_page,
};

/// Prints one page of `table`, filtered by `filters`.
///
/// Filters naming columns the table does not have are rejected before any
/// rows are fetched.
#[tracing::instrument(skip(driver, filters), fields(filters = filters.len()))]
pub fn handle_query<D: Driver>(
    driver: &mut D,
    table: &TableArgs,
    page: u64,
    filters: Vec<FilterPredicate>,
    format: OutputFormat,
    page_size: u64,
) -> anyhow::Result<()> {
    let table = TableRef::new(&table.database, &table.schema, &table.table);
    let columns = list_columns(driver, &table)?;
    let filter = WhereClause::from_predicates(filters, &columns)?;
    if !filter.is_empty() {
        tracing::info!(filter = %filter.describe(), "Filtering");
    }

    let builder = QueryBuilder::new(table, columns);
    let result = PageFetcher::new(page_size).fetch(driver, &builder, &filter, page)?;
    println!("{}", render_page(&result, format)?);
    Ok(())
}
