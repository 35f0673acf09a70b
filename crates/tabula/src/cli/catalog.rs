//! Catalog listing commands.

use super::TableArgs;
use tabula::{
    Driver, TableRef, TabulaResult, list_columns, list_databases, list_schemas, list_tables,
};

/// Prints one database name per line.
#[tracing::instrument(skip_all)]
pub fn handle_databases<D: Driver>(driver: &mut D) -> TabulaResult<()> {
    for name in list_databases(driver)? {
        println!("{}", name);
    }
    Ok(())
}

/// Prints the selectable schemas of `database`.
#[tracing::instrument(skip(driver))]
pub fn handle_schemas<D: Driver>(driver: &mut D, database: &str) -> TabulaResult<()> {
    for name in list_schemas(driver, database)? {
        println!("{}", name);
    }
    Ok(())
}

/// Prints `name<TAB>kind` for each table and view.
#[tracing::instrument(skip(driver))]
pub fn handle_tables<D: Driver>(driver: &mut D, database: &str, schema: &str) -> TabulaResult<()> {
    for entry in list_tables(driver, database, schema)? {
        println!("{}\t{}", entry.name, entry.kind);
    }
    Ok(())
}

/// Prints `name<TAB>type<TAB>NULL|NOT NULL[<TAB>default]`; the first
/// column is marked as the key used for edits.
#[tracing::instrument(skip(driver))]
pub fn handle_columns<D: Driver>(driver: &mut D, table: &TableArgs) -> TabulaResult<()> {
    let table = TableRef::new(&table.database, &table.schema, &table.table);
    for (i, column) in list_columns(driver, &table)?.iter().enumerate() {
        let mut line = format!(
            "{}\t{}\t{}",
            column.name(),
            column.data_type(),
            if *column.nullable() { "NULL" } else { "NOT NULL" }
        );
        if let Some(default) = column.default_value() {
            line.push_str(&format!("\tDEFAULT {}", default));
        }
        if i == 0 {
            line.push_str("\t(key)");
        }
        println!("{}", line);
    }
    Ok(())
}
