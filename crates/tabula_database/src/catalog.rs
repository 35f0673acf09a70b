//! Database, schema, table and column listings.

use tabula_core::{ColumnMeta, SqlValue, TableEntry, TableKind, TableRef};
use tabula_error::{DatabaseError, DatabaseResult};
use tabula_interface::Driver;
use tracing::{debug, instrument, warn};

/// Schemas hidden from selection, besides the `db_*` role schemas.
pub const EXCLUDED_SCHEMAS: [&str; 3] = ["guest", "INFORMATION_SCHEMA", "sys"];

/// User databases on the server; system databases are hidden.
#[instrument(skip(driver))]
pub fn list_databases<D: Driver + ?Sized>(driver: &mut D) -> DatabaseResult<Vec<String>> {
    let output = driver.query(
        "SELECT name FROM sys.databases WHERE database_id > 4 ORDER BY name",
        &[],
    )?;
    let databases = output.first_column_text();
    debug!(count = databases.len(), "Listed databases");
    Ok(databases)
}

/// Drops role schemas (`db_*`) and [`EXCLUDED_SCHEMAS`], keeping order.
pub fn filter_schemas(schemas: Vec<String>) -> Vec<String> {
    schemas
        .into_iter()
        .filter(|s| !s.starts_with("db_") && !EXCLUDED_SCHEMAS.contains(&s.as_str()))
        .collect()
}

/// The schema to select first: `dbo` when present, else the first one.
pub fn default_schema(schemas: &[String]) -> Option<&str> {
    schemas
        .iter()
        .find(|s| s.as_str() == "dbo")
        .or_else(|| schemas.first())
        .map(String::as_str)
}

/// Selectable schemas in `database`.
#[instrument(skip(driver))]
pub fn list_schemas<D: Driver + ?Sized>(
    driver: &mut D,
    database: &str,
) -> DatabaseResult<Vec<String>> {
    driver.use_database(database)?;
    let output = driver.query(
        "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA ORDER BY SCHEMA_NAME",
        &[],
    )?;
    let schemas = filter_schemas(output.first_column_text());
    debug!(count = schemas.len(), "Listed schemas");
    Ok(schemas)
}

/// Tables and views in `schema`, ordered by kind then name.
#[instrument(skip(driver))]
pub fn list_tables<D: Driver + ?Sized>(
    driver: &mut D,
    database: &str,
    schema: &str,
) -> DatabaseResult<Vec<TableEntry>> {
    driver.use_database(database)?;
    let output = driver.query(
        "SELECT TABLE_NAME, TABLE_TYPE FROM INFORMATION_SCHEMA.TABLES \
         WHERE TABLE_TYPE IN ('BASE TABLE', 'VIEW') AND TABLE_SCHEMA = @P1 \
         ORDER BY TABLE_TYPE, TABLE_NAME",
        &[SqlValue::from(schema)],
    )?;

    let mut tables = Vec::with_capacity(output.rows().len());
    for row in output.rows() {
        let (Some(name), Some(kind)) = (row.first(), row.get(1)) else {
            return Err(DatabaseError::query("Table listing returned a short row"));
        };
        match kind.to_string().parse::<TableKind>() {
            Ok(kind) => tables.push(TableEntry::new(name.to_string(), kind)),
            Err(_) => warn!(table = %name, kind = %kind, "Skipping unknown table type"),
        }
    }
    debug!(count = tables.len(), "Listed tables");
    Ok(tables)
}

/// Columns of `table` in ordinal order.
#[instrument(skip(driver), fields(table = %table))]
pub fn list_columns<D: Driver + ?Sized>(
    driver: &mut D,
    table: &TableRef,
) -> DatabaseResult<Vec<ColumnMeta>> {
    driver.use_database(table.database())?;
    let output = driver.query(
        "SELECT COLUMN_NAME, DATA_TYPE, IS_NULLABLE, COLUMN_DEFAULT \
         FROM INFORMATION_SCHEMA.COLUMNS \
         WHERE TABLE_NAME = @P1 AND TABLE_SCHEMA = @P2 \
         ORDER BY ORDINAL_POSITION",
        &[
            SqlValue::from(table.table().as_str()),
            SqlValue::from(table.schema().as_str()),
        ],
    )?;

    let mut columns = Vec::with_capacity(output.rows().len());
    for row in output.rows() {
        let cell = |i: usize| row.get(i).cloned().unwrap_or(SqlValue::Null);
        let name = cell(0);
        if name.is_null() {
            return Err(DatabaseError::query("Column listing returned a row without a name"));
        }
        let default = cell(3);
        columns.push(ColumnMeta::new(
            name.to_string(),
            cell(1).to_string(),
            cell(2).to_string() == "YES",
            (!default.is_null()).then(|| default.to_string()),
        ));
    }
    debug!(count = columns.len(), "Listed columns");
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_schemas() {
        let schemas = names(&[
            "INFORMATION_SCHEMA",
            "db_owner",
            "db_datareader",
            "dbo",
            "guest",
            "sales",
            "sys",
        ]);
        assert_eq!(filter_schemas(schemas), names(&["dbo", "sales"]));
    }

    #[test]
    fn test_adjacent_excluded_schemas_all_removed() {
        let schemas = names(&["guest", "INFORMATION_SCHEMA", "sys", "hr"]);
        assert_eq!(filter_schemas(schemas), names(&["hr"]));
    }

    #[test]
    fn test_default_schema_prefers_dbo() {
        assert_eq!(default_schema(&names(&["audit", "dbo", "sales"])), Some("dbo"));
        assert_eq!(default_schema(&names(&["audit", "sales"])), Some("audit"));
        assert_eq!(default_schema(&[]), None);
    }
}
