//! Page fetch and clamping tests.

use tabula_core::{ColumnMeta, SqlValue, TableRef};
use tabula_database::{DriverCall, PageFetcher, QueryBuilder, ScriptedDriver, WhereClause};
use tabula_error::DatabaseErrorKind;

fn builder() -> QueryBuilder {
    QueryBuilder::new(
        TableRef::new("Inventory", "stock", "Parts"),
        vec![
            ColumnMeta::new("PartNo", "varchar", false, None),
            ColumnMeta::new("Qty", "int", true, None),
        ],
    )
}

fn page_sql(driver: &ScriptedDriver) -> String {
    driver.statements().last().unwrap().to_string()
}

#[test]
fn test_fetch_issues_use_count_then_page() {
    let mut driver = ScriptedDriver::new().with_count(250);
    let page = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 2)
        .unwrap();

    assert_eq!(page.window().page(), 2);
    assert_eq!(driver.calls()[0], DriverCall::Use("Inventory".to_string()));
    assert_eq!(
        driver.statements(),
        vec![
            "SELECT COUNT(*) FROM [stock].[Parts]",
            "SELECT * FROM [stock].[Parts] ORDER BY (SELECT NULL) OFFSET 100 ROWS FETCH NEXT 100 ROWS ONLY",
        ]
    );
}

#[test]
fn test_page_past_end_falls_back_to_first() {
    let mut driver = ScriptedDriver::new().with_count(250);
    let page = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 4)
        .unwrap();

    assert_eq!(page.window().page(), 1);
    assert!(page_sql(&driver).ends_with("OFFSET 0 ROWS FETCH NEXT 100 ROWS ONLY"));
}

#[test]
fn test_page_zero_is_first() {
    let mut driver = ScriptedDriver::new().with_count(30);
    let page = PageFetcher::new(10)
        .fetch(&mut driver, &builder(), &WhereClause::none(), 0)
        .unwrap();

    assert_eq!(page.window().page(), 1);
    assert_eq!(page.window().total_pages(), 3);
}

#[test]
fn test_last_partial_page_offset() {
    let mut driver = ScriptedDriver::new().with_count(250);
    PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 3)
        .unwrap();

    assert!(page_sql(&driver).ends_with("OFFSET 200 ROWS FETCH NEXT 100 ROWS ONLY"));
}

#[test]
fn test_empty_result_uses_table_columns() {
    let mut driver = ScriptedDriver::new().with_count(0);
    let page = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 1)
        .unwrap();

    assert_eq!(page.columns(), &vec!["PartNo".to_string(), "Qty".to_string()]);
    assert!(page.rows().is_empty());
    assert_eq!(page.window().total_pages(), 1);
}

#[test]
fn test_count_accepts_textual_number() {
    let mut driver = ScriptedDriver::new().on_query(
        "COUNT(*)",
        &[""],
        vec![vec![SqlValue::Text("42".to_string())]],
    );
    let page = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 1)
        .unwrap();
    assert_eq!(page.window().total_rows(), 42);
}

#[test]
fn test_missing_count_is_query_error() {
    let mut driver = ScriptedDriver::new();
    let err = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 1)
        .unwrap_err();
    assert!(matches!(err.kind, DatabaseErrorKind::Query(_)));
}

#[test]
fn test_use_database_failure_stops_fetch() {
    let mut driver = ScriptedDriver::new()
        .with_count(5)
        .fail_use_database("Database 'Inventory' does not exist.");
    let err = PageFetcher::default()
        .fetch(&mut driver, &builder(), &WhereClause::none(), 1)
        .unwrap_err();

    assert_eq!(err.message(), "Database 'Inventory' does not exist.");
    assert_eq!(driver.calls().len(), 1);
}
