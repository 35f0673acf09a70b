//! End-to-end page fetch and rendering through the facade.

use tabula::{
    ColumnMeta, FilterPredicate, OutputFormat, PageFetcher, QueryBuilder, ScriptedDriver,
    SqlValue, TableRef, WhereClause, render_page,
};

#[test]
fn test_filtered_page_renders_as_csv() {
    let mut driver = ScriptedDriver::new().with_count(1).on_query(
        "OFFSET",
        &["Sku", "Name"],
        vec![vec![
            SqlValue::Text("A-1".to_string()),
            SqlValue::Text("Widget, large".to_string()),
        ]],
    );
    let columns = vec![
        ColumnMeta::new("Sku", "varchar", false, None),
        ColumnMeta::new("Name", "nvarchar", true, None),
    ];
    let filter: FilterPredicate = "Name:LIKE:Widget".parse().unwrap();
    let filter = WhereClause::from_predicates([filter], &columns).unwrap();
    let builder = QueryBuilder::new(TableRef::new("Shop", "dbo", "Products"), columns);

    let page = PageFetcher::new(50)
        .fetch(&mut driver, &builder, &filter, 1)
        .unwrap();

    assert_eq!(
        render_page(&page, OutputFormat::Csv).unwrap(),
        "Sku,Name\nA-1,\"Widget, large\""
    );
    assert!(driver.statements().iter().all(|sql| !sql.contains("Widget")));
}
