//! Non-interactive rendering of a result page.

use tabula_core::ResultPage;

/// How `tabula query` prints a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns followed by the pagination line
    #[default]
    Table,
    /// `{ "columns": [...], "rows": [...], "page": ... }`
    Json,
    /// RFC 4180 CSV with a header row
    Csv,
}

/// Renders `page` in `format`.
///
/// # Errors
///
/// Returns the serializer error if JSON output cannot be produced.
pub fn render_page(page: &ResultPage, format: OutputFormat) -> serde_json::Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(page),
        OutputFormat::Json => serde_json::to_string_pretty(&page.to_json())?,
        OutputFormat::Csv => render_csv(page),
    })
}

fn render_table(page: &ResultPage) -> String {
    let cells = page.display_rows();
    let widths: Vec<usize> = page
        .columns()
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(cells.len() + 3);
    out.push(line(page.columns()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(cells.iter().map(|row| line(row)));
    out.push(page.window().to_string());
    out.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(page: &ResultPage) -> String {
    let record = |values: &[String]| {
        values
            .iter()
            .map(|v| csv_field(v))
            .collect::<Vec<_>>()
            .join(",")
    };
    let mut out = vec![record(page.columns())];
    out.extend(page.display_rows().iter().map(|row| record(row)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::{PageWindow, SqlValue};

    fn page() -> ResultPage {
        ResultPage::new(
            vec!["Id".to_string(), "Note".to_string()],
            vec![
                vec![SqlValue::Int(1), SqlValue::Text("plain".to_string())],
                vec![SqlValue::Int(22), SqlValue::Text("has, \"quotes\"".to_string())],
                vec![SqlValue::Int(3), SqlValue::Null],
            ],
            PageWindow::new(1, 100, 3),
        )
    }

    #[test]
    fn test_table_output_aligns_columns() {
        let out = render_page(&page(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Id  Note");
        assert_eq!(lines[1], "--  -------------");
        assert_eq!(lines[2], "1   plain");
        assert_eq!(lines[4], "3");
        assert_eq!(lines[5], "Page 1 of 1 | 3 records");
    }

    #[test]
    fn test_csv_quotes_when_needed() {
        let out = render_page(&page(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Id,Note");
        assert_eq!(lines[1], "1,plain");
        assert_eq!(lines[2], "22,\"has, \"\"quotes\"\"\"");
        assert_eq!(lines[3], "3,");
    }

    #[test]
    fn test_json_carries_columns_rows_and_window() {
        let out = render_page(&page(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["columns"], serde_json::json!(["Id", "Note"]));
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["rows"][1]["Id"], serde_json::json!(22));
        assert!(value["rows"][2]["Note"].is_null());
        assert_eq!(value["page"]["page"], serde_json::json!(1));
        assert_eq!(value["page"]["total_pages"], serde_json::json!(1));
        assert_eq!(value["page"]["total_rows"], serde_json::json!(3));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
