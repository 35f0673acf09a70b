//! Values moving across the driver boundary.

use crate::PageWindow;
use serde::{Deserialize, Serialize};

/// A single cell or bound parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
pub enum SqlValue {
    /// SQL NULL
    #[from(ignore)]
    Null,
    /// `bit`
    Bool(bool),
    /// Any integer type
    Int(i64),
    /// Any floating or decimal type
    Float(f64),
    /// Character data, and anything rendered as text (dates, GUIDs, XML)
    Text(String),
    /// Binary data
    Bytes(Vec<u8>),
}

impl SqlValue {
    /// Whether this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Text as typed into a form: empty text becomes NULL.
    pub fn from_input(text: &str) -> Self {
        if text.is_empty() {
            SqlValue::Null
        } else {
            SqlValue::Text(text.to_string())
        }
    }

    /// Reads an integer, accepting integral text and floats without a fraction.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(v) => Some(*v),
            SqlValue::Bool(b) => Some(i64::from(*b)),
            SqlValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            SqlValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrows text content.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form for machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Bool(b) => serde_json::Value::Bool(*b),
            SqlValue::Int(i) => serde_json::Value::from(*i),
            SqlValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            SqlValue::Text(s) => serde_json::Value::String(s.clone()),
            SqlValue::Bytes(_) => serde_json::Value::String(self.to_string()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl std::fmt::Display for SqlValue {
    /// Grid text. NULL shows as an empty cell, binary as `0x` hex.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Bytes(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
        }
    }
}

/// One result row, in column order.
pub type Row = Vec<SqlValue>;

/// One page of rows together with the pagination state that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResultPage {
    /// Column names, in result order
    columns: Vec<String>,
    /// Rows on this page
    rows: Vec<Row>,
    /// Page position and totals
    window: PageWindow,
}

impl ResultPage {
    /// Creates a result page.
    pub fn new(columns: Vec<String>, rows: Vec<Row>, window: PageWindow) -> Self {
        Self {
            columns,
            rows,
            window,
        }
    }

    /// An empty first page.
    pub fn empty(page_size: u64) -> Self {
        Self::new(Vec::new(), Vec::new(), PageWindow::first(page_size))
    }

    /// Rows as display strings.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    /// The page as a JSON object: column names, rows keyed by column name,
    /// and the pagination window.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .columns
                    .iter()
                    .zip(row.iter())
                    .map(|(column, value)| (column.clone(), value.to_json()))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect::<Vec<_>>();
        serde_json::json!({
            "columns": self.columns,
            "rows": rows,
            "page": {
                "page": self.window.page(),
                "page_size": self.window.page_size(),
                "total_pages": self.window.total_pages(),
                "total_rows": self.window.total_rows(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(SqlValue::Null.to_string(), "");
        assert_eq!(SqlValue::Int(42).to_string(), "42");
        assert_eq!(SqlValue::Bool(true).to_string(), "True");
        assert_eq!(SqlValue::Bytes(vec![0xde, 0xad]).to_string(), "0xDEAD");
    }

    #[test]
    fn test_from_input_empty_is_null() {
        assert_eq!(SqlValue::from_input(""), SqlValue::Null);
        assert_eq!(SqlValue::from_input(" "), SqlValue::Text(" ".to_string()));
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(SqlValue::Int(7).as_i64(), Some(7));
        assert_eq!(SqlValue::Text(" 12 ".to_string()).as_i64(), Some(12));
        assert_eq!(SqlValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(SqlValue::Float(3.5).as_i64(), None);
        assert_eq!(SqlValue::Null.as_i64(), None);
    }

    #[test]
    fn test_result_page_json() {
        let page = ResultPage::new(
            vec!["Id".to_string(), "Name".to_string()],
            vec![vec![SqlValue::Int(1), SqlValue::Null]],
            PageWindow::new(1, 100, 1),
        );
        let json = page.to_json();
        assert_eq!(json["columns"], serde_json::json!(["Id", "Name"]));
        assert_eq!(json["rows"][0]["Id"], serde_json::json!(1));
        assert!(json["rows"][0]["Name"].is_null());
        assert_eq!(json["page"]["total_pages"], serde_json::json!(1));
        assert_eq!(page.display_rows(), vec![vec!["1".to_string(), String::new()]]);
    }
}
