//! Grid column sizing.

use ratatui::text::Span;

/// Extra cells added to each column's content width.
pub const CELL_PADDING: u16 = 2;

/// Widest a column may grow, padding included.
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Fits each column to its widest header or cell text, plus
/// [`CELL_PADDING`], capped at [`MAX_COLUMN_WIDTH`].
///
/// Rows shorter than the header simply contribute nothing to the missing
/// columns.
///
/// # Examples
///
/// ```
/// use tabula_tui::column_widths;
///
/// let headers = vec!["ID".to_string(), "Name".to_string()];
/// let rows = vec![vec!["1".to_string(), "Grace Hopper".to_string()]];
/// assert_eq!(column_widths(&headers, &rows), vec![4, 14]);
/// ```
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| text_width(cell))
                .fold(text_width(header), usize::max);
            let padded = widest.saturating_add(CELL_PADDING as usize);
            padded.min(MAX_COLUMN_WIDTH as usize) as u16
        })
        .collect()
}

fn text_width(text: &str) -> usize {
    Span::raw(text).width()
}
