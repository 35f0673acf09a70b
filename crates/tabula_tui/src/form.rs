//! Editable forms: record add/edit, quick filter and advanced filter.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabula_core::{ColumnMeta, FilterOperator, FilterPredicate, RecordValues};
use tabula_database::WhereClause;
use tabula_error::DatabaseResult;

/// Applies a text-editing key to `value`. Returns whether the key was used.
pub(crate) fn edit_text(value: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            value.push(c);
            true
        }
        KeyCode::Backspace => {
            value.pop();
            true
        }
        _ => false,
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        index.checked_sub(1).unwrap_or(len - 1)
    }
}

/// One labelled text field of a [`RecordForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Column name
    pub column: String,
    /// `name (type)`
    pub label: String,
    /// Current text
    pub value: String,
}

/// Add or edit form over every column of the selected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    columns: Vec<ColumnMeta>,
    fields: Vec<FormField>,
    focus: usize,
    original: Option<RecordValues>,
}

impl RecordForm {
    /// An empty form for a new row.
    pub fn add(columns: &[ColumnMeta]) -> Self {
        Self::build(columns, &RecordValues::blank(columns), None)
    }

    /// A form prefilled from `record`, remembered as the original.
    pub fn edit(columns: &[ColumnMeta], record: RecordValues) -> Self {
        Self::build(columns, &record, Some(record.clone()))
    }

    fn build(columns: &[ColumnMeta], record: &RecordValues, original: Option<RecordValues>) -> Self {
        let fields = columns
            .iter()
            .map(|c| FormField {
                column: c.name().clone(),
                label: c.label(),
                value: record.get(c.name()).unwrap_or_default().to_string(),
            })
            .collect();
        Self {
            columns: columns.to_vec(),
            fields,
            focus: 0,
            original,
        }
    }

    /// Fields in column order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The record the form was opened on, when editing.
    pub fn original(&self) -> Option<&RecordValues> {
        self.original.as_ref()
    }

    /// Moves focus to the next (or previous) field, wrapping.
    pub fn move_focus(&mut self, forward: bool) {
        self.focus = step(self.focus, self.fields.len(), forward);
    }

    /// Edits the focused field. Returns whether the key was used.
    pub fn edit_focused(&mut self, key: KeyEvent) -> bool {
        match self.fields.get_mut(self.focus) {
            Some(field) => edit_text(&mut field.value, key),
            None => false,
        }
    }

    /// Replaces the text of `column`.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.column == column) {
            field.value = value.into();
        }
    }

    /// The form contents as a record.
    pub fn values(&self) -> DatabaseResult<RecordValues> {
        RecordValues::from_pairs(
            &self.columns,
            self.fields.iter().map(|f| (f.column.as_str(), f.value.clone())),
        )
    }
}

/// Single-column `LIKE` filter being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFilter {
    columns: Vec<String>,
    column: usize,
    /// Text typed so far
    pub value: String,
}

impl QuickFilter {
    /// Starts on the first column with an empty value.
    pub fn new(columns: &[ColumnMeta]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.name().clone()).collect(),
            column: 0,
            value: String::new(),
        }
    }

    /// Selected column name, empty when the table has none.
    pub fn column(&self) -> &str {
        self.columns
            .get(self.column)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Cycles the column.
    pub fn cycle_column(&mut self, forward: bool) {
        self.column = step(self.column, self.columns.len(), forward);
    }
}

/// One column's row in the advanced filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    /// Column name
    pub column: String,
    /// Comparison operator, `=` by default
    pub operator: FilterOperator,
    /// Value text; blank rows are ignored
    pub value: String,
}

/// Per-column operator/value form; non-blank rows are joined with `AND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    rows: Vec<FilterRow>,
    focus: usize,
}

impl FilterForm {
    /// One row per column, prefilled from the predicates of `current`.
    pub fn new(columns: &[ColumnMeta], current: &WhereClause) -> Self {
        let rows = columns
            .iter()
            .map(|c| {
                let existing = current
                    .predicates()
                    .iter()
                    .find(|p| p.column() == c.name());
                FilterRow {
                    column: c.name().clone(),
                    operator: existing.map(|p| *p.operator()).unwrap_or_default(),
                    value: existing.map(|p| p.value().clone()).unwrap_or_default(),
                }
            })
            .collect();
        Self { rows, focus: 0 }
    }

    /// Rows in column order.
    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    /// Index of the focused row.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus, wrapping.
    pub fn move_focus(&mut self, forward: bool) {
        self.focus = step(self.focus, self.rows.len(), forward);
    }

    /// Cycles the focused row's operator.
    pub fn cycle_operator(&mut self, forward: bool) {
        if let Some(row) = self.rows.get_mut(self.focus) {
            row.operator = if forward {
                row.operator.next()
            } else {
                row.operator.previous()
            };
        }
    }

    /// Edits the focused row's value. Returns whether the key was used.
    pub fn edit_focused(&mut self, key: KeyEvent) -> bool {
        match self.rows.get_mut(self.focus) {
            Some(row) => edit_text(&mut row.value, key),
            None => false,
        }
    }

    /// Every row as a predicate, blank ones included.
    pub fn predicates(&self) -> Vec<FilterPredicate> {
        self.rows
            .iter()
            .map(|r| FilterPredicate::new(r.column.clone(), r.operator, r.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("Id", "int", false, None),
            ColumnMeta::new("Title", "nvarchar", true, None),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_record_form_labels_and_typing() {
        let mut form = RecordForm::add(&columns());
        assert_eq!(form.fields()[1].label, "Title (nvarchar)");

        form.move_focus(true);
        for c in "Dune".chars() {
            assert!(form.edit_focused(key(KeyCode::Char(c))));
        }
        form.edit_focused(key(KeyCode::Backspace));

        let values = form.values().unwrap();
        assert_eq!(values.get("Title"), Some("Dun"));
        assert_eq!(values.get("Id"), Some(""));
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut form = RecordForm::add(&columns());
        let used = form.edit_focused(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!used);
        assert_eq!(form.fields()[0].value, "");
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = RecordForm::add(&columns());
        form.move_focus(false);
        assert_eq!(form.focus(), 1);
        form.move_focus(true);
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_filter_form_prefills_and_cycles() {
        let current =
            WhereClause::from_predicates([FilterPredicate::contains("Title", "war")], &columns())
                .unwrap();
        let mut form = FilterForm::new(&columns(), &current);

        assert_eq!(form.rows()[0].operator, FilterOperator::Eq);
        assert_eq!(form.rows()[1].operator, FilterOperator::Like);
        assert_eq!(form.rows()[1].value, "war");

        form.cycle_operator(true);
        assert_eq!(form.rows()[0].operator, FilterOperator::Eq.next());
        assert_eq!(form.predicates().len(), 2);
    }

    #[test]
    fn test_quick_filter_cycles_columns() {
        let mut quick = QuickFilter::new(&columns());
        assert_eq!(quick.column(), "Id");
        quick.cycle_column(true);
        assert_eq!(quick.column(), "Title");
        quick.cycle_column(true);
        assert_eq!(quick.column(), "Id");
    }
}
