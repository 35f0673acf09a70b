//! Filter-to-SQL translation.

use crate::Statement;
use tabula_core::{ColumnMeta, FilterOperator, FilterPredicate, SqlValue, quote_ident};
use tabula_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};

/// A conjunction of filter predicates, rendered with bound parameters.
///
/// Blank predicates never make it in. Values are always bound, never
/// spliced into the SQL text; `LIKE` values are bound as `%value%`.
///
/// # Examples
///
/// ```
/// use tabula_core::{FilterOperator, FilterPredicate, SqlValue};
/// use tabula_database::WhereClause;
///
/// let clause = WhereClause::from_predicates(
///     [
///         FilterPredicate::contains("City", "San"),
///         FilterPredicate::new("Zip", FilterOperator::Eq, "  "),
///     ],
///     &[],
/// )
/// .unwrap();
///
/// let mut params = Vec::new();
/// assert_eq!(clause.render(&mut params).as_deref(), Some("[City] LIKE @P1"));
/// assert_eq!(params, vec![SqlValue::Text("%San%".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    predicates: Vec<FilterPredicate>,
}

impl WhereClause {
    /// No filtering.
    pub fn none() -> Self {
        Self::default()
    }

    /// Keeps the non-blank predicates.
    ///
    /// When `columns` is non-empty, every kept predicate must name one of
    /// them.
    pub fn from_predicates<I>(predicates: I, columns: &[ColumnMeta]) -> DatabaseResult<Self>
    where
        I: IntoIterator<Item = FilterPredicate>,
    {
        let predicates: Vec<FilterPredicate> = predicates
            .into_iter()
            .filter(|p| !p.is_blank())
            .collect();

        if !columns.is_empty() {
            for predicate in &predicates {
                if !columns.iter().any(|c| c.name() == predicate.column()) {
                    return Err(DatabaseError::new(DatabaseErrorKind::UnknownColumn(
                        predicate.column().clone(),
                    )));
                }
            }
        }

        Ok(Self { predicates })
    }

    /// The single-column quick filter: `column LIKE '%value%'`.
    ///
    /// The value is trimmed; a missing column or blank value is rejected.
    pub fn quick(column: &str, value: &str, columns: &[ColumnMeta]) -> DatabaseResult<Self> {
        let value = value.trim();
        if column.trim().is_empty() || value.is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::EmptyFilter));
        }
        Self::from_predicates([FilterPredicate::contains(column, value)], columns)
    }

    /// Whether no predicate survived.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The kept predicates.
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    /// Renders the condition (without the `WHERE` keyword), pushing one
    /// parameter per predicate onto `params`. Placeholder numbers continue
    /// from whatever is already in `params`.
    pub fn render(&self, params: &mut Vec<SqlValue>) -> Option<String> {
        if self.predicates.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .predicates
            .iter()
            .map(|p| {
                let placeholder = Statement::bind(params, SqlValue::Text(p.bound_value()));
                format!("{} {} {}", quote_ident(p.column()), p.operator(), placeholder)
            })
            .collect();
        Some(parts.join(" AND "))
    }

    /// ` WHERE ...` suffix, or an empty string.
    pub fn render_suffix(&self, params: &mut Vec<SqlValue>) -> String {
        self.render(params)
            .map(|condition| format!(" WHERE {}", condition))
            .unwrap_or_default()
    }

    /// Human-readable form with quoted literals, for display and logs only.
    pub fn describe(&self) -> String {
        self.predicates
            .iter()
            .map(|p| {
                format!(
                    "{} {} '{}'",
                    quote_ident(p.column()),
                    p.operator(),
                    p.bound_value().replace('\'', "''")
                )
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Whether any predicate uses `op`.
    pub fn uses(&self, op: FilterOperator) -> bool {
        self.predicates.iter().any(|p| *p.operator() == op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("Id", "int", false, None),
            ColumnMeta::new("Name", "nvarchar", true, None),
            ColumnMeta::new("Age", "int", true, None),
        ]
    }

    #[test]
    fn test_blank_predicates_dropped() {
        let clause = WhereClause::from_predicates(
            [
                FilterPredicate::new("Name", FilterOperator::Eq, ""),
                FilterPredicate::new("Age", FilterOperator::Gt, "   "),
            ],
            &columns(),
        )
        .unwrap();
        assert!(clause.is_empty());
        let mut params = Vec::new();
        assert_eq!(clause.render(&mut params), None);
        assert!(params.is_empty());
        assert_eq!(clause.render_suffix(&mut params), "");
    }

    #[test]
    fn test_operators_render_with_placeholders() {
        let clause = WhereClause::from_predicates(
            [
                FilterPredicate::new("Age", FilterOperator::GtEq, "30"),
                FilterPredicate::new("Name", FilterOperator::NotEq, "Bob"),
                FilterPredicate::contains("Name", "o"),
            ],
            &columns(),
        )
        .unwrap();
        let mut params = Vec::new();
        let sql = clause.render(&mut params).unwrap();
        assert_eq!(sql, "[Age] >= @P1 AND [Name] != @P2 AND [Name] LIKE @P3");
        assert_eq!(
            params,
            vec![
                SqlValue::Text("30".to_string()),
                SqlValue::Text("Bob".to_string()),
                SqlValue::Text("%o%".to_string()),
            ]
        );
    }

    #[test]
    fn test_placeholders_continue_numbering() {
        let clause =
            WhereClause::from_predicates([FilterPredicate::contains("Name", "x")], &[]).unwrap();
        let mut params = vec![SqlValue::Int(1)];
        assert_eq!(clause.render(&mut params).as_deref(), Some("[Name] LIKE @P2"));
    }

    #[test]
    fn test_values_never_in_sql_text() {
        let hostile = "'; DROP TABLE Users; --";
        let clause = WhereClause::from_predicates(
            [FilterPredicate::new("Name", FilterOperator::Eq, hostile)],
            &columns(),
        )
        .unwrap();
        let mut params = Vec::new();
        let sql = clause.render(&mut params).unwrap();
        assert!(!sql.contains("DROP"));
        assert_eq!(params, vec![SqlValue::Text(hostile.to_string())]);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let err = WhereClause::from_predicates(
            [FilterPredicate::new("Salary", FilterOperator::Eq, "1")],
            &columns(),
        )
        .unwrap_err();
        assert_eq!(err.kind, DatabaseErrorKind::UnknownColumn("Salary".to_string()));
    }

    #[test]
    fn test_quick_filter() {
        let clause = WhereClause::quick("Name", "  ann ", &columns()).unwrap();
        assert!(clause.uses(FilterOperator::Like));
        assert_eq!(clause.describe(), "[Name] LIKE '%ann%'");

        let err = WhereClause::quick("Name", "   ", &columns()).unwrap_err();
        assert_eq!(err.kind, DatabaseErrorKind::EmptyFilter);
        let err = WhereClause::quick("", "ann", &columns()).unwrap_err();
        assert_eq!(err.kind, DatabaseErrorKind::EmptyFilter);
    }

    #[test]
    fn test_describe_escapes_quotes() {
        let clause = WhereClause::from_predicates(
            [FilterPredicate::new("Name", FilterOperator::Eq, "O'Brien")],
            &[],
        )
        .unwrap();
        assert_eq!(clause.describe(), "[Name] = 'O''Brien'");
    }
}
