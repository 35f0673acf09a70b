//! Filter predicates entered by the user.

use serde::{Deserialize, Serialize};
use tabula_error::{DatabaseError, DatabaseErrorKind};

/// Comparison operator offered in the filter form.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum FilterOperator {
    /// `=`
    #[default]
    #[strum(serialize = "=")]
    Eq,
    /// `!=`
    #[strum(serialize = "!=")]
    NotEq,
    /// `>`
    #[strum(serialize = ">")]
    Gt,
    /// `<`
    #[strum(serialize = "<")]
    Lt,
    /// `>=`
    #[strum(serialize = ">=")]
    GtEq,
    /// `<=`
    #[strum(serialize = "<=")]
    LtEq,
    /// `LIKE`, matching the value anywhere in the column
    #[strum(serialize = "LIKE")]
    Like,
}

impl FilterOperator {
    /// Operators in the order the filter form cycles through them.
    pub const ALL: [FilterOperator; 7] = [
        FilterOperator::Eq,
        FilterOperator::NotEq,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::GtEq,
        FilterOperator::LtEq,
        FilterOperator::Like,
    ];

    /// The next operator in [`FilterOperator::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|op| *op == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous operator in [`FilterOperator::ALL`], wrapping around.
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|op| *op == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for FilterOperator {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("like") {
            return Ok(FilterOperator::Like);
        }
        match trimmed {
            "=" => Ok(FilterOperator::Eq),
            "!=" | "<>" => Ok(FilterOperator::NotEq),
            ">" => Ok(FilterOperator::Gt),
            "<" => Ok(FilterOperator::Lt),
            ">=" => Ok(FilterOperator::GtEq),
            "<=" => Ok(FilterOperator::LtEq),
            other => Err(DatabaseError::new(DatabaseErrorKind::InvalidOperator(
                other.to_string(),
            ))),
        }
    }
}

/// One `column operator value` condition. A list of predicates is ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct FilterPredicate {
    /// Column to compare
    column: String,
    /// Comparison operator
    operator: FilterOperator,
    /// Raw user text
    value: String,
}

impl FilterPredicate {
    /// Creates a predicate.
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// A `LIKE` predicate matching `value` anywhere in `column`.
    pub fn contains(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOperator::Like, value)
    }

    /// Whether the value is empty after trimming. Blank predicates are dropped.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// The value to bind: wrapped in `%` for `LIKE`, unchanged otherwise.
    pub fn bound_value(&self) -> String {
        match self.operator {
            FilterOperator::Like => format!("%{}%", self.value),
            _ => self.value.clone(),
        }
    }
}

impl std::str::FromStr for FilterPredicate {
    type Err = DatabaseError;

    /// Parses `column:operator:value`. The value may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(column), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DatabaseError::new(DatabaseErrorKind::InvalidOperator(
                format!("expected column:operator:value, got '{}'", s),
            )));
        };
        if column.trim().is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::EmptyFilter));
        }
        Ok(Self::new(column.trim(), op.parse()?, value))
    }
}
