//! Scripted in-memory driver for tests and demos.
//!
//! Records every call and answers queries from a list of substring rules.
//! Nothing is persisted; it never talks to a server.

use tabula_core::{Row, SqlValue};
use tabula_error::{DatabaseError, DatabaseResult};
use tabula_interface::{Driver, QueryOutput};

/// One call made against a [`ScriptedDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    /// `Driver::query`
    Query {
        /// SQL text
        sql: String,
        /// Bound parameters
        params: Vec<SqlValue>,
    },
    /// `Driver::execute`
    Execute {
        /// SQL text
        sql: String,
        /// Bound parameters
        params: Vec<SqlValue>,
    },
    /// `Driver::use_database`
    Use(String),
    /// `Driver::begin`
    Begin,
    /// `Driver::commit`
    Commit,
    /// `Driver::rollback`
    Rollback,
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    answer: Result<QueryOutput, String>,
}

/// A [`Driver`] that answers from canned rules and records what it was asked.
///
/// Query rules match when the SQL contains the rule's substring; the most
/// recently added matching rule wins. Unmatched queries return no rows.
///
/// # Examples
///
/// ```
/// use tabula_core::SqlValue;
/// use tabula_database::ScriptedDriver;
/// use tabula_interface::Driver;
///
/// let mut driver = ScriptedDriver::new().with_count(250);
/// let output = driver.query("SELECT COUNT(*) FROM [dbo].[T]", &[]).unwrap();
/// assert_eq!(output.scalar(), Some(&SqlValue::Int(250)));
/// assert_eq!(driver.calls().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriver {
    calls: Vec<DriverCall>,
    query_rules: Vec<Rule>,
    execute_rules: Vec<(String, Result<u64, String>)>,
    fail_use: Option<String>,
}

impl ScriptedDriver {
    /// Creates a driver with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers queries containing `needle` with `columns` and `rows`.
    pub fn on_query(mut self, needle: impl Into<String>, columns: &[&str], rows: Vec<Row>) -> Self {
        self.query_rules.push(Rule {
            needle: needle.into(),
            answer: Ok(QueryOutput::new(
                columns.iter().map(|c| c.to_string()).collect(),
                rows,
            )),
        });
        self
    }

    /// Fails queries containing `needle` with `message`.
    pub fn on_query_error(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.query_rules.push(Rule {
            needle: needle.into(),
            answer: Err(message.into()),
        });
        self
    }

    /// Answers `COUNT(*)` queries with `total`.
    pub fn with_count(self, total: i64) -> Self {
        self.on_query("COUNT(*)", &[""], vec![vec![SqlValue::Int(total)]])
    }

    /// Makes statements containing `needle` report `affected` rows.
    pub fn on_execute(mut self, needle: impl Into<String>, affected: u64) -> Self {
        self.execute_rules.push((needle.into(), Ok(affected)));
        self
    }

    /// Fails statements containing `needle` with `message`.
    pub fn on_execute_error(
        mut self,
        needle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.execute_rules.push((needle.into(), Err(message.into())));
        self
    }

    /// Fails every `use_database` call with `message`.
    pub fn fail_use_database(mut self, message: impl Into<String>) -> Self {
        self.fail_use = Some(message.into());
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// SQL text of every query and statement, in order.
    pub fn statements(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Query { sql, .. } | DriverCall::Execute { sql, .. } => {
                    Some(sql.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded calls, keeping rules.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Driver for ScriptedDriver {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<QueryOutput> {
        self.calls.push(DriverCall::Query {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match self
            .query_rules
            .iter()
            .rev()
            .find(|rule| sql.contains(&rule.needle))
        {
            Some(Rule { answer: Ok(output), .. }) => Ok(output.clone()),
            Some(Rule { answer: Err(message), .. }) => Err(DatabaseError::query(message.clone())),
            None => Ok(QueryOutput::default()),
        }
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<u64> {
        self.calls.push(DriverCall::Execute {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match self
            .execute_rules
            .iter()
            .rev()
            .find(|(needle, _)| sql.contains(needle.as_str()))
        {
            Some((_, Ok(affected))) => Ok(*affected),
            Some((_, Err(message))) => Err(DatabaseError::query(message.clone())),
            None => Ok(1),
        }
    }

    fn use_database(&mut self, database: &str) -> DatabaseResult<()> {
        self.calls.push(DriverCall::Use(database.to_string()));
        match &self.fail_use {
            Some(message) => Err(DatabaseError::query(message.clone())),
            None => Ok(()),
        }
    }

    fn begin(&mut self) -> DatabaseResult<()> {
        self.calls.push(DriverCall::Begin);
        Ok(())
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        self.calls.push(DriverCall::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        self.calls.push(DriverCall::Rollback);
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
