//! Browsing session: one connection plus what the user has selected.

use crate::{
    PageFetcher, QueryBuilder, Statement, WhereClause, default_schema, list_columns,
    list_databases, list_schemas, list_tables,
};
use tabula_core::{
    ColumnMeta, FilterPredicate, PageWindow, RecordValues, ResultPage, TableEntry, TableRef,
};
use tabula_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use tabula_interface::Driver;
use tracing::{debug, error, info, instrument, warn};

/// Explicit session handle.
///
/// Owns the single driver connection together with the browsing state
/// (selected database, schema and table, column metadata, active filter,
/// current page and the last fetched page). Every operation runs
/// synchronously on the caller's thread.
pub struct Session<D: Driver> {
    driver: D,
    fetcher: PageFetcher,
    databases: Vec<String>,
    schemas: Vec<String>,
    tables: Vec<TableEntry>,
    database: Option<String>,
    schema: Option<String>,
    selection: Option<QueryBuilder>,
    filter: WhereClause,
    page: u64,
    result: ResultPage,
    refresh_error: Option<DatabaseError>,
}

impl<D: Driver> Session<D> {
    /// Creates a session over `driver` showing `page_size` rows per page.
    pub fn new(driver: D, page_size: u64) -> Self {
        let fetcher = PageFetcher::new(page_size);
        Self {
            driver,
            fetcher,
            databases: Vec::new(),
            schemas: Vec::new(),
            tables: Vec::new(),
            database: None,
            schema: None,
            selection: None,
            filter: WhereClause::none(),
            page: 1,
            result: ResultPage::empty(fetcher.page_size()),
            refresh_error: None,
        }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The underlying driver, mutably.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.fetcher.page_size()
    }

    /// Databases from the last [`Session::load_databases`].
    pub fn databases(&self) -> &[String] {
        &self.databases
    }

    /// Schemas of the selected database.
    pub fn schemas(&self) -> &[String] {
        &self.schemas
    }

    /// Tables and views of the selected schema.
    pub fn tables(&self) -> &[TableEntry] {
        &self.tables
    }

    /// Selected database.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Selected schema.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Selected table.
    pub fn table(&self) -> Option<&TableRef> {
        self.selection.as_ref().map(QueryBuilder::table)
    }

    /// Columns of the selected table; empty when nothing is selected.
    pub fn columns(&self) -> &[ColumnMeta] {
        self.selection
            .as_ref()
            .map(|b| b.columns().as_slice())
            .unwrap_or(&[])
    }

    /// Active filter.
    pub fn filter(&self) -> &WhereClause {
        &self.filter
    }

    /// Last fetched page.
    pub fn result(&self) -> &ResultPage {
        &self.result
    }

    /// Pagination state of the last fetched page.
    pub fn window(&self) -> &PageWindow {
        self.result.window()
    }

    /// Lists user databases and selects the first one, cascading down to a
    /// schema and table.
    #[instrument(skip(self))]
    pub fn load_databases(&mut self) -> DatabaseResult<()> {
        self.databases = list_databases(&mut self.driver)?;
        info!(count = self.databases.len(), "Loaded databases");
        if let Some(first) = self.databases.first().cloned() {
            self.select_database(&first)?;
        }
        Ok(())
    }

    /// Selects `database`, loads its schemas and selects the default one
    /// (`dbo` if present).
    #[instrument(skip(self))]
    pub fn select_database(&mut self, database: &str) -> DatabaseResult<()> {
        self.database = Some(database.to_string());
        self.schema = None;
        self.tables.clear();
        self.clear_selection();

        self.schemas = list_schemas(&mut self.driver, database)?;
        if let Some(schema) = default_schema(&self.schemas).map(str::to_string) {
            self.select_schema(&schema)?;
        }
        Ok(())
    }

    /// Selects `schema`, loads its tables and selects the first one.
    #[instrument(skip(self))]
    pub fn select_schema(&mut self, schema: &str) -> DatabaseResult<()> {
        let database = self
            .database
            .clone()
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoTableSelected))?;
        self.schema = Some(schema.to_string());
        self.clear_selection();

        self.tables = list_tables(&mut self.driver, &database, schema)?;
        if let Some(first) = self.tables.first().map(|t| t.name.clone()) {
            self.select_table(&first)?;
        }
        Ok(())
    }

    /// Selects `table` in the current schema, loads its columns, resets the
    /// filter and page, and fetches page 1.
    #[instrument(skip(self))]
    pub fn select_table(&mut self, table: &str) -> DatabaseResult<()> {
        let (Some(database), Some(schema)) = (self.database.clone(), self.schema.clone()) else {
            return Err(DatabaseError::new(DatabaseErrorKind::NoTableSelected));
        };
        let table = TableRef::new(database, schema, table);
        let columns = list_columns(&mut self.driver, &table)?;
        info!(table = %table, columns = columns.len(), "Selected table");

        self.selection = Some(QueryBuilder::new(table, columns));
        self.filter = WhereClause::none();
        self.page = 1;
        self.load_page()
    }

    /// Fetches the current page under the current filter.
    ///
    /// A failed fetch empties the current page, so the rows on display
    /// always belong to the selected table and filter.
    #[instrument(skip(self), fields(page = self.page))]
    pub fn load_page(&mut self) -> DatabaseResult<()> {
        let builder = self
            .selection
            .as_ref()
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoTableSelected))?;
        let result = match self
            .fetcher
            .fetch(&mut self.driver, builder, &self.filter, self.page)
        {
            Ok(result) => result,
            Err(e) => {
                self.result = ResultPage::empty(self.fetcher.page_size());
                return Err(e);
            }
        };
        self.page = result.window().page();
        debug!(window = %result.window(), rows = result.rows().len(), "Loaded page");
        self.result = result;
        Ok(())
    }

    /// Re-fetches the current page.
    pub fn refresh(&mut self) -> DatabaseResult<()> {
        self.load_page()
    }

    /// Moves to the next page. Returns `false` at the last page.
    pub fn next_page(&mut self) -> DatabaseResult<bool> {
        match self.window().next_page() {
            Some(page) => {
                self.page = page;
                self.load_page()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves to the previous page. Returns `false` at the first page.
    pub fn prev_page(&mut self) -> DatabaseResult<bool> {
        match self.window().previous_page() {
            Some(page) => {
                self.page = page;
                self.load_page()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Filters on `column LIKE '%value%'` and returns to page 1.
    #[instrument(skip(self))]
    pub fn apply_quick_filter(&mut self, column: &str, value: &str) -> DatabaseResult<()> {
        self.builder()?;
        let filter = WhereClause::quick(column, value, self.columns())?;
        self.set_filter(filter)
    }

    /// Replaces the filter with the non-blank `predicates` and returns to
    /// page 1.
    ///
    /// When every predicate is blank the current filter is left alone and
    /// `false` is returned.
    #[instrument(skip(self, predicates))]
    pub fn apply_filters<I>(&mut self, predicates: I) -> DatabaseResult<bool>
    where
        I: IntoIterator<Item = FilterPredicate>,
    {
        self.builder()?;
        let filter = WhereClause::from_predicates(predicates, self.columns())?;
        if filter.is_empty() {
            debug!("All filter values blank; keeping current filter");
            return Ok(false);
        }
        self.set_filter(filter)?;
        Ok(true)
    }

    /// Drops the filter and returns to page 1.
    #[instrument(skip(self))]
    pub fn clear_filter(&mut self) -> DatabaseResult<()> {
        self.set_filter(WhereClause::none())
    }

    /// Form values for row `index` of the current page.
    pub fn record_at(&self, index: usize) -> DatabaseResult<RecordValues> {
        let builder = self.builder()?;
        let row = self
            .result
            .rows()
            .get(index)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoRecordSelected))?;
        Ok(RecordValues::from_row(builder.columns(), row))
    }

    /// An empty form for the selected table.
    pub fn blank_record(&self) -> DatabaseResult<RecordValues> {
        Ok(RecordValues::blank(self.builder()?.columns()))
    }

    /// Inserts `record`, then refreshes.
    #[instrument(skip(self, record))]
    pub fn insert_record(&mut self, record: &RecordValues) -> DatabaseResult<u64> {
        let statement = self.builder()?.insert(record)?;
        self.run_mutation(statement)
    }

    /// Writes the columns that differ between `original` and `edited`, keyed
    /// on the original primary key, then refreshes.
    #[instrument(skip(self, original, edited))]
    pub fn update_record(
        &mut self,
        original: &RecordValues,
        edited: &RecordValues,
    ) -> DatabaseResult<u64> {
        let statement = self.builder()?.update(original, edited)?;
        self.run_mutation(statement)
    }

    /// Deletes the row keyed by `record`'s primary key, then refreshes.
    #[instrument(skip(self, record))]
    pub fn delete_record(&mut self, record: &RecordValues) -> DatabaseResult<u64> {
        let statement = self.builder()?.delete(record)?;
        self.run_mutation(statement)
    }

    /// Takes the error from a refresh that failed after a committed
    /// mutation, if any.
    pub fn take_refresh_error(&mut self) -> Option<DatabaseError> {
        self.refresh_error.take()
    }

    fn builder(&self) -> DatabaseResult<&QueryBuilder> {
        self.selection
            .as_ref()
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NoTableSelected))
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.filter = WhereClause::none();
        self.page = 1;
        self.result = ResultPage::empty(self.fetcher.page_size());
    }

    fn set_filter(&mut self, filter: WhereClause) -> DatabaseResult<()> {
        if !filter.is_empty() {
            info!(filter = %filter.describe(), "Applying filter");
        }
        self.filter = filter;
        self.page = 1;
        self.load_page()
    }

    /// Runs one statement in its own transaction. Any failure rolls back and
    /// is returned unchanged; success commits and refreshes the page.
    ///
    /// Once the commit succeeds the mutation is reported as done. A failed
    /// refresh is kept for [`Session::take_refresh_error`] instead.
    fn run_mutation(&mut self, statement: Statement) -> DatabaseResult<u64> {
        self.refresh_error = None;
        let database = self.builder()?.table().database().clone();
        self.driver.use_database(&database)?;
        self.driver.begin()?;

        let outcome = self
            .driver
            .execute(statement.sql(), statement.params())
            .and_then(|affected| self.driver.commit().map(|()| affected));

        match outcome {
            Ok(affected) => {
                info!(sql = %statement, affected, "Mutation committed");
                if let Err(e) = self.load_page() {
                    warn!(error = %e, "Refresh after mutation failed");
                    self.refresh_error = Some(e);
                }
                Ok(affected)
            }
            Err(e) => {
                error!(error = %e, sql = %statement, "Mutation failed; rolling back");
                if let Err(rollback) = self.driver.rollback() {
                    error!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}
