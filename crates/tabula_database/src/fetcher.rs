//! Paginated fetch.

use crate::{QueryBuilder, WhereClause};
use tabula_core::{DEFAULT_PAGE_SIZE, PageWindow, ResultPage};
use tabula_error::{DatabaseError, DatabaseResult};
use tabula_interface::Driver;
use tracing::{debug, instrument};

/// Counts matching rows, clamps the requested page and fetches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFetcher {
    page_size: u64,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageFetcher {
    /// Creates a fetcher for pages of `page_size` rows.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Fetches `requested` page of `builder`'s table under `filter`.
    ///
    /// Issues `USE`, a count query, then the page query. A requested page
    /// past the end (or 0) yields page 1.
    #[instrument(
        skip(self, driver, builder, filter),
        fields(table = %builder.table(), filtered = !filter.is_empty())
    )]
    pub fn fetch<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        builder: &QueryBuilder,
        filter: &WhereClause,
        requested: u64,
    ) -> DatabaseResult<ResultPage> {
        driver.use_database(builder.table().database())?;

        let count = builder.count(filter);
        debug!(sql = %count, "Counting rows");
        let output = driver.query(count.sql(), count.params())?;
        let total_rows = output
            .scalar()
            .and_then(|v| v.as_i64())
            .ok_or_else(|| DatabaseError::query("Row count query returned no value"))?
            .max(0) as u64;

        let window = PageWindow::new(requested, self.page_size, total_rows);
        debug!(
            total_rows,
            total_pages = window.total_pages(),
            page = window.page(),
            "Computed page window"
        );

        let select = builder.page(filter, &window);
        debug!(sql = %select, "Fetching page");
        let (columns, rows) = driver.query(select.sql(), select.params())?.into_parts();

        // An empty page reports no columns; fall back to the table's own.
        let columns = if columns.is_empty() {
            builder.columns().iter().map(|c| c.name().clone()).collect()
        } else {
            columns
        };

        Ok(ResultPage::new(columns, rows, window))
    }
}
