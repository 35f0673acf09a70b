//! Pagination arithmetic.

use serde::{Deserialize, Serialize};

/// Rows shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// A page position within a result set of known size.
///
/// Pages are 1-based. The page number is always within
/// `[1, total_pages()]`: a page beyond the end resets to page 1, and page 0
/// is read as page 1.
///
/// # Examples
///
/// ```
/// use tabula_core::PageWindow;
///
/// let window = PageWindow::new(4, 100, 250);
/// assert_eq!(window.total_pages(), 3);
/// assert_eq!(window.page(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    page: u64,
    page_size: u64,
    total_rows: u64,
}

impl PageWindow {
    /// Creates a window for `requested` page, clamped against `total_rows`.
    pub fn new(requested: u64, page_size: u64, total_rows: u64) -> Self {
        let mut window = Self {
            page: requested,
            page_size: page_size.max(1),
            total_rows,
        };
        window.page = window.clamp(requested);
        window
    }

    /// The first page of an empty result.
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size, 0)
    }

    /// Current page, 1-based.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Total rows matching the current filter.
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// `ceil(total_rows / page_size)`, never less than 1.
    pub fn total_pages(&self) -> u64 {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    /// Maps a requested page into range: past the end resets to 1.
    pub fn clamp(&self, requested: u64) -> u64 {
        if requested == 0 || requested > self.total_pages() {
            1
        } else {
            requested
        }
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// The previous page number, if any.
    pub fn previous_page(&self) -> Option<u64> {
        self.has_previous().then(|| self.page - 1)
    }

    /// The next page number, if any.
    pub fn next_page(&self) -> Option<u64> {
        self.has_next().then(|| self.page + 1)
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page {} of {} | {} records",
            self.page,
            self.total_pages(),
            self.total_rows
        )
    }
}
