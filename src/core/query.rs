//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Number of payments shown per table page
pub const PAGE_SIZE: usize = 6;

/// Query parameters for the payment list
///
/// Every parameter is optional; an empty query yields the first page of the
/// store in its natural newest-first order.
///
/// # Example
/// ```text
/// GET /payments?q=maria
/// GET /payments?sort=orderAmount&order=asc&page=2
/// GET /payments?from=2024-10-01&to=2024-11-30
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListQuery {
    /// Free-text search over identification, recipient and status
    pub q: Option<String>,

    /// Sort column: `orderAmount`, `createdAt` or `completedAt`
    pub sort: Option<String>,

    /// Sort direction: `asc` (default when `sort` is set) or `desc`
    pub order: Option<String>,

    /// Inclusive lower bound on the creation date, `YYYY-MM-DD`
    pub from: Option<String>,

    /// Inclusive upper bound on the creation date, `YYYY-MM-DD`
    pub to: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<usize>,
}

impl ListQuery {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    ///
    /// `page` is taken as-is: a page past the end is reported faithfully so
    /// callers can decide whether to clamp.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(page_size).max(1);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Whether `page` points past the last page
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }
}
