//! Pagination parameters shared by list queries.

use serde::{Deserialize, Serialize};

/// Default page size used by listing endpoints when none is supplied.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// 1-based page selection for repository list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Row offset for the current page; pages below 1 clamp to the first page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}
