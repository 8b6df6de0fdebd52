use serde::{Deserialize, Serialize};

/// Fixed number of rows per page in every listing
pub const PAGE_SIZE: u64 = 20;

/// Filter, ordering and page selection for a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page: u64,
    /// Column name to order by
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub descending: bool,
    /// Free-text search applied to the entity's searchable columns
    #[serde(default)]
    pub search: Option<String>,
}

fn first_page() -> u64 {
    1
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            order_by: None,
            descending: false,
            search: None,
        }
    }
}

impl ListQuery {
    /// Zero-based page index, treating page 0 as the first page
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, query: &ListQuery, total_items: u64) -> Self {
        Self {
            items,
            page: query.page_index() + 1,
            page_size: PAGE_SIZE,
            total_items,
            total_pages: total_items.div_ceil(PAGE_SIZE),
        }
    }

    /// Converts the items while keeping the page bookkeeping
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
