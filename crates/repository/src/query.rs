//! Pagination parameters and paginated results.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination parameters for `find_all`.
///
/// Pages are 1-based. A zero `page` or `page_size` falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Replace zero values with defaults and cap the page size.
    pub fn normalized(self, default_page_size: u32, max_page_size: Option<u32>) -> Self {
        let page = if self.page == 0 {
            DEFAULT_PAGE
        } else {
            self.page
        };
        let mut page_size = if self.page_size == 0 {
            default_page_size.max(1)
        } else {
            self.page_size
        };
        if let Some(max) = max_page_size {
            page_size = page_size.min(max.max(1));
        }
        Self { page, page_size }
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn new(params: QueryParams, total: u64) -> Self {
        let size = u64::from(params.page_size.max(1));
        Self {
            page: params.page,
            page_size: params.page_size,
            total,
            total_pages: total.div_ceil(size),
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
