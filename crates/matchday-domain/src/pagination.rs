//! Pagination and sort direction types shared by all searchable resources.

use serde::{Deserialize, Serialize};

/// Generic sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

/// Default page number when absent or out of range.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when absent or out of range.
pub const DEFAULT_LIMIT: u64 = 10;

/// Normalized pagination window.
///
/// Built from untrusted query parameters via [`PageRequest::from_params`]:
/// `page` and `limit` values that are absent or `<= 0` coerce to their
/// defaults (1 and 10). Out-of-range input is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn from_params(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l as u64,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Number of records to skip in the current sort order. Saturates instead
    /// of overflowing for absurdly large page/limit combinations.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata computed from an independent total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub page_size: u64,
}

impl PageInfo {
    pub fn new(total: u64, page: PageRequest) -> Self {
        Self {
            total,
            total_pages: total.div_ceil(page.limit),
            current_page: page.page,
            page_size: page.limit,
        }
    }
}

/// One page of results plus its pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    /// `total` is the count of ALL records matching the filter, recomputed
    /// independently of the fetched page.
    pub fn new(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        Self {
            items,
            pagination: PageInfo::new(total, page),
        }
    }
}
