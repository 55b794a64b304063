//! Shared Types
//!
//! Pagination parameters and the page envelope returned by listing
//! endpoints.

use serde::{Deserialize, Serialize};

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// Page number clamped to the valid range (>= 1)
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to the valid range (>= 1)
    pub fn page_size(&self) -> u32 {
        self.page_size.max(1)
    }

    /// Calculate offset for SQL queries
    pub fn offset(&self) -> u32 {
        (self.page() - 1) * self.page_size()
    }

    /// Get limit for SQL queries
    pub fn limit(&self) -> u32 {
        self.page_size()
    }
}

/// A single page of results with paging metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginate<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> Paginate<T> {
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32) -> Self {
        Self {
            items,
            current_page,
            total_pages,
        }
    }

    /// Page count for `total` rows at `page_size` rows per page
    pub fn total_pages_for(total: i64, page_size: u32) -> u32 {
        let total = total.max(0) as u64;
        total.div_ceil(page_size.max(1) as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_limit() {
        let params = PaginationParams {
            page: 3,
            page_size: 10,
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn page_zero_is_clamped() {
        let params = PaginationParams {
            page: 0,
            page_size: 0,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Paginate::<()>::total_pages_for(0, 10), 0);
        assert_eq!(Paginate::<()>::total_pages_for(10, 10), 1);
        assert_eq!(Paginate::<()>::total_pages_for(11, 10), 2);
        assert_eq!(Paginate::<()>::total_pages_for(19, 10), 2);
        assert_eq!(Paginate::<()>::total_pages_for(21, 10), 3);
    }

    #[test]
    fn page_navigation_flags() {
        let page = Paginate::new(vec![1, 2, 3], 1, 2);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }
}
