//! Page-based pagination helpers.
//!
//! The registry holds one family's records, so list endpoints use simple
//! page/per_page pagination rather than cursors.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Upper bound on page size.
pub const MAX_PER_PAGE: i64 = 200;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageParams {
    /// Clamps page and per_page to sane bounds.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.clamped().per_page
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        let p = self.clamped();
        (p.page - 1) * p.per_page
    }
}

/// A page of results with total count for client-side paging.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: PageParams, total: i64) -> Self {
        let params = params.clamped();
        Self {
            items,
            page: params.page,
            per_page: params.per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_computation() {
        let params = PageParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams {
            page: 0,
            per_page: 10_000,
        };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_negative_page_clamped() {
        let params = PageParams {
            page: -4,
            per_page: 0,
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_paginated_wrapper() {
        let page = Paginated::new(vec![1, 2, 3], PageParams::default(), 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
    }
}
