//! Pagination Types
//!
//! `?page=&pageSize=` query parameters and the paginated envelope returned by
//! `GET /posts`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Page used when `page` is omitted
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when `pageSize` is omitted
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for paginated listings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "pageSize must be between 1 and 100"))]
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Rows to skip: `(page - 1) * pageSize`
    pub fn offset(&self) -> i64 {
        i64::from(self.page().saturating_sub(1)) * i64::from(self.page_size())
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size())
    }
}

/// Paginated listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap one page of rows; `totalPages = ceil(total / pageSize)`
    pub fn new(data: Vec<T>, total: u64, params: &PageParams) -> Self {
        let page_size = params.page_size();
        Self {
            data,
            total,
            page: params.page(),
            page_size,
            total_pages: total.div_ceil(u64::from(page_size.max(1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), DEFAULT_PAGE);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let params = PageParams::new(2, 10);
        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Paginated<u8> = Paginated::new(Vec::new(), 25, &PageParams::new(2, 10));
        assert_eq!(page.total_pages, 3);

        let empty: Paginated<u8> = Paginated::new(Vec::new(), 0, &PageParams::default());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_invalid_params() {
        assert!(PageParams::new(0, 10).validate().is_err());
        assert!(PageParams::new(1, 0).validate().is_err());
        assert!(PageParams::new(1, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(PageParams::new(3, MAX_PAGE_SIZE).validate().is_ok());
    }
}
