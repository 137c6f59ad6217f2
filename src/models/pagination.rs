//! Pagination arithmetic and the generic listing envelope

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Largest page size a listing endpoint accepts
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest page number whose offset still fits in an `i64` at any page size
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Offset/limit window for one page, plus the derived page count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
    pub pages: i64,
}

/// Convert a 1-based page number and page size into an offset/limit window.
///
/// Callers validate `page >= 1` and `1 <= size <= 100` beforehand. An offset
/// past `i64::MAX` saturates, which selects an empty page.
pub fn paginate(page: i64, size: i64, total: i64) -> Pagination {
    debug_assert!(page >= 1 && size >= 1);
    Pagination {
        skip: (page - 1).saturating_mul(size),
        limit: size,
        pages: (total + size - 1) / size,
    }
}

/// Page selection query parameters
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = MAX_PAGE, message = "page out of range"))]
    pub page: i64,
    /// Items per page (max 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "size must be between 1 and 100"))]
    pub size: i64,
}

impl PageParams {
    pub fn window(&self, total: i64) -> Pagination {
        paginate(self.page, self.size, total)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Items on the requested page
    pub items: Vec<T>,
    /// Total number of matching items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub size: i64,
    /// Total number of pages
    pub pages: i64,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            size: params.size,
            pages: params.window(total).pages,
        }
    }
}
