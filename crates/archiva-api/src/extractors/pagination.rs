//! Pagination query parameter validation.
//!
//! Invalid parameters are rejected with a validation error rather than
//! silently clamped; clients paging with `page=0` would otherwise read
//! duplicate windows without noticing.

use serde::{Deserialize, Serialize};

use archiva_core::error::AppError;
use archiva_core::result::AppResult;
use archiva_core::types::pagination::PageRequest;

/// Maximum accepted page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 25, max: 100).
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Validates the parameters and converts them to a `PageRequest`.
    pub fn into_page_request(self) -> AppResult<PageRequest> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(25);

        if page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(PageRequest::new(page, page_size))
    }
}
