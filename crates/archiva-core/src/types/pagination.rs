//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
///
/// Invalid page numbers are rejected at the API boundary; by the time a
/// `PageRequest` exists, `page >= 1` and `1 <= page_size <= 100` hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the page size to the allowed range.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Split this page's offset/limit window across two logically
    /// concatenated sequences, the first of which has `first_total` items.
    ///
    /// Returns `((first_offset, first_limit), (second_offset, second_limit))`.
    /// Used by merged folder+document listings, where folders precede
    /// documents in the logical sequence.
    pub fn split_window(&self, first_total: u64) -> ((u64, u64), (u64, u64)) {
        let offset = self.offset();
        let limit = self.limit();

        let first_offset = offset.min(first_total);
        let first_limit = limit.min(first_total - first_offset);

        let second_offset = offset.saturating_sub(first_total);
        let second_limit = limit - first_limit;

        ((first_offset, first_limit), (second_offset, second_limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        let page = PageRequest::new(1, 10);
        assert_eq!(page.offset(), 0);
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageRequest::new(1, 0).page_size, 1);
        assert_eq!(PageRequest::new(1, 5000).page_size, 100);
    }

    #[test]
    fn split_window_inside_first_sequence() {
        // 10 folders, page 1 of 5: all items come from folders.
        let page = PageRequest::new(1, 5);
        assert_eq!(page.split_window(10), ((0, 5), (0, 0)));
    }

    #[test]
    fn split_window_straddles_boundary() {
        // 3 folders then documents; page of 5 takes 3 folders + 2 documents.
        let page = PageRequest::new(1, 5);
        assert_eq!(page.split_window(3), ((0, 3), (0, 2)));
    }

    #[test]
    fn split_window_past_first_sequence() {
        // 3 folders; page 2 of 5 starts at logical offset 5 => document offset 2.
        let page = PageRequest::new(2, 5);
        assert_eq!(page.split_window(3), ((3, 0), (2, 5)));
    }

    #[test]
    fn split_window_no_first_items() {
        let page = PageRequest::new(1, 25);
        assert_eq!(page.split_window(0), ((0, 0), (0, 25)));
    }

    #[test]
    fn page_response_math() {
        let resp = PageResponse::new(vec![1, 2, 3], 1, 3, 7);
        assert_eq!(resp.total_pages, 3);
        assert!(resp.has_next);
        assert!(!resp.has_previous);

        let empty: PageResponse<i32> = PageResponse::new(Vec::new(), 1, 25, 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next);
    }
}
