//! Pagination planning shared across all collection endpoints.

use crate::models::query::{parse_leading_int, QueryParams};
use crate::store::Window;

/// Normalized `page`/`limit` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Always at least 1.
    pub page: u64,
    /// `None` disables pagination.
    pub limit: Option<u64>,
}

impl PageRequest {
    /// Malformed or out-of-range input degrades to page 1 / no limit.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(parse_leading_int)
            .and_then(|p| u64::try_from(p).ok())
            .unwrap_or(1)
            .max(1);
        let limit = limit
            .and_then(parse_leading_int)
            .and_then(|l| u64::try_from(l).ok())
            .filter(|l| *l > 0);
        Self { page, limit }
    }

    pub fn from_query(params: &QueryParams) -> Self {
        Self::parse(params.page.as_deref(), params.limit.as_deref())
    }

    pub fn is_paginated(&self) -> bool {
        self.limit.is_some()
    }

    /// Plan the page against the collection size.
    pub fn plan(&self, total_items: u64) -> PaginationState {
        let Some(limit) = self.limit else {
            return PaginationState {
                requested_page: self.page,
                limit: None,
                total_items,
                total_pages: 1,
                effective_page: 1,
            };
        };

        let total_pages = total_items.div_ceil(limit);
        let effective_page = if total_pages > 0 {
            self.page.min(total_pages)
        } else {
            1
        };

        PaginationState {
            requested_page: self.page,
            limit: Some(limit),
            total_items,
            total_pages,
            effective_page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }
}

/// Outcome of planning a page against the collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub requested_page: u64,
    pub limit: Option<u64>,
    pub total_items: u64,
    /// 1 when pagination is disabled, 0 for an empty paginated collection.
    pub total_pages: u64,
    /// Within `[1, max(total_pages, 1)]`.
    pub effective_page: u64,
}

impl PaginationState {
    pub fn is_paginated(&self) -> bool {
        self.limit.is_some()
    }

    /// Store window for the effective page; `None` fetches everything.
    pub fn window(&self) -> Option<Window> {
        self.limit.map(|limit| Window {
            skip: (self.effective_page - 1).saturating_mul(limit),
            limit,
        })
    }

    /// Page number the `last` link points at; never 0.
    pub fn last_page(&self) -> u64 {
        self.total_pages.max(1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.effective_page > 1).then(|| self.effective_page - 1)
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.is_paginated() && self.effective_page < self.total_pages)
            .then(|| self.effective_page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(page: &str, limit: &str, total: u64) -> PaginationState {
        PageRequest::parse(Some(page), Some(limit)).plan(total)
    }

    #[test]
    fn pagination_defaults() {
        let p = PageRequest::parse(None, None);
        assert_eq!(p, PageRequest::default());
        assert!(!p.is_paginated());
    }

    #[test]
    fn page_is_clamped_up_to_one() {
        assert_eq!(PageRequest::parse(Some("0"), None).page, 1);
        assert_eq!(PageRequest::parse(Some("-3"), None).page, 1);
        assert_eq!(PageRequest::parse(Some("abc"), None).page, 1);
    }

    #[test]
    fn invalid_limit_disables_pagination() {
        for raw in ["0", "-5", "ten", ""] {
            assert_eq!(PageRequest::parse(None, Some(raw)).limit, None, "limit {raw:?}");
        }
    }

    #[test]
    fn disabled_pagination_is_single_page() {
        let state = PageRequest::parse(Some("4"), None).plan(5);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.effective_page, 1);
        assert_eq!(state.window(), None);
        assert_eq!(state.previous_page(), None);
        assert_eq!(state.next_page(), None);
    }

    #[test]
    fn total_pages_is_ceiling() {
        for (total, limit, pages) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (25, 10, 3)] {
            let state = plan("1", &limit.to_string(), total);
            assert_eq!(state.total_pages, pages, "total {total} limit {limit}");
        }
    }

    #[test]
    fn first_page_of_three() {
        let state = plan("1", "10", 25);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.previous_page(), None);
        assert_eq!(state.next_page(), Some(2));
        assert_eq!(state.window(), Some(Window { skip: 0, limit: 10 }));
    }

    #[test]
    fn out_of_range_page_is_clamped_to_last() {
        let state = plan("99", "10", 25);
        assert_eq!(state.requested_page, 99);
        assert_eq!(state.effective_page, 3);
        assert_eq!(state.next_page(), None);
        assert_eq!(state.previous_page(), Some(2));
        assert_eq!(state.window(), Some(Window { skip: 20, limit: 10 }));
    }

    #[test]
    fn empty_collection() {
        let state = plan("3", "10", 0);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.effective_page, 1);
        assert_eq!(state.last_page(), 1);
        assert_eq!(state.previous_page(), None);
        assert_eq!(state.next_page(), None);
    }

    #[test]
    fn effective_page_stays_in_range() {
        for total in [0u64, 1, 9, 10, 11, 57] {
            for page in ["-1", "0", "1", "2", "6", "1000", "99999999999999999999"] {
                let state = plan(page, "10", total);
                assert!(state.effective_page >= 1);
                assert!(state.effective_page <= state.total_pages.max(1));
                assert_eq!(state.previous_page().is_none(), state.effective_page == 1);
                assert_eq!(
                    state.next_page().is_none(),
                    state.effective_page >= state.total_pages
                );
            }
        }
    }
}
