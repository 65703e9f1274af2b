//! Splitting ordered results into fixed-size pages.

use std::num::NonZeroUsize;

use serde::Serialize;
use stream_registry_common::{AppError, AppResult};

/// Page number used when the caller gives none.
pub const DEFAULT_PAGE_NUMBER: usize = 0;

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: usize,
    /// Entries per page.
    pub page_size: NonZeroUsize,
}

impl PageRequest {
    /// Build a request from optional parameters, filling in the defaults.
    ///
    /// A page size of zero is rejected here so pagination never sees it.
    pub fn new(page_number: Option<usize>, page_size: Option<usize>) -> AppResult<Self> {
        let page_size = NonZeroUsize::new(page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .ok_or_else(|| AppError::BadRequest("pageSize must be at least 1".to_string()))?;

        Ok(Self {
            page_number: page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size,
        })
    }

    /// Select this request's page out of `items`.
    ///
    /// A page number past the last page yields an empty page.
    #[must_use]
    pub fn select<T>(self, items: Vec<T>) -> EntriesPage<T> {
        let total_entries = items.len();
        let entries = paginate(items, self.page_size)
            .into_iter()
            .nth(self.page_number)
            .unwrap_or_default();

        to_entries_page(entries, total_entries, self.page_size, self.page_number)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// One page of results with its position in the full listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesPage<T> {
    /// Entries across all pages.
    pub total_entries: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Requested page index.
    pub page_number: usize,
    /// Entries on this page, at most `page_size` of them.
    pub entries: Vec<T>,
}

/// Partition `items` into contiguous pages of `page_size`.
///
/// The last page may be shorter. An empty input yields no pages.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page_size: NonZeroUsize) -> Vec<Vec<T>> {
    let size = page_size.get();
    let mut pages = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();

    while items.peek().is_some() {
        pages.push(items.by_ref().take(size).collect());
    }
    pages
}

/// Package an already selected page. Totals are taken as given.
#[must_use]
pub fn to_entries_page<T>(
    entries: Vec<T>,
    total_entries: usize,
    page_size: NonZeroUsize,
    page_number: usize,
) -> EntriesPage<T> {
    EntriesPage {
        total_entries,
        page_size: page_size.get(),
        page_number,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_paginate_reassembles_in_order() {
        for n in 0..40 {
            let items: Vec<usize> = (0..n).collect();
            for p in 1..12 {
                let pages = paginate(items.clone(), size(p));

                assert_eq!(pages.concat(), items, "n={n} p={p}");
                assert_eq!(pages.len(), n.div_ceil(p), "n={n} p={p}");
                if let Some((last, full)) = pages.split_last() {
                    assert!(full.iter().all(|page| page.len() == p), "n={n} p={p}");
                    assert!(!last.is_empty() && last.len() <= p, "n={n} p={p}");
                }
            }
        }
    }

    #[test]
    fn test_paginate_empty_yields_no_pages() {
        let pages = paginate(Vec::<u8>::new(), size(10));
        assert!(pages.is_empty());
    }

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::new(None, None).unwrap();

        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page_number, 0);
        assert_eq!(request.page_size.get(), 10);
    }

    #[test]
    fn test_page_request_rejects_zero_size() {
        let err = PageRequest::new(Some(1), Some(0)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_select_first_page() {
        let page = PageRequest::default().select((0..25).collect::<Vec<_>>());

        assert_eq!(page.total_entries, 25);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.page_number, 0);
        assert_eq!(page.entries, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_select_remainder_page() {
        let request = PageRequest::new(Some(2), Some(10)).unwrap();
        let page = request.select((0..25).collect::<Vec<_>>());

        assert_eq!(page.total_entries, 25);
        assert_eq!(page.entries, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_select_past_last_page_is_empty() {
        let request = PageRequest::new(Some(10), Some(10)).unwrap();
        let page = request.select((0..25).collect::<Vec<_>>());

        assert_eq!(page.total_entries, 25);
        assert_eq!(page.page_number, 10);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_select_from_empty() {
        let page = PageRequest::default().select(Vec::<u8>::new());

        assert_eq!(page.total_entries, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_to_entries_page_keeps_given_totals() {
        let page = to_entries_page(vec!["a"], 99, size(5), 3);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalEntries": 99,
                "pageSize": 5,
                "pageNumber": 3,
                "entries": ["a"],
            })
        );
    }
}
