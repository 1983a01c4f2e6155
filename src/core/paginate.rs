//! Paginate stage: fixed-size page windows with clamping

use crate::core::query::PaginationMeta;
use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page window
///
/// Both fields are at least 1. The page may exceed the number of pages;
/// [`paginate`] clamps it and reports the page it actually used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
}

impl PageState {
    pub fn new(page_size: usize, current_page: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: current_page.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Same size, different page
    pub fn with_page(self, page: usize) -> Self {
        Self::new(self.page_size, page)
    }

    /// Zero-based index of the first item on the current page
    pub fn first_index(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// Change the page size, keeping the first visible item on screen
    pub fn resized(self, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self::new(page_size, self.first_index() / page_size + 1)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 1)
    }
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// A page window over a sorted slice
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub meta: PaginationMeta,
}

impl<T> Page<'_, T> {
    /// True when the requested page was out of range
    pub fn was_clamped(&self) -> bool {
        self.meta.was_clamped()
    }
}

/// Slice `items` into the page window described by `state`
///
/// Never returns a silently empty out-of-range page: a page beyond the last
/// one is clamped to the last one.
pub fn paginate<T>(items: &[T], state: PageState) -> Page<'_, T> {
    let meta = PaginationMeta::new(state.current_page(), state.page_size(), items.len());
    let start = meta.from.saturating_sub(1);
    let window = items.get(start..meta.to).unwrap_or_default();

    if meta.was_clamped() {
        tracing::trace!(
            requested = meta.requested_page,
            page = meta.page,
            "page clamped"
        );
    }

    Page {
        items: window,
        meta,
    }
}
