//! Pagination over an ordered sequence.

use std::num::NonZeroUsize;

/// Number of pages needed for `count` items, never less than 1.
#[must_use]
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested 1-indexed page into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page cut out of a larger ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Effective page after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Slice `items` into the requested page. Out-of-range pages are clamped,
/// never rejected.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page_size: NonZeroUsize, page: usize) -> Page<T> {
    let total_count = items.len();
    let total_pages = total_pages(total_count, page_size);
    let page = clamp_page(page, total_pages);
    let start = (page - 1) * page_size.get();
    let end = (start + page_size.get()).min(total_count);
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_count,
    }
}

/// Page numbers for quick links: the first `limit` pages.
#[must_use]
pub fn page_links(total_pages: usize, limit: usize) -> Vec<usize> {
    (1..=total_pages.min(limit)).collect()
}
