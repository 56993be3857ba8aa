//! Query evaluation: filter, then stable sort, then paginate.

use tracing::debug;

use super::filter::{Predicate, filter_records};
use super::page::{self, paginate};
use super::sort::sort_records;
use super::state::{QueryState, SortDir, SortKey};
use crate::model::record::Record;

/// `aria-sort` style indicator for one column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    None,
}

/// The paginated, filtered and sorted projection of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    rows: Vec<Record>,
    page: usize,
    total_pages: usize,
    total_count: usize,
    sort_key: SortKey,
    sort_dir: SortDir,
}

impl DerivedView {
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Effective page, clamped into `[1, total_pages]`.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of records matching the filters, across all pages.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Quick-link page numbers, capped at `limit`.
    #[must_use]
    pub fn page_links(&self, limit: usize) -> Vec<usize> {
        page::page_links(self.total_pages, limit)
    }

    #[must_use]
    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        if key != self.sort_key {
            return SortIndicator::None;
        }
        match self.sort_dir {
            SortDir::Asc => SortIndicator::Ascending,
            SortDir::Desc => SortIndicator::Descending,
        }
    }

    /// Footer line, e.g. `Page 1 of 2 • 9 results`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} • {} results",
            self.page, self.total_pages, self.total_count
        )
    }
}

/// Evaluate `state` against a store (or any record slice in store order).
///
/// Pure and deterministic: the same records and state always produce the
/// same view. Never fails; malformed filter input degrades to "no bound"
/// or "no match".
pub fn evaluate<S>(store: &S, state: &QueryState) -> DerivedView
where
    S: AsRef<[Record]> + ?Sized,
{
    let records = store.as_ref();
    let predicate = Predicate::compile(state);
    let mut matched = filter_records(records, &predicate);
    sort_records(&mut matched, state.sort_key(), state.sort_dir());
    let page = paginate(&matched, state.page_size(), state.page());

    debug!(
        scanned = records.len(),
        matched = page.total_count,
        page = page.page,
        total_pages = page.total_pages,
        sort = %state.sort_key(),
        dir = %state.sort_dir(),
        "evaluated query"
    );

    DerivedView {
        rows: page.items.into_iter().cloned().collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_count: page.total_count,
        sort_key: state.sort_key(),
        sort_dir: state.sort_dir(),
    }
}
