use crate::db::query::{PageRequest, PreparedQuery};

///
/// PageWindow
///
/// Canonical pagination window sizing for one page request.
/// `keep_count` is the page size, and `fetch_count` adds one extra row when
/// the caller needs to know whether another page follows.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageWindow {
    pub(crate) offset: u64,
    pub(crate) fetch_count: u64,
    pub(crate) keep_count: usize,
}

impl PageWindow {
    /// Write the window into the query's first-result / max-results slots.
    pub(crate) const fn apply(self, query: &mut PreparedQuery) {
        query.set_first_result(self.offset);
        query.set_max_results(self.fetch_count);
    }
}

/// Compute the page window for `request`; unpaged requests have none.
#[must_use]
pub(crate) fn compute_page_window(request: PageRequest, needs_extra: bool) -> Option<PageWindow> {
    let size = request.page_size()?;
    let keep_count = usize::try_from(size).unwrap_or(usize::MAX);
    let fetch_count = u64::from(size).saturating_add(u64::from(needs_extra));

    Some(PageWindow {
        offset: request.offset(),
        fetch_count,
        keep_count,
    })
}

/// Total row count implied by one fetched page, when it can be known without
/// a count query.
///
/// - unpaged: everything was fetched
/// - first page, short: the page is the whole result
/// - later page, short but not empty: the offset plus this page
///
/// An empty later page proves nothing (the offset may overshoot), and a full
/// page may have successors, so both return `None`.
#[must_use]
pub(crate) fn derive_total(request: PageRequest, fetched: usize) -> Option<u64> {
    let fetched_u64 = u64::try_from(fetched).unwrap_or(u64::MAX);
    let Some(size) = request.page_size() else {
        return Some(fetched_u64);
    };

    let short = fetched_u64 < u64::from(size);
    let offset = request.offset();
    match (offset, short) {
        (0, true) => Some(fetched_u64),
        (_, true) if fetched > 0 => Some(offset.saturating_add(fetched_u64)),
        _ => None,
    }
}

///
/// TESTS
///
