//! Module: response::paged
//! Responsibility: slice and page payload contracts.
//! Does not own: window sizing or count-query execution.

use crate::db::query::PageRequest;

///
/// Slice
///
/// One window of results plus whether another window follows.
/// Carries no total count.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Slice<T> {
    content: Vec<T>,
    request: PageRequest,
    has_next: bool,
}

impl<T> Slice<T> {
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, has_next: bool) -> Self {
        Self {
            content,
            request,
            has_next,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Request for the following window, when one exists.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        if self.has_next {
            self.request.next()
        } else {
            None
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Slice<U>, E> {
        Ok(Slice {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            request: self.request,
            has_next: self.has_next,
        })
    }
}

///
/// Page
///
/// A slice plus the exact total number of matching rows.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            content,
            request,
            total,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of this request's size; unpaged results are one page.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        match self.request.page_size() {
            Some(size) => self.total.div_ceil(size as u64),
            None => 1,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        let seen = self
            .request
            .offset()
            .saturating_add(u64::try_from(self.content.len()).unwrap_or(u64::MAX));

        self.request.is_paged() && seen < self.total
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            request: self.request,
            total: self.total,
        })
    }
}
