//! Module: response
//! Responsibility: result shapes produced by execution strategies.
//! Does not own: query execution or tuple normalization.
//! Boundary: `QueryResult<Row>` leaves the executor, `QueryResult<Value>`
//! leaves the template.

mod paged;
mod row;


pub use paged::{Page, Slice};
pub use row::{Row, Tuple, TupleElement};

use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to reading a result in a shape it does not have.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ResponseError {
    #[error("expected a {expected} result, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

///
/// QueryResult
///
/// Result of one invocation, in the shape the method signature demands.
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult<T> {
    Single(Option<T>),
    Collection(Vec<T>),
    Slice(Slice<T>),
    Page(Page<T>),
    Modified(u64),
}

impl<T> QueryResult<T> {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Collection(_) => "collection",
            Self::Slice(_) => "slice",
            Self::Page(_) => "page",
            Self::Modified(_) => "modified",
        }
    }

    /// Rows carried by this result; for updates, the affected-row count.
    #[must_use]
    pub fn row_count(&self) -> u64 {
        let len = match self {
            Self::Single(row) => usize::from(row.is_some()),
            Self::Collection(rows) => rows.len(),
            Self::Slice(slice) => slice.len(),
            Self::Page(page) => page.len(),
            Self::Modified(count) => return *count,
        };

        u64::try_from(len).unwrap_or(u64::MAX)
    }

    /// Convert every row, keeping the surrounding shape.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<QueryResult<U>, E> {
        Ok(match self {
            Self::Single(row) => QueryResult::Single(row.map(&mut f).transpose()?),
            Self::Collection(rows) => {
                QueryResult::Collection(rows.into_iter().map(f).collect::<Result<_, _>>()?)
            }
            Self::Slice(slice) => QueryResult::Slice(slice.try_map(f)?),
            Self::Page(page) => QueryResult::Page(page.try_map(f)?),
            Self::Modified(count) => QueryResult::Modified(count),
        })
    }

    // ------------------------------------------------------------------
    // Shape access
    // ------------------------------------------------------------------

    pub fn into_single(self) -> Result<Option<T>, ResponseError> {
        match self {
            Self::Single(row) => Ok(row),
            other => Err(other.mismatch("single")),
        }
    }

    pub fn into_collection(self) -> Result<Vec<T>, ResponseError> {
        match self {
            Self::Collection(rows) => Ok(rows),
            other => Err(other.mismatch("collection")),
        }
    }

    pub fn into_slice(self) -> Result<Slice<T>, ResponseError> {
        match self {
            Self::Slice(slice) => Ok(slice),
            other => Err(other.mismatch("slice")),
        }
    }

    pub fn into_page(self) -> Result<Page<T>, ResponseError> {
        match self {
            Self::Page(page) => Ok(page),
            other => Err(other.mismatch("page")),
        }
    }

    pub fn modified_count(&self) -> Result<u64, ResponseError> {
        match self {
            Self::Modified(count) => Ok(*count),
            other => Err(other.mismatch("modified")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ResponseError {
        ResponseError::ShapeMismatch {
            expected,
            found: self.label(),
        }
    }
}
