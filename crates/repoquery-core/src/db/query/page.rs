use serde::{Deserialize, Serialize};

///
/// PageRequest
///
/// Zero-based page window requested by the caller, or no window at all.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PageRequest {
    #[default]
    Unpaged,
    Paged {
        page: u32,
        size: u32,
    },
}

impl PageRequest {
    /// Build a paged request. Page sizes below one are raised to one.
    #[must_use]
    pub const fn of(page: u32, size: u32) -> Self {
        let size = if size == 0 { 1 } else { size };

        Self::Paged { page, size }
    }

    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self::of(0, size)
    }

    #[must_use]
    pub const fn is_paged(&self) -> bool {
        matches!(self, Self::Paged { .. })
    }

    #[must_use]
    pub const fn page_number(&self) -> Option<u32> {
        match self {
            Self::Paged { page, .. } => Some(*page),
            Self::Unpaged => None,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        match self {
            Self::Paged { size, .. } => Some(*size),
            Self::Unpaged => None,
        }
    }

    /// Rows skipped before this page; saturates instead of overflowing.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        match self {
            Self::Paged { page, size } => (*page as u64).saturating_mul(*size as u64),
            Self::Unpaged => 0,
        }
    }

    /// The request for the following page, if this one is paged.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Paged { page, size } => match page.checked_add(1) {
                Some(page) => Some(Self::Paged { page, size: *size }),
                None => None,
            },
            Self::Unpaged => None,
        }
    }
}
