//! ``src/engine/page.rs``
//! ============================================================================
//! # Page Stage
//!
//! Fixed-size windows over an ordered sequence. Page indices are 1-based and
//! there is always at least one page, even for an empty sequence.

use std::{fmt, num::NonZeroUsize};

/// 1-based page number. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(NonZeroUsize);

impl PageIndex {
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// `0` is treated as page 1.
    #[must_use]
    pub fn new(page: usize) -> Self {
        NonZeroUsize::new(page).map_or(Self::FIRST, Self)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Pull the index back into `[1, total_pages]`.
    #[must_use]
    pub fn clamp_to(self, total_pages: usize) -> Self {
        Self::new(self.get().min(total_pages.max(1)))
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        self.get() == 1
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `max(1, ceil(len / size))`
#[must_use]
pub const fn total_pages(len: usize, size: NonZeroUsize) -> usize {
    let pages = len.div_ceil(size.get());
    if pages == 0 { 1 } else { pages }
}

/// Rows `[(index-1)*size, index*size)` clipped to the sequence. A page past
/// the end is empty.
#[must_use]
pub fn page<T>(rows: &[T], index: PageIndex, size: NonZeroUsize) -> &[T] {
    let size = size.get();
    let start = (index.get() - 1).saturating_mul(size);
    if start >= rows.len() {
        return &rows[rows.len()..];
    }
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}
