//! ``src/model/view_state.rs``
//! ============================================================================
//! # ViewState: the user-controlled parameters of a mounted view
//!
//! Search terms, sort key and page position. The engine is the only writer
//! so that the page-index invariant is re-established after every change;
//! everything else reads it through accessors.

use std::num::NonZeroUsize;

use crate::engine::{filter::SearchQuery, page::PageIndex, sort::SortKey};

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(20).unwrap();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) search: SearchQuery,
    pub(crate) sort: SortKey,
    pub(crate) page_index: PageIndex,
    pub(crate) page_size: NonZeroUsize,
}

impl ViewState {
    #[must_use]
    pub fn new(page_size: NonZeroUsize, sort: SortKey) -> Self {
        Self {
            search: SearchQuery::default(),
            sort,
            page_index: PageIndex::FIRST,
            page_size,
        }
    }

    #[must_use]
    pub const fn search(&self) -> &SearchQuery {
        &self.search
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn page_index(&self) -> PageIndex {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, SortKey::default())
    }
}
