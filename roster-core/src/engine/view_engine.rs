//! ``src/engine/view_engine.rs``
//! ============================================================================
//! # ViewEngine: dataset → filtered → sorted → paged
//!
//! Owns the dataset handle and the `ViewState`, and keeps two derived
//! sequences of positions into the dataset:
//!
//! - `filtered`: Filter Stage output, always in dataset order
//! - `ordered`: `filtered` after the Sort Stage
//!
//! Every mutation recomputes what it invalidates before returning:
//!
//! | change              | filter | sort | page index        |
//! |---------------------|--------|------|-------------------|
//! | search text / field | yes    | yes  | reset to 1        |
//! | sort field / dir    | no     | yes  | kept (re-clamped) |
//! | prev / next / jump  | no     | no   | bounded           |
//!
//! Sorting always starts from `filtered` so ties keep dataset order no
//! matter how many times the direction was toggled.

use std::num::NonZeroUsize;

use tracing::{debug, instrument, trace};

use crate::{
    engine::{
        filter::{self, SearchQuery},
        page::{self, PageIndex},
        sort::{self, SortDirection, SortKey},
    },
    model::{
        dataset::Dataset,
        record::{Record, RecordField},
        view_state::ViewState,
    },
};

/// Whether the current filter left anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Rows,
    Empty,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Record>,
    pub page_index: PageIndex,
    pub total_pages: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub filtered_count: usize,
    pub total_count: usize,
    pub sort: SortKey,
    pub mode: DisplayMode,
}

#[derive(Debug, Clone)]
pub struct ViewEngine {
    dataset: Dataset,
    defaults: ViewState,
    state: ViewState,
    filtered: Vec<usize>,
    ordered: Vec<usize>,
}

impl ViewEngine {
    /// Mount a view over `dataset`. `initial` is also what [`Self::reset`]
    /// returns to.
    #[must_use]
    pub fn new(dataset: Dataset, initial: ViewState) -> Self {
        let mut engine = Self {
            dataset,
            defaults: initial.clone(),
            state: initial,
            filtered: Vec::new(),
            ordered: Vec::new(),
        };
        engine.refilter();
        engine
    }

    #[must_use]
    pub fn with_page_size(dataset: Dataset, page_size: NonZeroUsize) -> Self {
        Self::new(dataset, ViewState::new(page_size, SortKey::default()))
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        page::total_pages(self.filtered.len(), self.state.page_size)
    }

    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.state.page_index.is_first()
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.state.page_index.get() == self.total_pages()
    }

    /* ----------------------------- search ----------------------------- */

    /// Set the search text for one field. Resets to page 1 when it changes.
    pub fn set_search(&mut self, field: RecordField, text: &str) -> bool {
        let changed = self.state.search.set(field, text);
        if changed {
            debug!(%field, text, "Search text changed");
            self.refilter();
        }
        changed
    }

    /// One search text applied to several fields (any may match).
    pub fn set_quick_search(&mut self, fields: &[RecordField], text: &str) -> bool {
        let changed = self.state.search.set_quick(fields, text);
        if changed {
            debug!(?fields, text, "Quick search changed");
            self.refilter();
        }
        changed
    }

    /// Retarget the text typed for `from` to `to`. A field change always
    /// returns to page 1, even when no text moves.
    pub fn change_search_field(&mut self, from: RecordField, to: RecordField) -> bool {
        if from == to {
            return false;
        }
        let text = self.state.search.get(from).to_owned();
        self.state.search.set(from, "");
        self.state.search.set(to, &text);
        debug!(%from, %to, "Search field changed");
        self.refilter();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        let changed = self.state.search.clear();
        if changed {
            debug!("Search cleared");
            self.refilter();
        }
        changed
    }

    #[must_use]
    pub const fn search(&self) -> &SearchQuery {
        &self.state.search
    }

    /* ------------------------------ sort ------------------------------ */

    pub fn set_sort(&mut self, key: SortKey) -> bool {
        if self.state.sort == key {
            return false;
        }
        debug!(field = %key.field, direction = %key.direction, "Sort changed");
        self.state.sort = key;
        self.resort();
        true
    }

    pub fn toggle_sort_direction(&mut self) -> SortDirection {
        let key = SortKey::new(self.state.sort.field, self.state.sort.direction.toggled());
        self.set_sort(key);
        key.direction
    }

    pub fn set_sort_field(&mut self, field: RecordField) -> bool {
        self.set_sort(SortKey::new(field, self.state.sort.direction))
    }

    /* ------------------------------ page ------------------------------ */

    /// No-op on the last page. Returns whether the page moved.
    pub fn next_page(&mut self) -> bool {
        if self.is_last_page() {
            trace!("Next ignored on last page");
            return false;
        }
        self.state.page_index = PageIndex::new(self.state.page_index.get() + 1);
        true
    }

    /// No-op on page 1. Returns whether the page moved.
    pub fn prev_page(&mut self) -> bool {
        if self.is_first_page() {
            trace!("Previous ignored on first page");
            return false;
        }
        self.state.page_index = PageIndex::new(self.state.page_index.get() - 1);
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let target = PageIndex::new(page).clamp_to(self.total_pages());
        let moved = target != self.state.page_index;
        self.state.page_index = target;
        moved
    }

    /* ----------------------------- output ----------------------------- */

    #[must_use]
    pub fn view(&self) -> PageView<'_> {
        let records = self.dataset.records();
        let rows: Vec<&Record> = page::page(&self.ordered, self.state.page_index, self.state.page_size)
            .iter()
            .map(|&idx| &records[idx])
            .collect();

        PageView {
            rows,
            page_index: self.state.page_index,
            total_pages: self.total_pages(),
            is_first_page: self.is_first_page(),
            is_last_page: self.is_last_page(),
            filtered_count: self.filtered.len(),
            total_count: records.len(),
            sort: self.state.sort,
            mode: if self.filtered.is_empty() {
                DisplayMode::Empty
            } else {
                DisplayMode::Rows
            },
        }
    }

    /// Back to the state the view was mounted with.
    pub fn reset(&mut self) {
        debug!("View reset to defaults");
        self.state = self.defaults.clone();
        self.refilter();
    }

    /* --------------------------- recompute ---------------------------- */

    #[instrument(level = "debug", skip(self), fields(total = self.dataset.len()))]
    fn refilter(&mut self) {
        self.filtered = filter::matching_positions(self.dataset.records(), &self.state.search);
        self.state.page_index = PageIndex::FIRST;
        self.resort();
    }

    fn resort(&mut self) {
        self.ordered = sort::sort_positions(self.dataset.records(), &self.filtered, self.state.sort);
        self.state.page_index = self.state.page_index.clamp_to(self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::RecordId;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// `count` records whose first names sort in id order.
    fn numbered(count: usize) -> Dataset {
        let records = (1..=count)
            .map(|i| {
                Record::new(
                    i as i64,
                    &format!("user{i:04}"),
                    "Doe",
                    if i % 2 == 0 { "Female" } else { "Male" },
                    &format!("user{i}@mail{}.com", i % 7),
                    if i % 333 == 0 { "Astronaut" } else { "Analyst" },
                )
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    fn ids(view: &PageView<'_>) -> Vec<i64> {
        view.rows
            .iter()
            .map(|r| match r.id {
                RecordId::Int(n) => n,
                RecordId::Text(_) => -1,
            })
            .collect()
    }

    #[test]
    fn test_forty_five_records_three_pages() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));

        let view = engine.view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(ids(&view), (1..=20).collect::<Vec<_>>());
        assert!(view.is_first_page);
        assert!(!engine.prev_page());

        assert!(engine.next_page());
        assert!(engine.next_page());
        let view = engine.view();
        assert_eq!(view.page_index.get(), 3);
        assert_eq!(ids(&view), vec![41, 42, 43, 44, 45]);
        assert!(view.is_last_page);
        assert!(!engine.next_page());
        assert_eq!(engine.state().page_index().get(), 3);
    }

    #[test]
    fn test_search_resets_page() {
        let mut engine = ViewEngine::with_page_size(numbered(1000), size(20));
        engine.go_to_page(5);
        assert_eq!(engine.state().page_index().get(), 5);

        // user10, user100..=user109, user1000
        engine.set_search(RecordField::Email, "user10");
        let view = engine.view();
        assert_eq!(view.filtered_count, 12);
        assert_eq!(view.page_index.get(), 1);

        engine.set_search(RecordField::Email, "user100");
        let view = engine.view();
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_search_matching_three_of_thousand() {
        let mut engine = ViewEngine::with_page_size(numbered(1000), size(20));
        engine.go_to_page(5);
        assert_eq!(engine.total_pages(), 50);

        engine.set_search(RecordField::JobTitle, "ASTRO");
        let view = engine.view();
        assert_eq!(ids(&view), vec![333, 666, 999]);
        assert_eq!(view.page_index.get(), 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.is_first_page && view.is_last_page);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.next_page();
        assert_eq!(engine.toggle_sort_direction(), SortDirection::Descending);

        let view = engine.view();
        assert_eq!(view.page_index.get(), 2);
        assert_eq!(ids(&view), (6..=25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_no_match_is_empty_mode() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.next_page();
        engine.set_search(RecordField::Email, "nobody@nowhere");

        let view = engine.view();
        assert_eq!(view.mode, DisplayMode::Empty);
        assert_eq!(view.total_pages, 1);
        assert!(view.rows.is_empty());
        assert!(view.is_first_page && view.is_last_page);
        assert!(!engine.next_page());
        assert!(!engine.prev_page());
    }

    #[test]
    fn test_or_across_fields() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.set_search(RecordField::Email, "user7@");
        engine.set_search(RecordField::Gender, "female");

        // 22 even ids plus user7 (odd)
        assert_eq!(engine.filtered_count(), 23);
    }

    #[test]
    fn test_change_search_field_moves_text() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.set_search(RecordField::Email, "female");
        assert_eq!(engine.filtered_count(), 0);

        engine.change_search_field(RecordField::Email, RecordField::Gender);
        assert_eq!(engine.search().get(RecordField::Email), "");
        assert_eq!(engine.filtered_count(), 22);
    }

    #[test]
    fn test_change_empty_search_field_resets_page() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.go_to_page(3);
        assert_eq!(engine.state().page_index().get(), 3);

        assert!(engine.change_search_field(RecordField::Email, RecordField::LastName));
        assert_eq!(engine.state().page_index().get(), 1);
        assert_eq!(engine.filtered_count(), 45);
        assert!(!engine.change_search_field(RecordField::Gender, RecordField::Gender));
    }

    #[test]
    fn test_jumps_and_clamping() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        assert!(engine.last_page());
        assert_eq!(engine.state().page_index().get(), 3);
        assert!(!engine.go_to_page(99));
        assert!(engine.first_page());
        assert!(!engine.go_to_page(0));
        assert_eq!(engine.state().page_index().get(), 1);
    }

    #[test]
    fn test_reset_restores_mount_state() {
        let mut engine = ViewEngine::with_page_size(numbered(45), size(20));
        engine.set_search(RecordField::Gender, "male");
        engine.toggle_sort_direction();
        engine.next_page();

        engine.reset();
        assert_eq!(engine.state(), &ViewState::new(size(20), SortKey::default()));
        assert_eq!(engine.filtered_count(), 45);
    }

    #[test]
    fn test_empty_dataset() {
        let engine = ViewEngine::with_page_size(Dataset::new(Vec::new()).unwrap(), size(20));
        let view = engine.view();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.mode, DisplayMode::Empty);
    }

    #[test]
    fn test_ties_follow_dataset_order_after_toggles() {
        let records = vec![
            Record::new(1, "Sam", "", "", "", ""),
            Record::new(2, "Ann", "", "", "", ""),
            Record::new(3, "Sam", "", "", "", ""),
        ];
        let mut engine =
            ViewEngine::with_page_size(Dataset::new(records).unwrap(), size(20));
        engine.toggle_sort_direction();
        engine.toggle_sort_direction();
        engine.toggle_sort_direction();

        assert_eq!(ids(&engine.view()), vec![1, 3, 2]);
    }
}
