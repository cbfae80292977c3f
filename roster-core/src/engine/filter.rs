//! ``src/engine/filter.rs``
//! ============================================================================
//! # Filter Stage
//!
//! Case-insensitive substring search over record fields. A query holds one
//! search text per field; a term is active when its text is non-empty and
//! a record is kept when any active term matches (OR). With no active terms
//! every record passes, in input order.

use compact_str::CompactString;
use enum_map::EnumMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::model::record::{Record, RecordField};

/// Per-field search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: EnumMap<RecordField, CompactString>,
}

impl SearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text for one field. Returns true if it changed.
    pub fn set(&mut self, field: RecordField, text: &str) -> bool {
        if self.terms[field] == text {
            return false;
        }
        self.terms[field] = text.into();
        true
    }

    /// Apply the same text to several fields and clear every other field.
    /// This is the single search box that looks at more than one column.
    pub fn set_quick(&mut self, fields: &[RecordField], text: &str) -> bool {
        let mut next = Self::default();
        for field in fields {
            next.terms[*field] = text.into();
        }
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Clear all terms. Returns true if anything was active.
    pub fn clear(&mut self) -> bool {
        let changed = self.is_active();
        self.terms = EnumMap::default();
        changed
    }

    #[must_use]
    pub fn get(&self, field: RecordField) -> &str {
        &self.terms[field]
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.terms.values().any(|text| !text.is_empty())
    }

    /// Active `(field, text)` pairs in column order.
    pub fn active_terms(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.terms
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(field, text)| (field, text.as_str()))
    }

    /// Lowercase the active terms once so a pass over the dataset does not
    /// redo it for every record.
    fn compile(&self) -> SmallVec<[(RecordField, String); 4]> {
        self.active_terms()
            .map(|(field, text)| (field, text.to_lowercase()))
            .collect()
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        matches_compiled(&self.compile(), record)
    }
}

fn matches_compiled(terms: &[(RecordField, String)], record: &Record) -> bool {
    terms.is_empty()
        || terms
            .iter()
            .any(|(field, needle)| contains_folded(&record.field(*field), needle))
}

/// `needle_lower` must already be lowercased.
#[inline]
fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Records where any of `fields` contains `needle`, ignoring case.
/// An empty needle keeps everything.
pub fn filter<'a>(records: &'a [Record], fields: &[RecordField], needle: &str) -> Vec<&'a Record> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || fields
                    .iter()
                    .any(|field| contains_folded(&record.field(*field), &needle))
        })
        .collect()
}

/// Positions (into `records`) of every record matching `query`, in input
/// order.
pub fn matching_positions(records: &[Record], query: &SearchQuery) -> Vec<usize> {
    let terms = query.compile();
    let positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_compiled(&terms, record))
        .map(|(idx, _)| idx)
        .collect();

    trace!(
        active_terms = terms.len(),
        matched = positions.len(),
        total = records.len(),
        "Filter stage"
    );
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn people() -> Vec<Record> {
        vec![
            Record::new(1, "Ann", "Lee", "Female", "ann.lee@Example.com", "Editor"),
            Record::new(2, "Bob", "Stone", "Male", "bob@sample.org", "Engineer"),
            Record::new(3, "Cleo", "Marsh", "Genderfluid", "cleo@example.com", ""),
            Record::new(4, "Dee", "Nox", "Female", "dee@nox.io", "Engineer"),
        ]
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let data = people();
        let hits = filter(&data, &[RecordField::Email], "EXAMPLE");
        assert_eq!(ids(&hits), ["1", "3"]);
    }

    #[test]
    fn test_empty_needle_keeps_everything_in_order() {
        let data = people();
        let hits = filter(&data, &[RecordField::Email], "");
        assert_eq!(ids(&hits), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_any_field_matches() {
        let data = people();
        let hits = filter(&data, &[RecordField::Email, RecordField::Gender], "male");
        // "Female" and "Male" both contain "male"
        assert_eq!(ids(&hits), ["1", "2", "4"]);
    }

    #[test]
    fn test_query_or_combines_active_terms() {
        let data = people();
        let mut query = SearchQuery::new();
        query.set(RecordField::Email, "nox");
        query.set(RecordField::Gender, "fluid");

        let positions = matching_positions(&data, &query);
        assert_eq!(positions, vec![2, 3]);
    }

    #[test]
    fn test_inactive_query_matches_all() {
        let data = people();
        let mut query = SearchQuery::new();
        query.set(RecordField::Gender, "");
        assert!(!query.is_active());
        assert_eq!(matching_positions(&data, &query), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let data = people();
        let mut query = SearchQuery::new();
        query.set(RecordField::Email, "nobody@nowhere");
        assert!(matching_positions(&data, &query).is_empty());
    }

    #[test]
    fn test_set_reports_change() {
        let mut query = SearchQuery::new();
        assert!(query.set(RecordField::Email, "a"));
        assert!(!query.set(RecordField::Email, "a"));
        assert!(query.clear());
        assert!(!query.clear());
    }

    #[test]
    fn test_quick_search_replaces_other_terms() {
        let mut query = SearchQuery::new();
        query.set(RecordField::JobTitle, "editor");
        query.set_quick(&[RecordField::FirstName, RecordField::LastName], "lee");

        let active: Vec<_> = query.active_terms().collect();
        assert_eq!(
            active,
            vec![(RecordField::FirstName, "lee"), (RecordField::LastName, "lee")]
        );
    }

    #[test]
    fn test_empty_job_title_is_searchable_as_empty() {
        let data = people();
        let hits = filter(&data, &[RecordField::JobTitle], "e");
        assert!(hits.iter().all(|r| r.id.to_string() != "3"));
    }

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(("[a-zA-Z]{0,6}", "[a-zA-Z@.]{0,10}"), 0..40).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, email))| {
                    Record::new(i as i64, &name, "", "", &email, "")
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_exact(records in arb_records(), needle in "[a-zA-Z]{0,3}") {
            let hits = filter(&records, &[RecordField::Email], &needle);
            let lowered = needle.to_lowercase();

            for record in &hits {
                prop_assert!(record.email.to_lowercase().contains(&lowered));
            }
            let excluded = records
                .iter()
                .filter(|r| !hits.iter().any(|h| h.id == r.id));
            for record in excluded {
                prop_assert!(!record.email.to_lowercase().contains(&lowered));
            }
        }

        #[test]
        fn prop_empty_needle_is_identity(records in arb_records()) {
            let hits = filter(&records, &[RecordField::FirstName], "");
            prop_assert_eq!(hits.len(), records.len());
            for (hit, record) in hits.iter().zip(&records) {
                prop_assert_eq!(*hit, record);
            }
        }
    }
}
