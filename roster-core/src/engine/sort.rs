//! ``src/engine/sort.rs``
//! ============================================================================
//! # Sort Stage
//!
//! Orders rows by one field using a collation close to what a browser's
//! `localeCompare` gives for Latin text:
//!
//! 1. primary: letters compared caseless with common accents folded
//!    (`é` sorts with `e`),
//! 2. secondary: unaccented before accented,
//! 3. tertiary: lowercase before uppercase,
//! 4. finally raw code points, so only identical strings compare equal.
//!
//! Sorting is stable in both directions: equal keys keep their input order.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::record::{Record, RecordField, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,

    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Toggle button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "A-Z",
            Self::Descending => "Z-A",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub const fn new(field: RecordField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    #[must_use]
    pub const fn ascending(field: RecordField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    #[must_use]
    pub const fn descending(field: RecordField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::ascending(RecordField::FirstName)
    }
}

/// Base letter for the accented Latin-1 / Latin Extended-A letters that
/// show up in names. Anything else maps to itself.
const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Locale-style string comparison used by the Sort Stage.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    lowered(a)
        .map(fold_accent)
        .cmp(lowered(b).map(fold_accent))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

/// Lowercase first at the first position where only case differs.
fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Total order over ids: integers first in numeric order, then text ids
/// by [`collate`].
#[must_use]
pub fn compare_ids(a: &RecordId, b: &RecordId) -> Ordering {
    match (a, b) {
        (RecordId::Int(x), RecordId::Int(y)) => x.cmp(y),
        (RecordId::Int(_), RecordId::Text(_)) => Ordering::Less,
        (RecordId::Text(_), RecordId::Int(_)) => Ordering::Greater,
        (RecordId::Text(x), RecordId::Text(y)) => collate(x, y),
    }
}

/// Ascending comparison of two records on `field`.
#[must_use]
pub fn compare_field(a: &Record, b: &Record, field: RecordField) -> Ordering {
    match field {
        RecordField::Id => compare_ids(&a.id, &b.id),
        _ => collate(&a.field(field), &b.field(field)),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// New vector ordered by `key`; `rows` is left untouched.
#[must_use]
pub fn sort<'a>(rows: &[&'a Record], key: SortKey) -> Vec<&'a Record> {
    let mut sorted = rows.to_vec();
    // `sort_by` is stable, so ties keep input order in either direction.
    sorted.sort_by(|a, b| directed(compare_field(a, b, key.field), key.direction));
    sorted
}

/// Same as [`sort`] but over positions into `records`.
#[must_use]
pub fn sort_positions(records: &[Record], positions: &[usize], key: SortKey) -> Vec<usize> {
    let mut sorted = positions.to_vec();
    sorted.sort_by(|&a, &b| {
        directed(
            compare_field(&records[a], &records[b], key.field),
            key.direction,
        )
    });

    trace!(rows = sorted.len(), field = %key.field, direction = %key.direction, "Sort stage");
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(id: i64, first: &str) -> Record {
        Record::new(id, first, "", "", "", "")
    }

    fn firsts(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.first_name.to_string()).collect()
    }

    #[test]
    fn test_collate_is_caseless_first() {
        assert_eq!(collate("bob", "Alice"), Ordering::Greater);
        assert_eq!(collate("alice", "Bob"), Ordering::Less);
        assert_eq!(collate("ann", "Ann"), Ordering::Less);
        assert_eq!(collate("Ann", "Ann"), Ordering::Equal);
    }

    #[test]
    fn test_collate_folds_accents() {
        assert_eq!(collate("Élodie", "Emlyn"), Ordering::Less);
        assert_eq!(collate("Élodie", "Dorian"), Ordering::Greater);
        assert_eq!(collate("Elodie", "Élodie"), Ordering::Less);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let data = [named(1, "cara"), named(2, "Abe"), named(3, "bo")];
        let rows: Vec<&Record> = data.iter().collect();

        assert_eq!(
            firsts(&sort(&rows, SortKey::ascending(RecordField::FirstName))),
            ["Abe", "bo", "cara"]
        );
        assert_eq!(
            firsts(&sort(&rows, SortKey::descending(RecordField::FirstName))),
            ["cara", "bo", "Abe"]
        );
        // input untouched
        assert_eq!(firsts(&rows), ["cara", "Abe", "bo"]);
    }

    #[test]
    fn test_ties_keep_input_order_both_ways() {
        let data = [named(1, "Sam"), named(2, "Ann"), named(3, "Sam"), named(4, "Sam")];
        let rows: Vec<&Record> = data.iter().collect();

        let asc = sort(&rows, SortKey::ascending(RecordField::FirstName));
        let asc_ids: Vec<_> = asc.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(asc_ids, ["2", "1", "3", "4"]);

        let desc = sort(&rows, SortKey::descending(RecordField::FirstName));
        let desc_ids: Vec<_> = desc.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(desc_ids, ["1", "3", "4", "2"]);
    }

    #[test]
    fn test_integer_ids_sort_numerically() {
        let data = [named(10, ""), named(9, ""), named(100, "")];
        let rows: Vec<&Record> = data.iter().collect();
        let sorted = sort(&rows, SortKey::ascending(RecordField::Id));
        let ids: Vec<_> = sorted.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["9", "10", "100"]);
    }

    #[test]
    fn test_mixed_ids_sort_ints_then_text() {
        let data = [
            named(10, ""),
            Record::new("10a", "", "", "", "", ""),
            named(9, ""),
            Record::new("b7", "", "", "", "", ""),
            Record::new("A7", "", "", "", "", ""),
        ];
        let rows: Vec<&Record> = data.iter().collect();

        let asc = sort(&rows, SortKey::ascending(RecordField::Id));
        let asc_ids: Vec<_> = asc.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(asc_ids, ["9", "10", "10a", "A7", "b7"]);

        let desc = sort(&rows, SortKey::descending(RecordField::Id));
        let desc_ids: Vec<_> = desc.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(desc_ids, ["b7", "A7", "10a", "10", "9"]);
    }

    #[test]
    fn test_sort_positions_matches_sort() {
        let data = vec![named(1, "d"), named(2, "a"), named(3, "c")];
        let key = SortKey::ascending(RecordField::FirstName);
        assert_eq!(sort_positions(&data, &[0, 1, 2], key), vec![1, 2, 0]);
        assert_eq!(sort_positions(&data, &[0, 2], key), vec![2, 0]);
    }

    #[test]
    fn test_direction_toggle_and_labels() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.label(), "Z-A");
    }

    fn mixed_id() -> impl Strategy<Value = RecordId> {
        prop_oneof![
            (-50i64..50).prop_map(RecordId::Int),
            "[0-9a-zA-Zé]{0,4}".prop_map(|s| RecordId::from(s.as_str())),
        ]
    }

    proptest! {
        #[test]
        fn prop_mixed_ids_sort_in_order(
            ids in prop::collection::vec(mixed_id(), 0..60),
            descending in any::<bool>(),
        ) {
            let data: Vec<Record> = ids
                .into_iter()
                .map(|id| Record::new(id, "", "", "", "", ""))
                .collect();
            let rows: Vec<&Record> = data.iter().collect();
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };

            let sorted = sort(&rows, SortKey::new(RecordField::Id, direction));
            prop_assert_eq!(sorted.len(), data.len());
            for pair in sorted.windows(2) {
                let ord = directed(compare_ids(&pair[0].id, &pair[1].id), direction);
                prop_assert_ne!(ord, Ordering::Greater);
            }
        }

        #[test]
        fn prop_compare_ids_is_transitive(a in mixed_id(), b in mixed_id(), c in mixed_id()) {
            let ab = compare_ids(&a, &b);
            prop_assert_eq!(compare_ids(&b, &a), ab.reverse());
            if ab != Ordering::Greater && compare_ids(&b, &c) != Ordering::Greater {
                prop_assert_ne!(compare_ids(&a, &c), Ordering::Greater);
            }
        }

        #[test]
        fn prop_opposite_directions_reverse_for_distinct_keys(
            names in prop::collection::hash_set("[a-zA-Z]{1,6}", 0..30)
        ) {
            let data: Vec<Record> = names
                .iter()
                .enumerate()
                .map(|(i, n)| named(i as i64, n))
                .collect();
            let rows: Vec<&Record> = data.iter().collect();

            let asc = sort(&sort(&rows, SortKey::descending(RecordField::FirstName)),
                SortKey::ascending(RecordField::FirstName));
            let mut desc = sort(&asc, SortKey::descending(RecordField::FirstName));
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }

        #[test]
        fn prop_sort_is_stable(
            keys in prop::collection::vec(0u8..4, 0..40),
            descending in any::<bool>(),
        ) {
            let data: Vec<Record> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| named(i as i64, &k.to_string()))
                .collect();
            let rows: Vec<&Record> = data.iter().collect();
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };

            let sorted = sort(&rows, SortKey::new(RecordField::FirstName, direction));
            for pair in sorted.windows(2) {
                if pair[0].first_name == pair[1].first_name {
                    prop_assert!(
                        matches!((&pair[0].id, &pair[1].id), (RecordId::Int(a), RecordId::Int(b)) if a < b)
                    );
                }
            }
        }
    }
}
