//! Record ordering.
//!
//! Text columns use [`locale_cmp`], a three-level collation: base letters
//! with accents stripped and case folded, then accents (unaccented first),
//! then case (lowercase first), with raw code points last so the order is
//! total. The timestamp column compares instants.
//!
//! Sorting is stable in both directions. Descending reverses the comparator,
//! not the output, so records equal under the key keep their input order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::state::{SortDir, SortKey};
use crate::model::record::Record;

/// Collation-style comparison of two strings.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Compare two records under `key` in ascending order.
#[must_use]
pub fn compare_by_key(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => locale_cmp(&a.id, &b.id),
        SortKey::User => locale_cmp(&a.user, &b.user),
        SortKey::Project => locale_cmp(&a.project, &b.project),
        SortKey::Address => locale_cmp(&a.address, &b.address),
        SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortKey::Status => locale_cmp(a.status.label(), b.status.label()),
    }
}

/// Compare under `key` and `dir`.
#[must_use]
pub fn compare(a: &Record, b: &Record, key: SortKey, dir: SortDir) -> Ordering {
    let ordering = compare_by_key(a, b, key);
    match dir {
        SortDir::Asc => ordering,
        SortDir::Desc => ordering.reverse(),
    }
}

/// Stable in-place sort of record references.
pub fn sort_records(records: &mut [&Record], key: SortKey, dir: SortDir) {
    records.sort_by(|a, b| compare(a, b, key, dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Status;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, user: &str, hour: u32) -> Record {
        Record {
            id: id.to_string(),
            user: user.to_string(),
            project: "Landing Page".to_string(),
            address: "Meadow Lane Oakland".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            status: Status::Pending,
        }
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_breaks_case_ties_lowercase_first() {
        assert_eq!(locale_cmp("landing page", "Landing Page"), Ordering::Less);
        assert_eq!(locale_cmp("Landing Page", "landing page"), Ordering::Greater);
    }

    #[test]
    fn locale_cmp_orders_prefix_first() {
        assert_eq!(locale_cmp("Lane", "Lane Olivette"), Ordering::Less);
        assert_eq!(locale_cmp("#CMP809", "#CMP810"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_sorts_accented_letters_with_their_base() {
        assert_eq!(locale_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_cmp("Ångström", "Berg"), Ordering::Less);
        assert_eq!(locale_cmp("Müller", "Murphy"), Ordering::Less);
        assert_eq!(locale_cmp("Zoë", "Zoey"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_puts_unaccented_before_accented() {
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("résumé", "resume"), Ordering::Greater);
        assert_eq!(locale_cmp("Résumé", "résumé"), Ordering::Greater);
    }

    #[test]
    fn accented_users_sort_among_plain_ones() {
        let zoe = record("1", "Zoe Park", 1);
        let emile = record("2", "Émile Roux", 1);
        let drew = record("3", "Drew Cano", 1);
        let mut rows = vec![&zoe, &emile, &drew];
        sort_records(&mut rows, SortKey::User, SortDir::Asc);
        assert_eq!(ids(&rows), ["3", "2", "1"]);
    }

    #[test]
    fn timestamp_sorts_by_instant() {
        let late = record("a", "x", 20);
        let early = record("b", "x", 3);
        let mut rows = vec![&late, &early];
        sort_records(&mut rows, SortKey::Timestamp, SortDir::Asc);
        assert_eq!(ids(&rows), ["b", "a"]);
        sort_records(&mut rows, SortKey::Timestamp, SortDir::Desc);
        assert_eq!(ids(&rows), ["a", "b"]);
    }

    #[test]
    fn status_sorts_by_label() {
        let mut approved = record("a", "x", 1);
        approved.status = Status::Approved;
        let mut progress = record("b", "x", 1);
        progress.status = Status::InProgress;
        let mut complete = record("c", "x", 1);
        complete.status = Status::Complete;
        let mut rows = vec![&progress, &complete, &approved];
        sort_records(&mut rows, SortKey::Status, SortDir::Asc);
        assert_eq!(ids(&rows), ["a", "c", "b"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let a1 = record("1", "Andi Lane", 1);
        let d1 = record("2", "Drew Cano", 1);
        let a2 = record("3", "Andi Lane", 1);
        let d2 = record("4", "Drew Cano", 1);

        let mut asc = vec![&a1, &d1, &a2, &d2];
        sort_records(&mut asc, SortKey::User, SortDir::Asc);
        assert_eq!(ids(&asc), ["1", "3", "2", "4"]);

        let mut desc = vec![&a1, &d1, &a2, &d2];
        sort_records(&mut desc, SortKey::User, SortDir::Desc);
        assert_eq!(ids(&desc), ["2", "4", "1", "3"]);
    }
}
