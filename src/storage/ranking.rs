//! Ordering for the local trending list.
//!
//! Most-searched first. Ties go to the pair searched most recently, then to
//! the storage key so the order is total and stable across runs.

use super::models::SearchRecord;
use std::cmp::Ordering;

/// Compares two keyed records in trending order.
#[must_use]
pub fn compare(a: (&str, &SearchRecord), b: (&str, &SearchRecord)) -> Ordering {
    let (key_a, rec_a) = a;
    let (key_b, rec_b) = b;

    rec_b
        .count
        .cmp(&rec_a.count)
        .then_with(|| rec_b.last_searched.cmp(&rec_a.last_searched))
        .then_with(|| key_a.cmp(key_b))
}

/// Returns the `limit` highest-ranked records, best first.
///
/// ```
/// use cinescout::storage::{top_records, MovieSnapshot, SearchRecord};
///
/// let movie = |id| MovieSnapshot { movie_id: id, title: String::new(), poster_url: None };
/// let mut popular = SearchRecord::first("a", &movie(1), 10);
/// popular.count = 5;
/// let quiet = SearchRecord::first("b", &movie(2), 20);
///
/// let records = vec![("b#2".to_string(), quiet), ("a#1".to_string(), popular)];
/// let top = top_records(records.iter().map(|(k, r)| (k.as_str(), r)), 1);
/// assert_eq!(top[0].0, "a#1");
/// ```
pub fn top_records<'a, I>(records: I, limit: usize) -> Vec<(&'a str, &'a SearchRecord)>
where
    I: IntoIterator<Item = (&'a str, &'a SearchRecord)>,
{
    let mut sorted: Vec<_> = records.into_iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::MovieSnapshot;
    use proptest::prelude::*;

    fn record(count: u64, last_searched: i64) -> SearchRecord {
        let movie = MovieSnapshot {
            movie_id: 1,
            title: "t".to_string(),
            poster_url: None,
        };
        let mut record = SearchRecord::first("t", &movie, last_searched);
        record.count = count;
        record
    }

    #[test]
    fn higher_count_wins() {
        let low = record(1, 100);
        let high = record(3, 1);
        assert_eq!(compare(("a", &high), ("b", &low)), Ordering::Less);
    }

    #[test]
    fn recency_breaks_count_ties() {
        let older = record(2, 100);
        let newer = record(2, 200);
        let top = top_records([("a", &older), ("b", &newer)], 2);
        assert_eq!(top.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn limit_zero_is_empty() {
        let r = record(1, 1);
        assert!(top_records([("a", &r)], 0).is_empty());
    }

    proptest! {
        #[test]
        fn output_is_bounded_and_non_increasing(
            counts in proptest::collection::vec((0u64..50, 0i64..1000), 0..40),
            limit in 0usize..20,
        ) {
            let keyed: Vec<(String, SearchRecord)> = counts
                .iter()
                .enumerate()
                .map(|(i, (count, ts))| (format!("k{i}"), record(*count, *ts)))
                .collect();

            let top = top_records(keyed.iter().map(|(k, r)| (k.as_str(), r)), limit);

            prop_assert!(top.len() <= limit);
            prop_assert!(top.len() <= keyed.len());
            for pair in top.windows(2) {
                prop_assert!(pair[0].1.count >= pair[1].1.count);
            }
        }
    }
}
