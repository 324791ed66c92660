//! Trending entries produced by the trending store.

use serde::{Deserialize, Serialize};

/// A previously searched movie, ranked by how often it was searched.
///
/// Entries arrive already sorted by the store; `rank` is the 1-based
/// position in that order and is assigned by [`TrendingEntry::rank_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// Store-side identifier (document id or storage key).
    pub id: String,
    pub search_term: String,
    pub movie_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub count: u64,
    pub rank: usize,
}

impl TrendingEntry {
    /// Assigns ranks 1..=n in the given order.
    ///
    /// ```
    /// use cinescout::domain::TrendingEntry;
    ///
    /// let entry = |id: &str| TrendingEntry {
    ///     id: id.to_string(),
    ///     search_term: id.to_string(),
    ///     movie_id: 1,
    ///     title: id.to_string(),
    ///     poster_url: None,
    ///     count: 1,
    ///     rank: 0,
    /// };
    /// let ranked = TrendingEntry::rank_all(vec![entry("a"), entry("b")]);
    /// assert_eq!(ranked[0].rank, 1);
    /// assert_eq!(ranked[1].rank, 2);
    /// ```
    #[must_use]
    pub fn rank_all(entries: Vec<Self>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, mut entry)| {
                entry.rank = idx + 1;
                entry
            })
            .collect()
    }
}

/// Normalizes a search term for use as part of a trending key.
///
/// Trims surrounding whitespace, lowercases, and collapses inner runs of
/// whitespace so `"  The  Batman "` and `"the batman"` count together.
#[must_use]
pub fn normalize_search_term(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the storage key for a query/movie pair.
#[must_use]
pub fn trending_key(term: &str, movie_id: u64) -> String {
    format!("{}#{movie_id}", normalize_search_term(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_case_and_spacing() {
        assert_eq!(normalize_search_term("  The   BATMAN "), "the batman");
        assert_eq!(normalize_search_term(""), "");
    }

    #[test]
    fn key_includes_movie_identity() {
        assert_eq!(trending_key("Batman", 268), "batman#268");
        assert_ne!(trending_key("batman", 268), trending_key("batman", 414_906));
    }
}
