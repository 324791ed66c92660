//! Storage record models for the local trending store.
//!
//! These are the persisted shapes. They are converted to
//! [`TrendingEntry`](crate::domain::TrendingEntry) on the way out so the rest
//! of the crate never sees storage-only fields like `last_searched`.

use crate::domain::TrendingEntry;
use serde::{Deserialize, Serialize};

/// Snapshot of the movie a search resolved to, captured at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSnapshot {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
}

/// One counted search/movie pair.
///
/// Keyed in storage by [`trending_key`](crate::domain::trending_key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Search term as the user typed it the first time.
    pub search_term: String,

    pub movie_id: u64,

    /// Title at the most recent search.
    pub title: String,

    #[serde(default)]
    pub poster_url: Option<String>,

    /// Number of searches that resolved to this movie.
    pub count: u64,

    /// Unix timestamp of the most recent search.
    pub last_searched: i64,

    /// Unix timestamp when the pair was first recorded.
    pub created_at: i64,
}

impl SearchRecord {
    /// Creates a record for a first search. `count` starts at 1.
    ///
    /// ```
    /// use cinescout::storage::{MovieSnapshot, SearchRecord};
    ///
    /// let movie = MovieSnapshot { movie_id: 268, title: "Batman".into(), poster_url: None };
    /// let record = SearchRecord::first("batman", &movie, 1_700_000_000);
    /// assert_eq!(record.count, 1);
    /// assert_eq!(record.last_searched, record.created_at);
    /// ```
    #[must_use]
    pub fn first(search_term: impl Into<String>, movie: &MovieSnapshot, now: i64) -> Self {
        Self {
            search_term: search_term.into(),
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            poster_url: movie.poster_url.clone(),
            count: 1,
            last_searched: now,
            created_at: now,
        }
    }

    /// Converts to an unranked trending entry.
    #[must_use]
    pub fn to_entry(&self, key: &str) -> TrendingEntry {
        TrendingEntry {
            id: key.to_string(),
            search_term: self.search_term.clone(),
            movie_id: self.movie_id,
            title: self.title.clone(),
            poster_url: self.poster_url.clone(),
            count: self.count,
            rank: 0,
        }
    }
}
