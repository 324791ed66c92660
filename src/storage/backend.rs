//! Storage backend abstraction for the local trending store.
//!
//! The trait covers exactly the two things the worker does with trending
//! data: read the top of the list and count one more search. Anything richer
//! (history browsing, deletes) is out of scope for the plugin.

use crate::domain::{Result, TrendingEntry};
use crate::storage::models::MovieSnapshot;

/// Persistent store of search counts.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use cinescout::storage::{JsonStorage, TrendingStorage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/trending.json"))?;
/// let top = storage.list_trending(5)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TrendingStorage: Send {
    /// Returns up to `limit` entries, best first, with ranks assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_trending(&self, limit: usize) -> Result<Vec<TrendingEntry>>;

    /// Counts one search of `search_term` that resolved to `movie`.
    ///
    /// Creates the record with count 1 if the pair is new, otherwise
    /// increments it and refreshes the movie snapshot. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The in-memory count may already
    /// be incremented in that case; it is persisted with the next write.
    fn record_search(&mut self, search_term: &str, movie: &MovieSnapshot, now: i64) -> Result<u64>;
}
