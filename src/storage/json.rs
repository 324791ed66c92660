//! JSON file-based trending store.
//!
//! A human-readable file with atomic writes (write-to-temp + rename). The
//! whole dataset is held in memory and rewritten on every recorded search.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "searches": {
//!     "batman#268": {
//!       "search_term": "Batman",
//!       "movie_id": 268,
//!       "title": "Batman",
//!       "poster_url": "https://image.tmdb.org/t/p/w500/abc.jpg",
//!       "count": 3,
//!       "last_searched": 1700000300,
//!       "created_at": 1700000000
//!     }
//!   }
//! }
//! ```

use crate::domain::{trending_key, CinescoutError, Result, TrendingEntry};
use crate::storage::backend::TrendingStorage;
use crate::storage::models::{MovieSnapshot, SearchRecord};
use crate::storage::ranking::top_records;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Storage format version for future migrations.
    version: u32,

    /// Search records indexed by trending key.
    #[serde(default)]
    searches: HashMap<String, SearchRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            searches: HashMap::new(),
        }
    }
}

/// JSON file trending store.
///
/// `Send` but not `Sync`; owned by the worker thread.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file exists but is not valid JSON.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing trending storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no trending file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(search_count = data.searches.len(), "trending storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| CinescoutError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != FORMAT_VERSION {
            tracing::warn!(version = data.version, "unexpected trending file version");
        }

        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CinescoutError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "trending storage saved");
        Ok(())
    }
}

impl TrendingStorage for JsonStorage {
    fn list_trending(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        let _span = tracing::debug_span!("json_list_trending", limit).entered();

        let entries = top_records(
            self.data.searches.iter().map(|(key, record)| (key.as_str(), record)),
            limit,
        )
        .into_iter()
        .map(|(key, record)| record.to_entry(key))
        .collect();

        let ranked = TrendingEntry::rank_all(entries);
        tracing::debug!(count = ranked.len(), "listed trending entries");
        Ok(ranked)
    }

    fn record_search(&mut self, search_term: &str, movie: &MovieSnapshot, now: i64) -> Result<u64> {
        let key = trending_key(search_term, movie.movie_id);
        let _span = tracing::debug_span!("json_record_search", key = %key).entered();

        let previous = self.data.searches.get(&key).cloned();
        let count = match self.data.searches.get_mut(&key) {
            Some(existing) => {
                existing.count = existing.count.saturating_add(1);
                existing.last_searched = now;
                existing.title.clone_from(&movie.title);
                existing.poster_url.clone_from(&movie.poster_url);
                existing.count
            }
            None => {
                self.data
                    .searches
                    .insert(key.clone(), SearchRecord::first(search_term, movie, now));
                1
            }
        };

        self.dirty = true;
        if let Err(e) = self.save_to_file() {
            match previous {
                Some(record) => self.data.searches.insert(key, record),
                None => self.data.searches.remove(&key),
            };
            self.dirty = false;
            return Err(e);
        }

        tracing::debug!(count, "search recorded");
        Ok(count)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save trending storage on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn movie(id: u64, title: &str) -> MovieSnapshot {
        MovieSnapshot {
            movie_id: id,
            title: title.to_string(),
            poster_url: Some(format!("https://img.test/{id}.jpg")),
        }
    }

    fn open(dir: &TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("nested").join("trending.json")).unwrap()
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let storage = open(&dir);
        assert!(storage.list_trending(5).unwrap().is_empty());
    }

    #[test]
    fn first_search_creates_count_one() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);

        let count = storage.record_search("Batman", &movie(268, "Batman"), 100).unwrap();
        assert_eq!(count, 1);

        let entries = storage.list_trending(5).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].search_term, "Batman");
        assert_eq!(entries[0].movie_id, 268);
        assert_eq!(entries[0].rank, 1);
    }

    #[test]
    fn repeated_search_increments_under_normalized_key() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);

        storage.record_search("batman", &movie(268, "Batman"), 100).unwrap();
        let count = storage.record_search("  BATMAN ", &movie(268, "Batman"), 200).unwrap();

        assert_eq!(count, 2);
        let entries = storage.list_trending(5).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, 2);
    }

    #[test]
    fn same_term_different_movie_is_a_separate_pair() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);

        storage.record_search("batman", &movie(268, "Batman"), 100).unwrap();
        storage.record_search("batman", &movie(414_906, "The Batman"), 100).unwrap();

        assert_eq!(storage.list_trending(5).unwrap().len(), 2);
    }

    #[test]
    fn list_is_ranked_and_limited() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);

        for (term, id, times) in [("a", 1, 1), ("b", 2, 3), ("c", 3, 2)] {
            for ts in 0..times {
                storage.record_search(term, &movie(id, term), ts).unwrap();
            }
        }

        let entries = storage.list_trending(2).unwrap();
        let ids: Vec<u64> = entries.iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut storage = open(&dir);
            storage.record_search("dune", &movie(438_631, "Dune"), 100).unwrap();
        }

        let storage = open(&dir);
        let entries = storage.list_trending(5).unwrap();
        assert_eq!(entries[0].title, "Dune");
        assert_eq!(entries[0].count, 1);
    }

    #[test]
    fn failed_save_is_rolled_back_and_not_persisted_later() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trending.json");
        let blocker = path.with_extension("tmp");
        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.record_search("heat", &movie(949, "Heat"), 50).unwrap();

            std::fs::create_dir(&blocker).unwrap();
            assert!(storage.record_search("dune", &movie(438_631, "Dune"), 100).is_err());
            assert!(storage.record_search("heat", &movie(949, "Heat"), 100).is_err());

            let entries = storage.list_trending(5).unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].title, "Heat");
            assert_eq!(entries[0].count, 1);

            std::fs::remove_dir(&blocker).unwrap();
            storage.record_search("alien", &movie(348, "Alien"), 200).unwrap();
        }

        let storage = JsonStorage::new(path).unwrap();
        let mut titles: Vec<(String, u64)> = storage
            .list_trending(5)
            .unwrap()
            .into_iter()
            .map(|e| (e.title, e.count))
            .collect();
        titles.sort();
        assert_eq!(titles, vec![("Alien".to_string(), 1), ("Heat".to_string(), 1)]);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trending.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonStorage::new(path),
            Err(CinescoutError::Storage(_))
        ));
    }
}
