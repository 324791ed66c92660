//! Trending store: read the most-searched movies, count new searches.
//!
//! Two backends share one interface. `Local` keeps counts in a JSON file
//! owned by the worker thread; `Appwrite` keeps them in a remote document
//! collection reached through host web requests. Either way the store only
//! produces [`Action`]s; responses come back as events and are decoded by
//! the handler.

pub mod appwrite;

pub use appwrite::AppwriteClient;

use crate::app::Action;
use crate::storage::MovieSnapshot;
use crate::worker::WorkerMessage;

/// Default number of trending entries shown.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Where trending counts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrendingBackend {
    /// JSON file in the plugin data directory, via the worker.
    Local,
    /// Remote Appwrite collection.
    Appwrite(AppwriteClient),
}

/// Trending store handle held by the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingStore {
    backend: TrendingBackend,
    limit: usize,
}

impl TrendingStore {
    #[must_use]
    pub const fn new(backend: TrendingBackend, limit: usize) -> Self {
        Self { backend, limit }
    }

    #[must_use]
    pub const fn backend(&self) -> &TrendingBackend {
        &self.backend
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Action that starts a trending read.
    #[must_use]
    pub fn list_action(&self) -> Action {
        match &self.backend {
            TrendingBackend::Local => Action::PostToWorker(WorkerMessage::load_trending(self.limit)),
            TrendingBackend::Appwrite(client) => Action::WebRequest(client.list_request(self.limit)),
        }
    }

    /// Action that starts counting one search.
    ///
    /// For `Appwrite` this is only the lookup step; the handler issues the
    /// upsert once the current count is known.
    #[must_use]
    pub fn record_action(&self, write_id: u64, search_term: &str, movie: &MovieSnapshot) -> Action {
        match &self.backend {
            TrendingBackend::Local => Action::PostToWorker(WorkerMessage::record_search(
                write_id,
                search_term.to_string(),
                movie.clone(),
            )),
            TrendingBackend::Appwrite(client) => {
                Action::WebRequest(client.lookup_request(write_id, search_term, movie.movie_id))
            }
        }
    }
}
