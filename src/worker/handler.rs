//! Worker-side processing of trending store messages.
//!
//! [`TrendingWorker`] owns the local store and turns a serialized
//! [`WorkerMessage`] into a serialized [`WorkerResponse`]. It never talks to
//! the host itself; the plugin binary wraps it in a `ZellijWorker` that
//! delivers payloads and posts the answers back.

use crate::domain::{CinescoutError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonStorage, MovieSnapshot, TrendingStorage};
use crate::worker::{WorkerMessage, WorkerResponse};

/// File name of the local trending store inside the data directory.
pub const TRENDING_FILE: &str = "trending.json";

/// Worker thread state.
///
/// The storage backend is opened lazily on the first message, because the
/// worker is constructed by the host before any filesystem access is granted.
#[derive(Default)]
pub struct TrendingWorker {
    storage: Option<Box<dyn TrendingStorage>>,
}

impl TrendingWorker {
    /// Creates a worker backed by an already open store.
    #[must_use]
    pub fn with_storage(storage: Box<dyn TrendingStorage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    fn storage(&mut self) -> Result<&mut Box<dyn TrendingStorage>> {
        if self.storage.is_none() {
            let path = paths::get_data_dir().join(TRENDING_FILE);
            self.storage = Some(Box::new(JsonStorage::new(path)?));
        }

        self.storage
            .as_mut()
            .ok_or_else(|| CinescoutError::Worker("storage not initialized".to_string()))
    }

    fn handle_load_trending(&mut self, limit: usize) -> WorkerResponse {
        match self.storage().and_then(|storage| storage.list_trending(limit)) {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "trending loaded from storage");
                WorkerResponse::TrendingLoaded { entries }
            }
            Err(e) => {
                tracing::warn!(error = %e, "trending load failed");
                WorkerResponse::TrendingLoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_record_search(&mut self, write_id: u64, search_term: &str, movie: &MovieSnapshot) -> WorkerResponse {
        let now = chrono::Utc::now().timestamp();

        match self
            .storage()
            .and_then(|storage| storage.record_search(search_term, movie, now))
        {
            Ok(count) => {
                tracing::debug!(write_id, count, movie_id = movie.movie_id, "search recorded");
                WorkerResponse::SearchRecorded { write_id, count }
            }
            Err(e) => {
                tracing::warn!(write_id, error = %e, "search record failed");
                WorkerResponse::SearchRecordFailed {
                    write_id,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Links spans created here to the plugin-side span that sent `message`.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadTrending { limit, .. } => self.handle_load_trending(limit),
            WorkerMessage::RecordSearch {
                write_id,
                search_term,
                movie,
                ..
            } => self.handle_record_search(write_id, &search_term, &movie),
        }
    }

    /// Processes a JSON payload and returns the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a [`WorkerMessage`] or the
    /// response cannot be serialized. There is no `write_id` to answer with in
    /// the first case, so the caller can only log it.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| CinescoutError::Worker(format!("unreadable worker message: {e}")))?;
        let response = self.handle_message(message);
        Ok(serde_json::to_string(&response)?)
    }
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Sets up tracing once per worker thread, writing to the plugin's trace file.
pub fn init_worker_tracing() {
    use std::sync::atomic::Ordering;

    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrendingEntry;
    use tempfile::TempDir;

    struct FailingStorage;

    impl TrendingStorage for FailingStorage {
        fn list_trending(&self, _limit: usize) -> Result<Vec<TrendingEntry>> {
            Err(CinescoutError::Storage("disk gone".to_string()))
        }

        fn record_search(&mut self, _term: &str, _movie: &MovieSnapshot, _now: i64) -> Result<u64> {
            Err(CinescoutError::Storage("disk gone".to_string()))
        }
    }

    fn movie() -> MovieSnapshot {
        MovieSnapshot {
            movie_id: 268,
            title: "Batman".to_string(),
            poster_url: None,
        }
    }

    fn json_worker(dir: &TempDir) -> TrendingWorker {
        let storage = JsonStorage::new(dir.path().join(TRENDING_FILE)).unwrap();
        TrendingWorker::with_storage(Box::new(storage))
    }

    #[test]
    fn record_then_load() {
        let dir = TempDir::new().unwrap();
        let mut worker = json_worker(&dir);

        let response = worker.handle_message(WorkerMessage::record_search(4, "batman".to_string(), movie()));
        assert_eq!(response, WorkerResponse::SearchRecorded { write_id: 4, count: 1 });

        let WorkerResponse::TrendingLoaded { entries } = worker.handle_message(WorkerMessage::load_trending(5)) else {
            panic!("expected trending entries");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Batman");
    }

    #[test]
    fn storage_failures_become_failure_responses() {
        let mut worker = TrendingWorker::with_storage(Box::new(FailingStorage));

        assert!(matches!(
            worker.handle_message(WorkerMessage::load_trending(5)),
            WorkerResponse::TrendingLoadFailed { .. }
        ));
        assert!(matches!(
            worker.handle_message(WorkerMessage::record_search(9, "x".to_string(), movie())),
            WorkerResponse::SearchRecordFailed { write_id: 9, .. }
        ));
    }

    #[test]
    fn payload_round_trip_through_json() {
        let dir = TempDir::new().unwrap();
        let mut worker = json_worker(&dir);

        let payload = serde_json::to_string(&WorkerMessage::load_trending(5)).unwrap();
        let response: WorkerResponse = serde_json::from_str(&worker.handle_payload(&payload).unwrap()).unwrap();
        assert_eq!(response, WorkerResponse::TrendingLoaded { entries: vec![] });
    }

    #[test]
    fn garbage_payload_is_an_error() {
        let mut worker = TrendingWorker::with_storage(Box::new(FailingStorage));
        assert!(matches!(worker.handle_payload("nope"), Err(CinescoutError::Worker(_))));
    }
}
