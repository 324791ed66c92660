//! Worker thread message types for cross-thread communication.
//!
//! Request and response protocol between the plugin thread and the worker
//! that owns the local trending store, plus trace context propagation across
//! the thread boundary.

use crate::domain::TrendingEntry;
use crate::storage::MovieSnapshot;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, e.g. when
    /// tracing was never initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_trending(LoadTrending { limit: usize }),
    record_search(RecordSearch { write_id: u64, search_term: String, movie: MovieSnapshot }),
}

/// Messages sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the top `limit` trending entries.
    LoadTrending {
        limit: usize,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },

    /// Count one search that resolved to `movie`.
    RecordSearch {
        /// Correlates the response with the pending write on the plugin side.
        write_id: u64,
        search_term: String,
        movie: MovieSnapshot,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by any variant.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadTrending { trace_context, .. } | Self::RecordSearch { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Trending entries, ranked.
    TrendingLoaded { entries: Vec<TrendingEntry> },

    /// The trending read failed. Logged only.
    TrendingLoadFailed { message: String },

    /// The search was counted; `count` is the new total for the pair.
    SearchRecorded { write_id: u64, count: u64 },

    /// The search could not be counted.
    SearchRecordFailed { write_id: u64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_work_without_active_tracing() {
        let message = WorkerMessage::load_trending(5);
        assert_eq!(
            message,
            WorkerMessage::LoadTrending {
                limit: 5,
                trace_context: None
            }
        );
    }

    #[test]
    fn message_without_trace_context_parses() {
        let json = r#"{"LoadTrending":{"limit":3}}"#;
        let message: WorkerMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.trace_context(), None);
    }
}
