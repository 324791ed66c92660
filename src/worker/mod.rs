//! Background worker for the local trending store.
//!
//! File I/O runs on a Zellij worker thread so the plugin thread never blocks
//! on disk. Messages are JSON and carry trace context so worker spans nest
//! under the plugin span that sent them.
//!
//! - `messages`: Request/response protocol
//! - `handler`: Message processing against a [`TrendingStorage`](crate::storage::TrendingStorage)

pub mod handler;
pub mod messages;

pub use handler::{init_worker_tracing, TrendingWorker, TRENDING_FILE};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Message name used for plugin/worker traffic.
pub const WORKER_MESSAGE_NAME: &str = "cinescout";
