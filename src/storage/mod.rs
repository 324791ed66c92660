//! Local trending store.
//!
//! Used when the trending backend is `local`: search counts live in a JSON
//! file under the plugin data directory and are read and written only by the
//! worker thread.
//!
//! # Modules
//!
//! - `backend`: Storage trait
//! - `json`: JSON file implementation
//! - `ranking`: Trending order (count, then recency)
//! - `models`: Persisted record types

pub mod backend;
pub mod json;
pub mod models;
pub mod ranking;

pub use backend::TrendingStorage;
pub use json::JsonStorage;
pub use models::{MovieSnapshot, SearchRecord};
pub use ranking::top_records;
