//! Domain layer for the Cinescout plugin.
//!
//! Core types independent of Zellij APIs and of the remote services' wire
//! formats.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`movie`]: Movie records returned by the catalog
//! - [`trending`]: Ranked trending entries and key normalization

pub mod error;
pub mod movie;
pub mod trending;

pub use error::{CinescoutError, Result};
pub use movie::MovieSummary;
pub use trending::{normalize_search_term, trending_key, TrendingEntry};
