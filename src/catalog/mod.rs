//! Movie catalog client (TMDB).
//!
//! Builds search/discover requests and decodes their bodies. No I/O happens
//! here; see [`crate::net`] for how requests reach the host.
//!
//! - [`client`]: endpoint selection and authenticated request construction
//! - [`response`]: body decoding into movies or a provider error

pub mod client;
pub mod response;

pub use client::{MovieCatalog, QueryMode, DEFAULT_BASE_URL};
pub use response::{decode, CatalogOutcome, PROVIDER_ERROR_FALLBACK};
