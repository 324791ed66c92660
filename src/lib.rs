//! Cinescout: a Zellij plugin for discovering movies.
//!
//! Cinescout provides:
//! - Debounced, as-you-type movie search against TMDB
//! - A popular-movies view when the query is empty
//! - A trending strip of the most searched movies, kept in a local JSON file
//!   (via a worker thread) or in an Appwrite collection
//! - A themed terminal UI with fuzzy match highlighting

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Debounced input                                  │
//! │  - Search orchestration, stale-response guard       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ catalog/      │   │ trending/     │   │ ui/           │
//! │ TMDB requests │   │ local/Appwrite│   │ rendering     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ net/          │   │ worker/       │──►│ storage/      │
//! │ request types │   │ JSON messages │   │ JSON file     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! The library performs no host calls. Every side effect is an
//! [`Action`] returned from [`handle_event`] and executed by the shim, so
//! the whole search flow is testable without Zellij or a network.
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/cinescout.wasm" {
//!     tmdb_api_key "eyJhbGciOi..."
//!     debounce_ms "1000"
//!     trending_backend "appwrite"
//!     appwrite_endpoint "https://cloud.appwrite.io/v1"
//!     appwrite_project_id "..."
//!     appwrite_database_id "..."
//!     appwrite_collection_id "..."
//!     theme "catppuccin-latte"
//!     trace_level "debug"
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod net;
pub mod storage;
pub mod trending;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{CinescoutError, MovieSummary, Result, TrendingEntry};
pub use ui::Theme;

use catalog::{MovieCatalog, DEFAULT_BASE_URL};
use std::collections::BTreeMap;
use std::time::Duration;
use trending::{AppwriteClient, TrendingBackend, TrendingStore, DEFAULT_TRENDING_LIMIT};

/// Default base URL for poster images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Where trending counts are kept, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrendingBackendConfig {
    /// JSON file in the plugin data directory.
    #[default]
    Local,

    /// Appwrite collection.
    Appwrite {
        endpoint: String,
        project_id: String,
        database_id: String,
        collection_id: String,
        api_key: Option<String>,
    },
}

/// Plugin configuration, parsed and validated once at load.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB API read access token. Required.
    pub tmdb_api_key: String,

    pub tmdb_base_url: String,

    /// Prefix for poster paths when snapshotting movies into the trending
    /// store.
    pub image_base_url: String,

    /// Quiet period before a typed query is searched.
    pub debounce: Duration,

    pub trending_backend: TrendingBackendConfig,

    /// Number of trending entries shown.
    pub trending_limit: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file, `~` already mapped to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            tmdb_base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            trending_backend: TrendingBackendConfig::Local,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("image_base_url", &self.image_base_url)
            .field("debounce", &self.debounce)
            .field("trending_limit", &self.trending_limit)
            .field("theme_name", &self.theme_name)
            .field("theme_file", &self.theme_file)
            .field("trace_level", &self.trace_level)
            .finish_non_exhaustive()
    }
}

fn non_empty(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn required(config: &BTreeMap<String, String>, key: &str, context: &str) -> Result<String> {
    non_empty(config, key).ok_or_else(|| CinescoutError::Config(format!("{key} is required{context}")))
}

fn parse_number<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> Result<T> {
    non_empty(config, key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| CinescoutError::Config(format!("{key} must be a whole number, got {raw:?}")))
    })
}

impl Config {
    /// Parses and validates Zellij's plugin configuration map.
    ///
    /// # Errors
    ///
    /// Returns [`CinescoutError::Config`] when `tmdb_api_key` is missing,
    /// a numeric option does not parse, `trending_limit` is zero,
    /// `trending_backend` is unknown, or the Appwrite backend is selected
    /// without its endpoint, project, database, and collection.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use cinescout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("tmdb_api_key".to_string(), "token".to_string());
    /// map.insert("debounce_ms".to_string(), "500".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.debounce, Duration::from_millis(500));
    ///
    /// assert!(Config::from_zellij(&BTreeMap::new()).is_err());
    /// # Ok::<(), cinescout::CinescoutError>(())
    /// ```
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        let tmdb_api_key = required(config, "tmdb_api_key", "")?;

        let trending_limit = parse_number(config, "trending_limit", DEFAULT_TRENDING_LIMIT)?;
        if trending_limit == 0 {
            return Err(CinescoutError::Config("trending_limit must be at least 1".to_string()));
        }

        let trending_backend = match non_empty(config, "trending_backend").as_deref() {
            None | Some("local") => TrendingBackendConfig::Local,
            Some("appwrite") => {
                let context = " when trending_backend is appwrite";
                TrendingBackendConfig::Appwrite {
                    endpoint: required(config, "appwrite_endpoint", context)?,
                    project_id: required(config, "appwrite_project_id", context)?,
                    database_id: required(config, "appwrite_database_id", context)?,
                    collection_id: required(config, "appwrite_collection_id", context)?,
                    api_key: non_empty(config, "appwrite_api_key"),
                }
            }
            Some(other) => {
                return Err(CinescoutError::Config(format!(
                    "trending_backend must be \"local\" or \"appwrite\", got {other:?}"
                )))
            }
        };

        Ok(Self {
            tmdb_api_key,
            tmdb_base_url: non_empty(config, "tmdb_base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            image_base_url: non_empty(config, "image_base_url")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            debounce: Duration::from_millis(parse_number(config, "debounce_ms", DEFAULT_DEBOUNCE_MS)?),
            trending_backend,
            trending_limit,
            theme_name: non_empty(config, "theme"),
            theme_file: non_empty(config, "theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: non_empty(config, "trace_level"),
        })
    }

    fn trending_store(&self) -> TrendingStore {
        let backend = match &self.trending_backend {
            TrendingBackendConfig::Local => TrendingBackend::Local,
            TrendingBackendConfig::Appwrite {
                endpoint,
                project_id,
                database_id,
                collection_id,
                api_key,
            } => TrendingBackend::Appwrite(AppwriteClient::new(
                endpoint.as_str(),
                project_id.as_str(),
                database_id.as_str(),
                collection_id.as_str(),
                api_key.clone(),
            )),
        };
        TrendingStore::new(backend, self.trending_limit)
    }

    /// Resolves the theme: file, then built-in name, then the default.
    ///
    /// A theme that fails to load falls back to the default with a warning;
    /// a bad theme never prevents startup.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "theme file unusable, using default"),
            }
        } else if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

/// Builds the application state for a validated configuration.
///
/// Nothing is requested yet; the first searches start on
/// [`Event::Mounted`].
///
/// ```rust
/// use cinescout::{initialize, Config};
///
/// let config = Config {
///     tmdb_api_key: "token".to_string(),
///     ..Config::default()
/// };
/// let state = initialize(&config);
/// assert_eq!(state.search.effective_query, "");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(?config, "initializing cinescout plugin");

    AppState::new(
        MovieCatalog::new(config.tmdb_base_url.as_str(), config.tmdb_api_key.as_str()),
        config.trending_store(),
        config.image_base_url.as_str(),
        config.debounce,
        config.theme(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = Config::from_zellij(&map(&[("debounce_ms", "300")])).unwrap_err();
        assert!(matches!(err, CinescoutError::Config(ref m) if m.contains("tmdb_api_key")));

        assert!(Config::from_zellij(&map(&[("tmdb_api_key", "   ")])).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_zellij(&map(&[("tmdb_api_key", "k")])).unwrap();
        assert_eq!(config.tmdb_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert_eq!(config.trending_backend, TrendingBackendConfig::Local);
        assert_eq!(config.trending_limit, DEFAULT_TRENDING_LIMIT);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(Config::from_zellij(&map(&[("tmdb_api_key", "k"), ("debounce_ms", "fast")])).is_err());
        assert!(Config::from_zellij(&map(&[("tmdb_api_key", "k"), ("trending_limit", "0")])).is_err());
    }

    #[test]
    fn appwrite_backend_requires_its_settings() {
        let partial = map(&[
            ("tmdb_api_key", "k"),
            ("trending_backend", "appwrite"),
            ("appwrite_endpoint", "https://aw.test/v1"),
        ]);
        let err = Config::from_zellij(&partial).unwrap_err();
        assert!(matches!(err, CinescoutError::Config(ref m) if m.contains("appwrite_project_id")));

        let full = map(&[
            ("tmdb_api_key", "k"),
            ("trending_backend", "appwrite"),
            ("appwrite_endpoint", "https://aw.test/v1"),
            ("appwrite_project_id", "p"),
            ("appwrite_database_id", "d"),
            ("appwrite_collection_id", "c"),
        ]);
        let config = Config::from_zellij(&full).unwrap();
        assert!(matches!(
            config.trending_backend,
            TrendingBackendConfig::Appwrite { api_key: None, .. }
        ));
        assert!(matches!(
            config.trending_store().backend(),
            TrendingBackend::Appwrite(_)
        ));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Config::from_zellij(&map(&[("tmdb_api_key", "k"), ("trending_backend", "redis")])).is_err());
    }

    #[test]
    fn theme_file_tilde_is_mapped_to_host() {
        let config = Config::from_zellij(&map(&[("tmdb_api_key", "k"), ("theme_file", "~/t.toml")])).unwrap();
        assert_eq!(config.theme_file.as_deref(), Some("/host/t.toml"));
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let mut config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "catppuccin-latte");

        config.theme_name = Some("nope".to_string());
        assert_eq!(config.theme(), Theme::default());

        config.theme_file = Some("/nonexistent/theme.toml".to_string());
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let config = Config {
            tmdb_api_key: "secret-token".to_string(),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
