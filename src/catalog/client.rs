//! Request builder for the TMDB movie catalog.

use crate::net::{HttpRequest, RequestContext};

/// Default TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Which catalog endpoint a query maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Free-text search (`/search/movie`).
    Search,
    /// No filter: most popular movies (`/discover/movie`).
    DiscoverPopular,
}

impl QueryMode {
    /// An empty query means "show popular", never "search for nothing".
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self::DiscoverPopular
        } else {
            Self::Search
        }
    }
}

/// Builds authenticated catalog requests.
///
/// Holds the validated base URL and bearer token; constructed once from
/// [`Config`](crate::Config) at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct MovieCatalog {
    base_url: String,
    api_key: String,
}

impl MovieCatalog {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Returns the endpoint URL for a query.
    ///
    /// ```
    /// use cinescout::catalog::MovieCatalog;
    ///
    /// let catalog = MovieCatalog::new("https://api.themoviedb.org/3", "key");
    /// assert_eq!(
    ///     catalog.endpoint(""),
    ///     "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
    /// );
    /// assert_eq!(
    ///     catalog.endpoint("star wars"),
    ///     "https://api.themoviedb.org/3/search/movie?query=star%20wars"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint(&self, query: &str) -> String {
        match QueryMode::for_query(query) {
            QueryMode::Search => format!(
                "{}/search/movie?query={}",
                self.base_url,
                urlencoding::encode(query)
            ),
            QueryMode::DiscoverPopular => {
                format!("{}/discover/movie?sort_by=popularity.desc", self.base_url)
            }
        }
    }

    /// Builds the request for `query`, tagged with the search sequence number.
    #[must_use]
    pub fn request(&self, query: &str, seq: u64) -> HttpRequest {
        HttpRequest::get(self.endpoint(query), RequestContext::Movies { seq })
            .with_header("accept", "application/json")
            .with_header("Authorization", format!("Bearer {}", self.api_key))
    }
}

impl std::fmt::Debug for MovieCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieCatalog")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::HttpMethod;

    fn catalog() -> MovieCatalog {
        MovieCatalog::new("https://api.themoviedb.org/3/", "secret-token")
    }

    #[test]
    fn empty_query_requests_popular_not_empty_search() {
        let request = catalog().request("", 1);
        assert!(request.url.contains("/discover/movie"));
        assert!(request.url.contains("sort_by=popularity.desc"));
        assert!(!request.url.contains("/search/movie"));
    }

    #[test]
    fn search_query_is_percent_encoded() {
        let url = catalog().endpoint("fast & furious");
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/movie?query=fast%20%26%20furious"
        );
    }

    #[test]
    fn request_carries_bearer_auth_and_sequence() {
        let request = catalog().request("batman", 9);

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret-token")
        );
        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.context, RequestContext::Movies { seq: 9 });
    }

    #[test]
    fn debug_output_hides_api_key() {
        let debug = format!("{:?}", catalog());
        assert!(!debug.contains("secret-token"));
    }
}
