//! Appwrite document store backend for trending searches.
//!
//! Each query/movie pair is one document in a collection:
//!
//! ```json
//! {
//!   "$id": "t3f2a9c01b7e4d562",
//!   "searchTerm": "batman",
//!   "count": 3,
//!   "movie_id": 268,
//!   "poster_url": "https://image.tmdb.org/t/p/w500/abc.jpg",
//!   "title": "Batman"
//! }
//! ```
//!
//! The document id is derived from the trending key, so a write is a read of
//! that one document followed by a `PUT` upsert with the incremented count.
//! The increment is not atomic; two clients searching the same pair at the
//! same instant can lose one count.

use crate::domain::{trending_key, CinescoutError, Result, TrendingEntry};
use crate::net::{HttpRequest, RequestContext, WebResponse};
use crate::storage::MovieSnapshot;
use serde::Deserialize;

/// Upper bound Appwrite places on custom document ids.
const MAX_DOCUMENT_ID_LEN: usize = 36;

/// Connection settings for one Appwrite collection.
#[derive(Clone, PartialEq, Eq)]
pub struct AppwriteClient {
    endpoint: String,
    project_id: String,
    database_id: String,
    collection_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database_id: database_id.into(),
            collection_id: collection_id.into(),
            api_key,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint,
            urlencoding::encode(&self.database_id),
            urlencoding::encode(&self.collection_id)
        )
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(document_id))
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request
            .with_header("X-Appwrite-Project", self.project_id.clone())
            .with_header("accept", "application/json");
        match &self.api_key {
            Some(key) => request.with_header("X-Appwrite-Key", key.clone()),
            None => request,
        }
    }

    /// Request for the top `limit` documents by count.
    #[must_use]
    pub fn list_request(&self, limit: usize) -> HttpRequest {
        let order = serde_json::json!({"method": "orderDesc", "attribute": "count"});
        let limit = serde_json::json!({"method": "limit", "values": [limit]});
        let url = format!(
            "{}?queries[]={}&queries[]={}",
            self.documents_url(),
            urlencoding::encode(&order.to_string()),
            urlencoding::encode(&limit.to_string())
        );
        self.authorize(HttpRequest::get(url, RequestContext::TrendingList))
    }

    /// First step of a write: fetch the pair's document, if any.
    #[must_use]
    pub fn lookup_request(&self, write_id: u64, search_term: &str, movie_id: u64) -> HttpRequest {
        let url = self.document_url(&document_id(&trending_key(search_term, movie_id)));
        self.authorize(HttpRequest::get(url, RequestContext::TrendingLookup { write_id }))
    }

    /// Second step of a write: store the pair with `count`.
    #[must_use]
    pub fn upsert_request(&self, write_id: u64, search_term: &str, movie: &MovieSnapshot, count: u64) -> HttpRequest {
        let url = self.document_url(&document_id(&trending_key(search_term, movie.movie_id)));
        let body = serde_json::json!({
            "data": {
                "searchTerm": search_term,
                "count": count,
                "movie_id": movie.movie_id,
                "poster_url": movie.poster_url,
                "title": movie.title,
            }
        });
        self.authorize(HttpRequest::put_json(url, &body, RequestContext::TrendingUpsert { write_id }))
    }
}

impl std::fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .finish_non_exhaustive()
    }
}

/// Stable document id for a trending key.
///
/// FNV-1a over the key, rendered as hex with a leading letter because
/// Appwrite ids may not start with a special character.
///
/// ```
/// use cinescout::trending::appwrite::document_id;
///
/// let id = document_id("batman#268");
/// assert_eq!(id, document_id("batman#268"));
/// assert_ne!(id, document_id("batman#414906"));
/// assert!(id.starts_with('t'));
/// ```
#[must_use]
pub fn document_id(key: &str) -> String {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = key
        .bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME));

    let mut id = format!("t{hash:016x}");
    id.truncate(MAX_DOCUMENT_ID_LEN);
    id
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<TrendingDocument>,
}

#[derive(Debug, Deserialize)]
struct TrendingDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm", default)]
    search_term: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    movie_id: u64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default, alias = "titel")]
    title: String,
}

impl From<TrendingDocument> for TrendingEntry {
    fn from(doc: TrendingDocument) -> Self {
        Self {
            id: doc.id,
            search_term: doc.search_term,
            movie_id: doc.movie_id,
            title: doc.title,
            poster_url: doc.poster_url,
            count: doc.count,
            rank: 0,
        }
    }
}

fn transport_error(response: &WebResponse) -> CinescoutError {
    tracing::debug!(status = response.status, body = %response.body_text(), "appwrite request failed");
    CinescoutError::Transport {
        service: "trending",
        status: response.status,
    }
}

/// Decodes a list response into ranked entries, keeping the server's order.
///
/// # Errors
///
/// Returns an error for non-2xx statuses or malformed bodies.
pub fn parse_list(response: &WebResponse) -> Result<Vec<TrendingEntry>> {
    if !response.is_success() {
        return Err(transport_error(response));
    }
    let list: DocumentList = serde_json::from_slice(&response.body)?;
    Ok(TrendingEntry::rank_all(list.documents.into_iter().map(Into::into).collect()))
}

/// Decodes a lookup response into the pair's current count.
///
/// A 404 means the pair has never been recorded.
///
/// # Errors
///
/// Returns an error for other non-2xx statuses or malformed bodies.
pub fn parse_lookup(response: &WebResponse) -> Result<u64> {
    if response.status == 404 {
        return Ok(0);
    }
    if !response.is_success() {
        return Err(transport_error(response));
    }
    let document: TrendingDocument = serde_json::from_slice(&response.body)?;
    Ok(document.count)
}

/// Checks an upsert response.
///
/// # Errors
///
/// Returns an error for non-2xx statuses.
pub fn parse_upsert(response: &WebResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(transport_error(response))
    }
}
