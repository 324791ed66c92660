//! Host-agnostic HTTP request and response types.
//!
//! The plugin never performs I/O itself. The catalog and trending clients
//! build [`HttpRequest`] values, the event handler wraps them in
//! [`Action::WebRequest`](crate::app::Action::WebRequest), and the Zellij shim
//! hands them to the host's `web_request`. The host answers later with a
//! `WebRequestResult` event that the shim turns back into a [`WebResponse`].
//!
//! ```text
//! catalog / trending ──► HttpRequest ──► Action::WebRequest ──► host
//!                                                                │
//! handler ◄── Event::WebResponse ◄── WebResponse ◄───────────────┘
//! ```
//!
//! Each request carries a [`RequestContext`] that the host echoes back
//! verbatim, so responses can be routed without any shared mutable state in
//! the shim.

mod context;

pub use context::RequestContext;

use crate::domain::Result;
use std::collections::BTreeMap;

/// HTTP methods used by the catalog and trending clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

/// A request waiting to be issued by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl HttpRequest {
    /// Creates a `GET` request with no headers.
    #[must_use]
    pub fn get(url: impl Into<String>, context: RequestContext) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }

    /// Creates a `PUT` request with a JSON body.
    #[must_use]
    pub fn put_json(url: impl Into<String>, body: &serde_json::Value, context: RequestContext) -> Self {
        let mut request = Self {
            method: HttpMethod::Put,
            url: url.into(),
            headers: BTreeMap::new(),
            body: body.to_string().into_bytes(),
            context,
        };
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        request
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the context map the host should echo back with the response.
    #[must_use]
    pub fn host_context(&self) -> BTreeMap<String, String> {
        self.context.to_map()
    }
}

/// A response delivered by the host, with its context decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl WebResponse {
    /// Rebuilds a response from the raw pieces of a host result event.
    ///
    /// # Errors
    ///
    /// Returns [`CinescoutError::Protocol`](crate::CinescoutError::Protocol)
    /// if the echoed context was not produced by this plugin.
    pub fn from_host(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Result<Self> {
        Ok(Self {
            status,
            body,
            context: RequestContext::from_map(context)?,
        })
    }

    /// True for any 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body as text for logging, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_json_sets_content_type_and_body() {
        let request = HttpRequest::put_json(
            "https://example.test/doc",
            &serde_json::json!({"count": 2}),
            RequestContext::TrendingUpsert { write_id: 7 },
        );

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body, br#"{"count":2}"#.to_vec());
    }

    #[test]
    fn response_success_range() {
        let response = |status| WebResponse {
            status,
            body: vec![],
            context: RequestContext::TrendingList,
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(304).is_success());
        assert!(!response(404).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn from_host_round_trips_context() {
        let request = HttpRequest::get("https://example.test", RequestContext::Movies { seq: 3 });
        let response = WebResponse::from_host(200, b"{}".to_vec(), &request.host_context()).unwrap();
        assert_eq!(response.context, RequestContext::Movies { seq: 3 });
    }

    #[test]
    fn from_host_rejects_foreign_context() {
        let foreign = BTreeMap::from([("other".to_string(), "x".to_string())]);
        assert!(WebResponse::from_host(200, vec![], &foreign).is_err());
    }
}
