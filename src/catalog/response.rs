//! Decoding of catalog response bodies.
//!
//! A catalog response that arrived with a 2xx status is one of two shapes:
//!
//! ```json
//! { "results": [ { "id": 268, "title": "Batman" } ] }
//! { "Response": "False", "Error": "Invalid API key" }
//! ```
//!
//! The second is a provider-level error inside a successful response. It is
//! reported as [`CatalogOutcome::ProviderError`], not as an `Err`.

use crate::domain::{MovieSummary, Result};
use serde::Deserialize;

/// Message shown when the provider flags an error without any text.
pub const PROVIDER_ERROR_FALLBACK: &str = "Failed to fetch movies";

/// Raw body shape, covering both success and provider-error payloads.
#[derive(Debug, Deserialize)]
struct CatalogPayload {
    #[serde(default)]
    results: Option<Vec<MovieSummary>>,
    #[serde(rename = "Response", default)]
    response: Option<serde_json::Value>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// What a decoded catalog response means for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    /// Movies to display. Empty when the payload had no `results` field.
    Movies(Vec<MovieSummary>),
    /// The provider signaled an error; the message is shown verbatim.
    ProviderError(String),
}

/// Decodes a 2xx response body.
///
/// # Errors
///
/// Returns [`CinescoutError::Decode`](crate::CinescoutError::Decode) if the
/// body is not JSON of the expected shape.
pub fn decode(body: &[u8]) -> Result<CatalogOutcome> {
    let payload: CatalogPayload = serde_json::from_slice(body)?;

    if payload.response.as_ref().is_some_and(is_truthy) {
        let message = payload
            .error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| PROVIDER_ERROR_FALLBACK.to_string());
        return Ok(CatalogOutcome::ProviderError(message));
    }

    Ok(CatalogOutcome::Movies(payload.results.unwrap_or_default()))
}

/// JSON truthiness: everything except `null`, `false`, `0`, and `""`.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_decoded_in_order() {
        let body = br#"{"page":1,"results":[{"id":1,"title":"A"},{"id":2,"title":"B"}]}"#;
        let CatalogOutcome::Movies(movies) = decode(body).unwrap() else {
            panic!("expected movies");
        };
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn missing_results_field_is_an_empty_list() {
        assert_eq!(decode(b"{}").unwrap(), CatalogOutcome::Movies(vec![]));
    }

    #[test]
    fn provider_error_uses_provider_message() {
        let body = br#"{"Response":"False","Error":"Invalid API key!"}"#;
        assert_eq!(
            decode(body).unwrap(),
            CatalogOutcome::ProviderError("Invalid API key!".to_string())
        );
    }

    #[test]
    fn provider_error_without_message_uses_fallback() {
        let body = br#"{"Response":true}"#;
        assert_eq!(
            decode(body).unwrap(),
            CatalogOutcome::ProviderError(PROVIDER_ERROR_FALLBACK.to_string())
        );
    }

    #[test]
    fn falsy_response_flag_is_not_an_error() {
        for flag in ["false", "null", "0", "\"\""] {
            let body = format!(r#"{{"Response":{flag},"results":[]}}"#);
            assert_eq!(decode(body.as_bytes()).unwrap(), CatalogOutcome::Movies(vec![]));
        }
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(decode(b"<html>502</html>").is_err());
    }
}
