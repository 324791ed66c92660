//! Routing context attached to outgoing requests.

use crate::domain::{CinescoutError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the serialized context is stored in the host context map.
const CONTEXT_KEY: &str = "cinescout";

/// Identifies which flow a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestContext {
    /// A catalog search or discover request, tagged with its sequence number.
    Movies { seq: u64 },
    /// Remote trending list read.
    TrendingList,
    /// First half of a remote trending write: read the current counter.
    TrendingLookup { write_id: u64 },
    /// Second half of a remote trending write: store the incremented counter.
    TrendingUpsert { write_id: u64 },
}

impl RequestContext {
    /// Encodes the context into the string map the host echoes back.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        if let Ok(encoded) = serde_json::to_string(self) {
            map.insert(CONTEXT_KEY.to_string(), encoded);
        }
        map
    }

    /// Decodes a context previously produced by [`RequestContext::to_map`].
    ///
    /// # Errors
    ///
    /// Returns [`CinescoutError::Protocol`] if the key is missing or the
    /// value does not parse.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let encoded = map
            .get(CONTEXT_KEY)
            .ok_or_else(|| CinescoutError::Protocol("response has no request context".to_string()))?;

        serde_json::from_str(encoded)
            .map_err(|e| CinescoutError::Protocol(format!("unreadable request context: {e}")))
    }
}
