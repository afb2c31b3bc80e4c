//! Pagination types
//!
//! The page envelope is decoded separately from the payload so the walker can
//! find the next link without knowing what the page contains.

use crate::error::{Error, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The part of every response the walker cares about
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Pagination links
    #[serde(default)]
    pub links: Option<Links>,
}

/// Pagination links of a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Fully-qualified URL of the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageEnvelope {
    /// Decode the envelope from a raw body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| Error::decode("page envelope", e))
    }

    /// Next page URL, treating an empty string as absent
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

/// One successfully fetched page
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL the page was fetched from
    pub url: String,
    /// Undecoded response body
    pub body: Bytes,
    /// Next page URL, if the server declared one
    pub next: Option<String>,
    /// Transport attempts used to fetch this page
    pub attempts: u32,
}

impl RawPage {
    /// Check if the server declared a further page
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Decode the full payload
    pub fn decode<T: DeserializeOwned>(&self, context: &str) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::decode(context, e))
    }
}
