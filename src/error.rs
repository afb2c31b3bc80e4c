//! Error types for the HackerOne client
//!
//! Every public operation returns `Result<T, Error>` where Error is defined here.
//! Only a connection reset reported by the transport is retryable; everything
//! else surfaces to the caller of the fetch on the first occurrence.

use crate::http::{TransportError, TransportErrorKind};
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("failed to send request: {0}")]
    Transport(#[from] TransportError),

    #[error("request failed after {max_retries} retries")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("api call failed: {url} returned {status}")]
    HttpStatus { url: String, status: String },

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected pagination for {resource}: {next}")]
    UnexpectedPagination { resource: String, next: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a decode error for the named payload
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status: status.into(),
        }
    }

    /// Create an unexpected pagination error
    pub fn unexpected_pagination(resource: impl Into<String>, next: impl Into<String>) -> Self {
        Self::UnexpectedPagination {
            resource: resource.into(),
            next: next.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError {
                kind: TransportErrorKind::ConnectionReset,
                ..
            })
        )
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;
