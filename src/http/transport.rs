//! Transport adapter
//!
//! A single HTTP exchange with no retry logic. The retrying sender talks to the
//! network only through the [`Transport`] trait, so tests and embedders can
//! swap in their own implementation.

use super::client::HttpClientConfig;
use crate::auth::Credentials;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::fmt;
use thiserror::Error;
use url::Url;

/// One outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Fully-qualified target URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Basic auth credentials, if any
    pub basic_auth: Option<Credentials>,
    /// Buffered request body
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Create a request without headers, auth or body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            basic_auth: None,
            body: None,
        }
    }
}

/// A fully-read response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response with the given status and body and no headers
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Classes of transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The peer closed the connection abruptly
    ConnectionReset,
    /// The request or connection timed out
    Timeout,
    /// The connection could not be established (DNS, refused, TLS handshake)
    Connect,
    /// Anything else
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConnectionReset => "connection reset",
            Self::Timeout => "timeout",
            Self::Connect => "connect error",
            Self::Other => "transport error",
        };
        f.write_str(name)
    }
}

/// Failure reported by a [`Transport`]
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    /// Failure class, drives the retry decision
    pub kind: TransportErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if is_connection_reset(&err) {
            TransportErrorKind::ConnectionReset
        } else if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };

        Self::new(kind, err.to_string())
    }

    /// Check if this is a connection reset
    pub fn is_connection_reset(&self) -> bool {
        self.kind == TransportErrorKind::ConnectionReset
    }
}

/// Walk an error's source chain looking for an I/O connection reset
pub fn is_connection_reset(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Sends one HTTP request and reads the whole response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport from client configuration
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(credentials) = &request.basic_auth {
            req = req.basic_auth(&credentials.username, Some(&credentials.token));
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(TransportError::from_reqwest)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::from_reqwest)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
