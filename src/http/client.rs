//! HTTP client with connection-reset retry
//!
//! Provides the sender every fetch goes through. It handles:
//! - Accept header and basic auth on every attempt
//! - Retrying a connection reset with linearly increasing backoff
//! - Status checking
//! - Reading the page envelope to find the next link

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::pagination::{PageEnvelope, RawPage};
use bytes::Bytes;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total attempts per request, counting the first one
    pub max_attempts: u32,
    /// Backoff step; retry `n + 1` waits `n * retry_backoff`
    pub retry_backoff: Duration,
    /// Request timeout enforced by the transport
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_backoff: Duration::from_millis(100),
            timeout: Duration::from_secs(30),
            user_agent: format!("h1-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the total number of attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the backoff step
    pub fn retry_backoff(mut self, step: Duration) -> Self {
        self.config.retry_backoff = step;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with connection-reset retry
///
/// Cheap to clone; clones share the transport and credentials.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<Credentials>,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a client over the given transport
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        config: HttpClientConfig,
    ) -> Self {
        Self {
            transport,
            credentials: Arc::new(credentials),
            config: Arc::new(config),
        }
    }

    /// Get the credentials used for basic auth
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<RawPage> {
        self.send(Method::GET, url, None).await
    }

    /// Send a request, retrying on connection reset
    ///
    /// The body is already buffered, so each attempt presents it again in full.
    /// Returns the raw body together with the `links.next` value of the page
    /// envelope.
    pub async fn send(&self, method: Method, url: &str, body: Option<Bytes>) -> Result<RawPage> {
        let target = Url::parse(url)?;
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.send_once(method.clone(), &target, body.clone()).await {
                Ok(response) => return self.finish_page(url, response, attempt),
                Err(e) if e.is_connection_reset() => {
                    if attempt < max_attempts {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "connection reset (attempt {}/{}): {}, retrying in {:?}",
                            attempt, max_attempts, e, delay
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        warn!(
                            "connection reset (attempt {}/{}): {}, giving up",
                            attempt, max_attempts, e
                        );
                    }
                }
                Err(e) => return Err(Error::Transport(e)),
            }
        }

        Err(Error::MaxRetriesExceeded {
            max_retries: max_attempts,
        })
    }

    /// Single attempt without retry
    async fn send_once(
        &self,
        method: Method,
        url: &Url,
        body: Option<Bytes>,
    ) -> std::result::Result<HttpResponse, TransportError> {
        debug!("{} {}", method, url);

        let mut request = HttpRequest::new(method, url.clone());
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        request.basic_auth = Some((*self.credentials).clone());
        request.body = body;

        self.transport.execute(request).await
    }

    /// Check the status and pull the next link out of the envelope
    fn finish_page(&self, url: &str, response: HttpResponse, attempts: u32) -> Result<RawPage> {
        if !response.status.is_success() {
            return Err(Error::http_status(url, response.status.to_string()));
        }

        let envelope = PageEnvelope::from_slice(&response.body)?;
        let next = envelope.next_link().map(str::to_string);

        debug!(
            "fetched {} ({} bytes, next: {})",
            url,
            response.body.len(),
            next.as_deref().unwrap_or("none")
        );

        Ok(RawPage {
            url: url.to_string(),
            body: response.body,
            next,
            attempts,
        })
    }

    /// Backoff delay before the retry that follows `attempt`
    ///
    /// Saturates at [`Duration::MAX`].
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        self.config
            .retry_backoff
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("username", &self.credentials.username)
            .finish_non_exhaustive()
    }
}
