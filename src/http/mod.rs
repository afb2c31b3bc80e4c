//! HTTP client module
//!
//! Two layers sit here:
//!
//! - **Transport**: one request, one response, no retry. [`ReqwestTransport`]
//!   is the production implementation; anything implementing [`Transport`]
//!   can stand in for it.
//! - **Sender**: [`HttpClient`] adds the Accept header and basic auth,
//!   retries connection resets with linear backoff, checks the status and
//!   reads the page envelope.

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{
    is_connection_reset, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
    TransportErrorKind,
};
