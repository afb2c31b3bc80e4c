//! Scripted transport for unit tests

use crate::auth::Credentials;
use crate::hackerone::{Hackerone, HackeroneConfig};
use crate::http::{
    HttpClient, HttpClientConfig, HttpRequest, HttpResponse, Transport, TransportError,
    TransportErrorKind,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://api.test/v1";

type Outcome = Result<HttpResponse, TransportError>;

/// Replays canned outcomes in order and records every request
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Outcome {
        self.requests.lock().unwrap().push(request);
        self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportErrorKind::Other,
                "no scripted response left",
            ))
        })
    }
}

pub fn ok(body: &str) -> Outcome {
    Ok(HttpResponse::new(StatusCode::OK, body.to_string()))
}

pub fn status(code: u16) -> Outcome {
    Ok(HttpResponse::new(
        StatusCode::from_u16(code).unwrap(),
        "{}".to_string(),
    ))
}

pub fn reset() -> Outcome {
    Err(TransportError::new(
        TransportErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
}

pub fn fail(kind: TransportErrorKind) -> Outcome {
    Err(TransportError::new(kind, "scripted failure"))
}

pub fn credentials() -> Credentials {
    Credentials::new("hacker", "secret-token")
}

pub fn http_config() -> HttpClientConfig {
    HttpClientConfig::builder()
        .retry_backoff(Duration::from_millis(1))
        .build()
}

pub fn client(transport: &Arc<ScriptedTransport>) -> HttpClient {
    HttpClient::new(transport.clone(), credentials(), http_config())
}

pub fn session(transport: &Arc<ScriptedTransport>) -> Hackerone {
    Hackerone::with_transport(
        credentials(),
        HackeroneConfig::default()
            .with_base_url(BASE_URL)
            .with_http(http_config()),
        transport.clone(),
    )
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}/{path}")
}
