//! Session for the hacker API
//!
//! A [`Hackerone`] holds the credentials and the HTTP client. It is cheap to
//! clone and read-only after construction, so every [`Program`] it hands out
//! carries its own clone and can make further calls.

use crate::auth::{load_token, Credentials};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, ReqwestTransport, Transport};
use crate::models::ProgramList;
use crate::pagination::{flatten_pages, ItemStream, PageWalker};
use crate::program::Program;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.hackerone.com/v1";

/// Session configuration
#[derive(Debug, Clone)]
pub struct HackeroneConfig {
    /// API root; endpoints are appended to it
    pub base_url: String,
    /// HTTP client configuration
    pub http: HttpClientConfig,
}

impl Default for HackeroneConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpClientConfig::default(),
        }
    }
}

impl HackeroneConfig {
    /// Point the session at a different API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP client configuration
    #[must_use]
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

/// Input for [`Hackerone::new`]
///
/// The username is required. When the token is absent or empty it is looked
/// up in `~/.config/h1_token`, then in `$H1_TOKEN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHackeroneInput {
    pub username: String,
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl NewHackeroneInput {
    /// Input with a username and no explicit token
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
        }
    }

    /// Set an explicit token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Authenticated session
#[derive(Debug, Clone)]
pub struct Hackerone {
    client: HttpClient,
    base_url: Arc<str>,
}

impl Hackerone {
    /// Create a session against the production API
    pub fn new(input: NewHackeroneInput) -> Result<Self> {
        Self::with_config(input, HackeroneConfig::default())
    }

    /// Create a session with custom configuration
    pub fn with_config(input: NewHackeroneInput, config: HackeroneConfig) -> Result<Self> {
        let token = load_token(input.token.as_deref());
        let credentials = Credentials::new(input.username, token);
        let transport = ReqwestTransport::new(&config.http)?;

        Ok(Self::with_transport(credentials, config, Arc::new(transport)))
    }

    /// Create a session over a custom transport
    pub fn with_transport(
        credentials: Credentials,
        config: HackeroneConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url: Arc<str> = config.base_url.trim_end_matches('/').into();
        Self {
            client: HttpClient::new(transport, credentials, config.http),
            base_url,
        }
    }

    /// Get the API username
    pub fn username(&self) -> &str {
        &self.client.credentials().username
    }

    /// Get the API root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.client
    }

    /// Handle for a program by its handle; makes no request
    pub fn program(&self, handle: impl Into<String>) -> Program {
        Program::new(self.clone(), handle)
    }

    /// Every program visible to the user, fetched page by page
    ///
    /// The stream ends after the first error. Dropping it stops the walk
    /// without fetching further pages.
    pub fn programs(&self) -> ItemStream<Program> {
        let session = self.clone();
        let pages = self.walker().walk(self.endpoint("hackers/programs"));

        flatten_pages(pages, move |page| {
            let list: ProgramList = page.decode("program list")?;
            Ok(list
                .data
                .into_iter()
                .map(|detail| Program::from_detail(session.clone(), detail))
                .collect())
        })
    }

    /// Like [`programs`](Self::programs), but logs an error instead of yielding it
    pub fn programs_logged(&self) -> Pin<Box<dyn Stream<Item = Program> + Send>> {
        Box::pin(self.programs().filter_map(|result| async move {
            match result {
                Ok(program) => Some(program),
                Err(e) => {
                    warn!("error getting programs: {}", e);
                    None
                }
            }
        }))
    }

    /// Feed every program to `f` until it breaks or the list ends
    ///
    /// Errors are passed to `f` as well; the walk cannot continue past one,
    /// so an error is always the last value `f` sees. Returns `Break` if `f`
    /// stopped the walk.
    pub async fn for_each_program<F>(&self, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(Result<Program>) -> ControlFlow<()>,
    {
        let mut programs = self.programs();
        while let Some(result) = programs.next().await {
            if f(result).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    pub(crate) fn walker(&self) -> PageWalker {
        PageWalker::new(self.client.clone())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Endpoint URL built from path segments, each one percent-encoded
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::config(format!("base URL {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::{self, ok, status, ScriptedTransport};

    #[test]
    fn test_config_default() {
        let config = HackeroneConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http.max_attempts, 3);
    }

    #[test]
    fn test_input_deserialize() {
        let input: NewHackeroneInput =
            serde_json::from_str(r#"{"username": "alice", "token": "t0k"}"#).unwrap();
        assert_eq!(input.username, "alice");
        assert_eq!(input.token.as_deref(), Some("t0k"));

        let input: NewHackeroneInput = serde_json::from_str(r#"{"username": "bob"}"#).unwrap();
        assert!(input.token.is_none());
    }

    #[test]
    fn test_new_with_explicit_token() {
        let h1 = Hackerone::new(NewHackeroneInput::new("alice").with_token(" t0k\n")).unwrap();
        assert_eq!(h1.username(), "alice");
        assert_eq!(h1.http().credentials().token, "t0k");
        assert_eq!(h1.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let transport = ScriptedTransport::new(vec![]);
        let h1 = Hackerone::with_transport(
            test_support::credentials(),
            HackeroneConfig::default().with_base_url("https://api.test/v1/"),
            transport,
        );
        assert_eq!(
            h1.endpoint("/hackers/programs"),
            "https://api.test/v1/hackers/programs"
        );
    }

    #[test]
    fn test_endpoint_url_encodes_segments() {
        let transport = ScriptedTransport::new(vec![]);
        let h1 = test_support::session(&transport);

        assert_eq!(
            h1.endpoint_url(&["hackers", "programs", "a b/c"]).unwrap(),
            "https://api.test/v1/hackers/programs/a%20b%2Fc"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_opaque_base() {
        let transport = ScriptedTransport::new(vec![]);
        let h1 = Hackerone::with_transport(
            test_support::credentials(),
            HackeroneConfig::default().with_base_url("mailto:api@test"),
            transport,
        );

        let err = h1.endpoint_url(&["hackers"]).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_programs_two_pages() {
        let transport = ScriptedTransport::new(vec![
            ok(r#"{"data":[{"id":"1"}],"links":{"next":"https://api.test/v1/hackers/programs?page=2"}}"#),
            ok(r#"{"data":[{"id":"2"}]}"#),
        ]);
        let h1 = test_support::session(&transport);

        let programs: Vec<Program> = h1.programs().map(|p| p.unwrap()).collect().await;

        let ids: Vec<_> = programs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(transport.calls(), 2);
        assert_eq!(
            transport.urls(),
            vec![
                "https://api.test/v1/hackers/programs",
                "https://api.test/v1/hackers/programs?page=2",
            ]
        );
    }

    #[tokio::test]
    async fn test_programs_carry_list_attributes() {
        let transport = ScriptedTransport::new(vec![ok(
            r#"{"data":[{"id":"7","type":"program","attributes":{"handle":"acme","name":"Acme","offers_bounties":true}}]}"#,
        )]);
        let h1 = test_support::session(&transport);

        let mut programs = h1.programs();
        let program = programs.next().await.unwrap().unwrap();

        assert_eq!(program.id, "7");
        assert_eq!(program.kind, "program");
        assert_eq!(program.handle, "acme");
        assert_eq!(program.id(), "acme");
        assert_eq!(program.attributes.name, "Acme");
        assert!(program.attributes.offers_bounties);
        assert!(programs.next().await.is_none());
    }

    #[tokio::test]
    async fn test_programs_partial_failure() {
        let transport = ScriptedTransport::new(vec![
            ok(r#"{"data":[{"id":"1"},{"id":"2"}],"links":{"next":"https://api.test/v1/hackers/programs?page=2"}}"#),
            status(502),
        ]);
        let h1 = test_support::session(&transport);

        let results: Vec<_> = h1.programs().collect().await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().id, "1");
        assert_eq!(results[1].as_ref().unwrap().id, "2");
        assert!(matches!(results[2], Err(Error::HttpStatus { .. })));
    }

    #[tokio::test]
    async fn test_programs_logged_skips_error() {
        let transport = ScriptedTransport::new(vec![
            ok(r#"{"data":[{"id":"1"}],"links":{"next":"https://api.test/v1/hackers/programs?page=2"}}"#),
            ok(r#"{"data": "not a list"}"#),
        ]);
        let h1 = test_support::session(&transport);

        let programs: Vec<Program> = h1.programs_logged().collect().await;

        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].id, "1");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_for_each_program_early_stop() {
        let transport = ScriptedTransport::new(vec![
            ok(r#"{"data":[{"id":"1"},{"id":"2"}],"links":{"next":"https://api.test/v1/hackers/programs?page=2"}}"#),
            ok(r#"{"data":[{"id":"3"}]}"#),
        ]);
        let h1 = test_support::session(&transport);

        let mut seen = Vec::new();
        let flow = h1
            .for_each_program(|result| {
                seen.push(result.unwrap().id);
                if seen.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .await;

        assert!(flow.is_break());
        assert_eq!(seen, vec!["1", "2"]);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_for_each_program_runs_to_end() {
        let transport = ScriptedTransport::new(vec![ok(r#"{"data":[{"id":"1"}]}"#)]);
        let h1 = test_support::session(&transport);

        let mut count = 0;
        let flow = h1
            .for_each_program(|result| {
                assert!(result.is_ok());
                count += 1;
                ControlFlow::Continue(())
            })
            .await;

        assert!(flow.is_continue());
        assert_eq!(count, 1);
    }
}
