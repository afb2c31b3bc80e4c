//! API token discovery
//!
//! Lookup order: explicit value, token file, environment variable. Resolution
//! is a plain function of its inputs; [`TokenSources::from_env`] is the only
//! place that looks at the process environment.

use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "H1_TOKEN";

/// Token file location relative to the home directory
pub const TOKEN_FILE: &str = ".config/h1_token";

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Supplied by the caller
    Explicit,
    /// Read from the token file
    ConfigFile,
    /// Read from the environment variable
    Environment,
    /// Nothing found; the token is empty
    Missing,
}

/// Fallback locations consulted when no explicit token is given
#[derive(Debug, Clone, Default)]
pub struct TokenSources {
    /// Token file path
    pub config_file: Option<PathBuf>,
    /// Value of the token environment variable
    pub env_token: Option<String>,
}

impl TokenSources {
    /// Sources for the current process: `~/.config/h1_token` and `$H1_TOKEN`
    pub fn from_env() -> Self {
        Self {
            config_file: dirs::home_dir().map(|home| home.join(TOKEN_FILE)),
            env_token: std::env::var(TOKEN_ENV_VAR).ok(),
        }
    }

    /// Use a specific token file
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use a specific environment value
    #[must_use]
    pub fn with_env_token(mut self, token: impl Into<String>) -> Self {
        self.env_token = Some(token.into());
        self
    }
}

/// Resolve the API token from an explicit value and the fallback sources
///
/// An empty explicit value counts as absent. A readable token file wins over
/// the environment even if it is empty. When nothing is found the token is an
/// empty string.
pub fn resolve_token(explicit: Option<&str>, sources: &TokenSources) -> (String, TokenOrigin) {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return (token.to_string(), TokenOrigin::Explicit);
    }

    if let Some(path) = &sources.config_file {
        if let Ok(token) = std::fs::read_to_string(path) {
            debug!("using API token from {}", path.display());
            return (token, TokenOrigin::ConfigFile);
        }
    }

    if let Some(token) = sources.env_token.as_deref().filter(|t| !t.is_empty()) {
        debug!("using API token from {} environment variable", TOKEN_ENV_VAR);
        return (token.to_string(), TokenOrigin::Environment);
    }

    warn!(
        "no API token found in {} or {} environment variable",
        sources
            .config_file
            .as_ref()
            .map_or_else(|| TOKEN_FILE.to_string(), |p| p.display().to_string()),
        TOKEN_ENV_VAR
    );
    (String::new(), TokenOrigin::Missing)
}

/// Resolve the API token for the current process
pub fn load_token(explicit: Option<&str>) -> String {
    resolve_token(explicit, &TokenSources::from_env()).0
}
