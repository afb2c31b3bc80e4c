//! Credential types

use std::fmt;

/// Basic auth credentials for the hacker API
///
/// The token is trimmed of surrounding spaces, tabs and newlines so a token
/// file with a trailing newline works as-is. An empty token is allowed and is
/// sent as-is; the server decides whether to reject it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API username
    pub username: String,
    /// API token
    pub token: String,
}

impl Credentials {
    /// Create credentials, trimming the token
    pub fn new(username: impl Into<String>, token: impl AsRef<str>) -> Self {
        Self {
            username: username.into(),
            token: token.as_ref().trim_matches([' ', '\t', '\n']).to_string(),
        }
    }

    /// Check if a token is present
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &if self.has_token() { "<redacted>" } else { "<empty>" })
            .finish()
    }
}
