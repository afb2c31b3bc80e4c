//! Authentication module
//!
//! The hacker API uses HTTP basic auth with the username and an API token.
//! [`Credentials`] holds both; [`resolve_token`] finds the token when the
//! caller does not pass one.

mod token;
mod types;

pub use token::{load_token, resolve_token, TokenOrigin, TokenSources, TOKEN_ENV_VAR, TOKEN_FILE};
pub use types::Credentials;

#[cfg(test)]
mod tests;
