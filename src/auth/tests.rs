//! Tests for the auth module

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn token_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Credentials
// ============================================================================

#[test]
fn test_credentials_trim_token() {
    let creds = Credentials::new("alice", " \tabc123\n\n");
    assert_eq!(creds.username, "alice");
    assert_eq!(creds.token, "abc123");
    assert!(creds.has_token());
}

#[test]
fn test_credentials_empty_token_allowed() {
    let creds = Credentials::new("alice", "");
    assert_eq!(creds.token, "");
    assert!(!creds.has_token());
}

#[test]
fn test_credentials_debug_redacts_token() {
    let creds = Credentials::new("alice", "super-secret");
    let debug = format!("{creds:?}");
    assert!(debug.contains("alice"));
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("super-secret"));
}

// ============================================================================
// Token resolution
// ============================================================================

#[test]
fn test_explicit_token_wins() {
    let file = token_file("from-file");
    let sources = TokenSources::default()
        .with_config_file(file.path())
        .with_env_token("from-env");

    let (token, origin) = resolve_token(Some("explicit"), &sources);
    assert_eq!(token, "explicit");
    assert_eq!(origin, TokenOrigin::Explicit);
}

#[test]
fn test_empty_explicit_token_falls_through() {
    let sources = TokenSources::default().with_env_token("from-env");

    let (token, origin) = resolve_token(Some(""), &sources);
    assert_eq!(token, "from-env");
    assert_eq!(origin, TokenOrigin::Environment);
}

#[test]
fn test_config_file_before_env() {
    let file = token_file("from-file\n");
    let sources = TokenSources::default()
        .with_config_file(file.path())
        .with_env_token("from-env");

    let (token, origin) = resolve_token(None, &sources);
    assert_eq!(token, "from-file\n");
    assert_eq!(origin, TokenOrigin::ConfigFile);
}

#[test]
fn test_missing_config_file_falls_back_to_env() {
    let dir = tempfile::tempdir().unwrap();
    let sources = TokenSources::default()
        .with_config_file(dir.path().join("h1_token"))
        .with_env_token("from-env");

    let (token, origin) = resolve_token(None, &sources);
    assert_eq!(token, "from-env");
    assert_eq!(origin, TokenOrigin::Environment);
}

#[test]
fn test_nothing_found_yields_empty_token() {
    let dir = tempfile::tempdir().unwrap();
    let sources = TokenSources::default()
        .with_config_file(dir.path().join("h1_token"))
        .with_env_token("");

    let (token, origin) = resolve_token(None, &sources);
    assert_eq!(token, "");
    assert_eq!(origin, TokenOrigin::Missing);

    let (token, origin) = resolve_token(None, &TokenSources::default());
    assert_eq!(token, "");
    assert_eq!(origin, TokenOrigin::Missing);
}

#[test]
fn test_load_token_prefers_explicit() {
    assert_eq!(load_token(Some("explicit")), "explicit");
}

#[test]
fn test_from_env_points_at_home_token_file() {
    let sources = TokenSources::from_env();
    if let Some(path) = sources.config_file {
        assert!(path.ends_with(TOKEN_FILE));
    }
}
