//! # h1-client
//!
//! Client library for the HackerOne hacker API.
//!
//! ## Features
//!
//! - **Basic Auth**: Username plus API token, with the token discovered from
//!   `~/.config/h1_token` or `$H1_TOKEN` when not given
//! - **Transparent Pagination**: `links.next` is followed lazily, one page per
//!   poll of the returned stream
//! - **Connection-Reset Retry**: Bounded retry with linear backoff for the one
//!   transient failure the API is known for
//! - **Typed Records**: Programs, structured scopes and weakness taxonomies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use h1_client::{Hackerone, NewHackeroneInput, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let h1 = Hackerone::new(NewHackeroneInput::new("alice"))?;
//!
//!     let mut programs = h1.programs();
//!     while let Some(program) = programs.next().await {
//!         let program = program?;
//!         let detail = program.detail().await?;
//!         println!("{}: {} scopes", program.handle, detail.in_scope().count());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Hackerone::programs()   Program::detail()/weaknesses()  │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴─────────────────────────────┐
//! │  PageWalker: follow links.next, flatten pages to items   │
//! ├──────────────────────────────────────────────────────────┤
//! │  HttpClient: auth, retry on reset, status, envelope      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Transport: one request (reqwest)                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Credentials and token discovery
pub mod auth;

/// Transport adapter and retrying sender
pub mod http;

/// Page envelope and pagination walker
pub mod pagination;

/// Response schemas
pub mod models;

/// Session and program list
pub mod hackerone;

/// Per-program fetchers
pub mod program;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::Credentials;
pub use error::{Error, Result};
pub use hackerone::{Hackerone, HackeroneConfig, NewHackeroneInput};
pub use program::Program;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
