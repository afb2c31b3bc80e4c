//! Pagination module
//!
//! Responses carry a `links.next` URL when more data is available. The
//! [`PageWalker`] follows those links and hands out raw pages; resource
//! fetchers decode each page and flatten it with [`flatten_pages`].

mod types;
mod walker;

pub use types::{Links, PageEnvelope, RawPage};
pub use walker::{flatten_pages, ItemStream, PageStream, PageWalker};
