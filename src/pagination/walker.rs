//! Pagination walker
//!
//! Follows `links.next` from page to page. Pages are fetched lazily: nothing
//! goes over the wire until the consumer polls, and dropping the stream stops
//! the walk.

use super::types::RawPage;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::{debug, warn};

/// Lazy sequence of raw pages; ends after the first error
pub type PageStream = Pin<Box<dyn Stream<Item = Result<RawPage>> + Send>>;

/// Lazy sequence of decoded items; ends after the first error
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Drives the HTTP client across paginated responses
#[derive(Debug, Clone)]
pub struct PageWalker {
    client: HttpClient,
}

impl PageWalker {
    /// Create a walker over the given client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Walk every page starting at `start_url`
    ///
    /// The walk ends when a page has no next link, or right after an error is
    /// yielded. A server that keeps returning a next link keeps the walk going;
    /// a next link equal to the page's own URL is logged but still followed.
    pub fn walk(&self, start_url: impl Into<String>) -> PageStream {
        let client = self.client.clone();

        Box::pin(stream::try_unfold(
            Some(start_url.into()),
            move |current| {
                let client = client.clone();
                async move {
                    let Some(url) = current else {
                        return Ok(None);
                    };

                    let page = client.get(&url).await?;
                    if page.next.as_deref() == Some(url.as_str()) {
                        warn!("next link of {} points back at itself", url);
                    }

                    let next = page.next.clone();
                    Ok::<_, Error>(Some((page, next)))
                }
            },
        ))
    }

    /// Fetch a resource that must fit on one page
    ///
    /// Fails with [`Error::UnexpectedPagination`] if the server declares a
    /// further page.
    pub async fn single_page(&self, url: &str, resource: &str) -> Result<RawPage> {
        let page = self.client.get(url).await?;

        if let Some(next) = &page.next {
            return Err(Error::unexpected_pagination(resource, next.as_str()));
        }

        Ok(page)
    }
}

struct ItemCursor<T, F> {
    pages: PageStream,
    pending: VecDeque<T>,
    decode: F,
}

/// Flatten a page stream into an item stream
///
/// `decode` turns one page into its items. The next page is only requested
/// once every item of the current page has been taken. A decode failure is
/// yielded as an error and ends the stream; items from earlier pages have
/// already been delivered and stay valid.
pub fn flatten_pages<T, F>(pages: PageStream, decode: F) -> ItemStream<T>
where
    T: Send + 'static,
    F: Fn(&RawPage) -> Result<Vec<T>> + Send + 'static,
{
    let cursor = ItemCursor {
        pages,
        pending: VecDeque::new(),
        decode,
    };

    Box::pin(stream::try_unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(item) = cursor.pending.pop_front() {
                return Ok(Some((item, cursor)));
            }

            match cursor.pages.next().await {
                Some(page) => {
                    let page = page?;
                    let items = (cursor.decode)(&page)?;
                    debug!("page {} decoded into {} items", page.url, items.len());
                    cursor.pending = items.into();
                }
                None => return Ok::<_, Error>(None),
            }
        }
    }))
}
