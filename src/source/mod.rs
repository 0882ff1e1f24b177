//! Log sources and pagination.
//!
//! The core never talks to a backend directly. It asks a [`LogSource`] for a
//! [`Cursor`] scoped to a query and then pulls pages from it:
//! - groups matching a name prefix
//! - streams of a group matching a name prefix
//! - events of a (group, stream) pair
//!
//! Backends implement [`PageFetcher`] for each query; [`Cursor`] adds the
//! end-of-data bookkeeping so every backend behaves the same.

use crate::model::{LogEvent, LogGroup, LogStream, SourceError};
use std::fmt;
use tracing::debug;

pub mod directory;
pub mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

/// Result of one [`Cursor::next_page`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<T> {
    /// A non-empty, ordered batch of items.
    Items(Vec<T>),
    /// No further pages. Returned again on every later call.
    Exhausted,
}

/// Raw page returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage<T> {
    /// Items in source order. May be empty.
    pub items: Vec<T>,
    /// Token for the following page, `None` when this was the last one.
    pub next_token: Option<String>,
}

impl<T> FetchedPage<T> {
    /// A page with a continuation token.
    pub fn more(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }

    /// The final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

/// One remote request per call: fetch up to `limit` items after `token`.
///
/// `token` is `None` for the first page and otherwise the `next_token` of the
/// previous page, passed back verbatim.
pub trait PageFetcher<T> {
    /// Perform exactly one fetch.
    fn fetch(&mut self, token: Option<&str>, limit: usize) -> Result<FetchedPage<T>, SourceError>;
}

impl<T, F> PageFetcher<T> for F
where
    F: FnMut(Option<&str>, usize) -> Result<FetchedPage<T>, SourceError>,
{
    fn fetch(&mut self, token: Option<&str>, limit: usize) -> Result<FetchedPage<T>, SourceError> {
        self(token, limit)
    }
}

/// Single-direction pagination handle over one remote query.
///
/// # Contract
/// - each `next_page` performs at most one fetch
/// - once exhausted, `next_page` returns [`Page::Exhausted`] without fetching
/// - a failed fetch is returned as `Err` and does not advance the token, so
///   the same page can be retried
///
/// Not shared between threads; the event loop owns every cursor.
pub struct Cursor<T> {
    fetcher: Box<dyn PageFetcher<T>>,
    page_size: usize,
    next_token: Option<String>,
    exhausted: bool,
    fetch_count: usize,
}

impl<T> Cursor<T> {
    /// Wrap a fetcher. `page_size` is clamped to at least one.
    pub fn new(fetcher: impl PageFetcher<T> + 'static, page_size: usize) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            page_size: page_size.max(1),
            next_token: None,
            exhausted: false,
            fetch_count: 0,
        }
    }

    /// Fetch the next page.
    ///
    /// # Errors
    /// Returns the backend's [`SourceError`] unchanged; the cursor stays at
    /// the same position.
    pub fn next_page(&mut self) -> Result<Page<T>, SourceError> {
        if self.exhausted {
            return Ok(Page::Exhausted);
        }

        self.fetch_count += 1;
        let page = self
            .fetcher
            .fetch(self.next_token.as_deref(), self.page_size)?;
        debug!(
            items = page.items.len(),
            has_more = page.next_token.is_some(),
            "Fetched page"
        );

        match page.next_token {
            Some(token) => self.next_token = Some(token),
            None => self.exhausted = true,
        }

        if page.items.is_empty() {
            self.exhausted = true;
            return Ok(Page::Exhausted);
        }
        Ok(Page::Items(page.items))
    }

    /// Whether the source has reported the end of data.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of fetches performed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// Configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("page_size", &self.page_size)
            .field("next_token", &self.next_token)
            .field("exhausted", &self.exhausted)
            .field("fetch_count", &self.fetch_count)
            .finish()
    }
}

/// Page sizes used when creating cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    /// Groups per page.
    pub groups: usize,
    /// Streams per page.
    pub streams: usize,
    /// Events per page.
    pub events: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            groups: 50,
            streams: 50,
            events: 200,
        }
    }
}

/// A backend able to list groups, streams and events.
///
/// Creating a cursor performs no I/O; the first fetch happens on the first
/// `next_page` call.
pub trait LogSource {
    /// Groups whose name starts with `prefix`, sorted by name.
    fn groups(&self, prefix: &str) -> Cursor<LogGroup>;

    /// Streams of `group` whose name starts with `prefix`, newest first.
    fn streams(&self, group: &str, prefix: &str) -> Cursor<LogStream>;

    /// Events of one stream, oldest first.
    fn events(&self, group: &str, stream: &str) -> Cursor<LogEvent>;
}

/// Slice a fully materialized listing into a page using an offset token.
pub(crate) fn paginate<T: Clone>(
    items: &[T],
    token: Option<&str>,
    limit: usize,
) -> Result<FetchedPage<T>, SourceError> {
    let start = parse_offset(token)?;
    let end = start.saturating_add(limit.max(1)).min(items.len());
    let page = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    if end < items.len() {
        Ok(FetchedPage::more(page, end.to_string()))
    } else {
        Ok(FetchedPage::last(page))
    }
}

/// Parse an offset token; `None` means the start.
pub(crate) fn parse_offset(token: Option<&str>) -> Result<usize, SourceError> {
    match token {
        None => Ok(0),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| SourceError::InvalidToken(raw.to_string())),
    }
}
