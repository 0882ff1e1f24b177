//! In-memory log source for tests, benchmarks and demos.
//!
//! Holds groups, streams and events in plain vectors and serves them through
//! the same [`Cursor`] contract as the filesystem source. Failures can be
//! injected to exercise the retry path.

use super::{paginate, Cursor, LogSource, PageSizes};
use crate::model::{LogEvent, LogGroup, LogStream, SourceError};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Store {
    /// Groups in insertion order; each holds its streams in insertion order.
    groups: Vec<(LogGroup, Vec<(LogStream, Vec<LogEvent>)>)>,
    pending_failures: usize,
    fetches: usize,
}

impl Store {
    /// Count the fetch and consume one injected failure if any.
    fn begin_fetch(&mut self) -> Result<(), SourceError> {
        self.fetches += 1;
        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return Err(SourceError::Unavailable("injected failure".into()));
        }
        Ok(())
    }

    fn group(&self, name: &str) -> Option<&Vec<(LogStream, Vec<LogEvent>)>> {
        self.groups
            .iter()
            .find(|(g, _)| g.name() == name)
            .map(|(_, streams)| streams)
    }

    fn group_mut(&mut self, name: &str) -> &mut Vec<(LogStream, Vec<LogEvent>)> {
        let idx = match self.groups.iter().position(|(g, _)| g.name() == name) {
            Some(idx) => idx,
            None => {
                self.groups.push((LogGroup::new(name), Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }
}

/// Shared, cloneable in-memory source.
///
/// Clones share the same store, so a test can keep a handle to inject
/// failures or count fetches after moving a clone into the controller.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    store: Rc<RefCell<Store>>,
    page_sizes: PageSizes,
}

impl MemorySource {
    /// Empty source with default page sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override page sizes.
    pub fn with_page_sizes(mut self, page_sizes: PageSizes) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    /// Add an empty group.
    pub fn with_group(self, name: &str) -> Self {
        self.store.borrow_mut().group_mut(name);
        self
    }

    /// Add a stream with its events; creates the group if needed.
    ///
    /// The stream's first event time is taken from its first event.
    pub fn with_stream(self, group: &str, name: &str, events: Vec<LogEvent>) -> Self {
        let first = events
            .first()
            .and_then(LogEvent::time)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        self.store
            .borrow_mut()
            .group_mut(group)
            .push((LogStream::new(name, first), events));
        self
    }

    /// Make the next `n` fetches (of any kind) fail.
    pub fn fail_next_fetches(&self, n: usize) {
        self.store.borrow_mut().pending_failures = n;
    }

    /// Total fetches performed across all cursors.
    pub fn fetch_count(&self) -> usize {
        self.store.borrow().fetches
    }
}

impl LogSource for MemorySource {
    fn groups(&self, prefix: &str) -> Cursor<LogGroup> {
        let store = Rc::clone(&self.store);
        let prefix = prefix.to_string();
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                let mut store = store.borrow_mut();
                store.begin_fetch()?;
                let mut groups: Vec<LogGroup> = store
                    .groups
                    .iter()
                    .map(|(g, _)| g.clone())
                    .filter(|g| g.name().starts_with(&prefix))
                    .collect();
                groups.sort_by(|a, b| a.name().cmp(b.name()));
                paginate(&groups, token, limit)
            },
            self.page_sizes.groups,
        )
    }

    fn streams(&self, group: &str, prefix: &str) -> Cursor<LogStream> {
        let store = Rc::clone(&self.store);
        let group = group.to_string();
        let prefix = prefix.to_string();
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                let mut store = store.borrow_mut();
                store.begin_fetch()?;
                let streams = store.group(&group).ok_or_else(|| SourceError::NotFound {
                    name: group.clone(),
                })?;
                let mut listed: Vec<LogStream> = streams
                    .iter()
                    .map(|(s, _)| s.clone())
                    .filter(|s| s.name().starts_with(&prefix))
                    .collect();
                // Newest first, stable for equal times.
                listed.sort_by(|a, b| b.first_event_time().cmp(&a.first_event_time()));
                paginate(&listed, token, limit)
            },
            self.page_sizes.streams,
        )
    }

    fn events(&self, group: &str, stream: &str) -> Cursor<LogEvent> {
        let store = Rc::clone(&self.store);
        let group = group.to_string();
        let stream = stream.to_string();
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                let mut store = store.borrow_mut();
                store.begin_fetch()?;
                let events = store
                    .group(&group)
                    .and_then(|streams| streams.iter().find(|(s, _)| s.name() == stream))
                    .map(|(_, events)| events)
                    .ok_or_else(|| SourceError::NotFound {
                        name: format!("{group}/{stream}"),
                    })?;
                paginate(events, token, limit)
            },
            self.page_sizes.events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Page;

    fn events(n: usize) -> Vec<LogEvent> {
        (0..n)
            .map(|i| LogEvent::new(i as i64 * 1000, format!("event {i}")))
            .collect()
    }

    #[test]
    fn groups_are_sorted_and_prefix_filtered() {
        let source = MemorySource::new()
            .with_group("/b")
            .with_group("/a/x")
            .with_group("/a/y");

        let mut cursor = source.groups("/a");
        assert_eq!(
            cursor.next_page().unwrap(),
            Page::Items(vec![LogGroup::new("/a/x"), LogGroup::new("/a/y")])
        );
        assert_eq!(cursor.next_page().unwrap(), Page::Exhausted);
    }

    #[test]
    fn streams_are_newest_first() {
        let source = MemorySource::new()
            .with_stream("/g", "old", vec![LogEvent::new(1_000, "a")])
            .with_stream("/g", "new", vec![LogEvent::new(9_000, "b")]);

        let Page::Items(streams) = source.streams("/g", "").next_page().unwrap() else {
            panic!("expected streams");
        };
        let names: Vec<&str> = streams.iter().map(LogStream::name).collect();
        assert_eq!(names, vec!["new", "old"]);
    }

    #[test]
    fn events_page_by_configured_size() {
        let source = MemorySource::new()
            .with_page_sizes(PageSizes {
                groups: 10,
                streams: 10,
                events: 4,
            })
            .with_stream("/g", "s", events(10));
        let mut cursor = source.events("/g", "s");

        let mut total = 0;
        while let Page::Items(items) = cursor.next_page().unwrap() {
            assert!(items.len() <= 4);
            total += items.len();
        }
        assert_eq!(total, 10);
        assert_eq!(source.fetch_count(), 3);
    }

    #[test]
    fn injected_failures_are_consumed_in_order() {
        let source = MemorySource::new().with_stream("/g", "s", events(2));
        source.fail_next_fetches(1);
        let mut cursor = source.events("/g", "s");

        assert!(cursor.next_page().is_err());
        assert_eq!(cursor.next_page().unwrap(), Page::Items(events(2)));
    }

    #[test]
    fn unknown_stream_is_not_found() {
        let source = MemorySource::new().with_group("/g");
        let err = source.events("/g", "missing").next_page().unwrap_err();
        assert_eq!(
            err,
            SourceError::NotFound {
                name: "/g/missing".into()
            }
        );
    }
}
