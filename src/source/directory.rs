//! Filesystem-backed log source.
//!
//! Layout under the root directory:
//! - every directory that directly contains at least one regular file is a
//!   group, named by its `/`-joined path relative to the root with a leading
//!   `/` (e.g. `root/aws/lambda/api` → `/aws/lambda/api`)
//! - every regular file inside a group directory is a stream
//! - every non-blank line of a stream file is an event
//!
//! Event lines of the form `{"timestamp": <millis>, "message": "<text>"}` are
//! unwrapped; anything else is kept verbatim and stamped with the file's
//! modification time. Hidden entries (leading `.`) are ignored.

use super::{paginate, parse_offset, Cursor, FetchedPage, LogSource, PageSizes};
use crate::model::{LogEvent, LogGroup, LogStream, SourceError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Log source reading a directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    page_sizes: PageSizes,
}

impl DirectorySource {
    /// Open a log tree rooted at `root`.
    ///
    /// # Errors
    /// Returns [`SourceError::RootNotFound`] when `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>, page_sizes: PageSizes) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::RootNotFound { path: root });
        }
        debug!(root = %root.display(), "Opened directory log source");
        Ok(Self { root, page_sizes })
    }

    /// The log root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LogSource for DirectorySource {
    fn groups(&self, prefix: &str) -> Cursor<LogGroup> {
        let root = self.root.clone();
        let prefix = prefix.to_string();
        // Listing taken on the first fetch; later pages slice the same snapshot.
        let mut listing: Option<Vec<LogGroup>> = None;
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                if listing.is_none() {
                    listing = Some(
                        scan_groups(&root)?
                            .into_iter()
                            .filter(|g| g.name().starts_with(&prefix))
                            .collect(),
                    );
                }
                let groups = listing.as_deref().unwrap_or_default();
                paginate(groups, token, limit)
            },
            self.page_sizes.groups,
        )
    }

    fn streams(&self, group: &str, prefix: &str) -> Cursor<LogStream> {
        let dir = group_dir(&self.root, group);
        let group = group.to_string();
        let prefix = prefix.to_string();
        // Snapshot on the first fetch; mtime order shifts as files are written.
        let mut listing: Option<Vec<StreamFile>> = None;
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                if listing.is_none() {
                    let dir = dir
                        .as_deref()
                        .filter(|d| d.is_dir())
                        .ok_or_else(|| SourceError::NotFound {
                            name: group.clone(),
                        })?;
                    listing = Some(
                        list_stream_files(dir)?
                            .into_iter()
                            .filter(|f| f.name.starts_with(&prefix))
                            .collect(),
                    );
                }
                let files = listing.as_deref().unwrap_or_default();
                let page = paginate(files, token, limit)?;
                Ok(FetchedPage {
                    items: page.items.iter().map(StreamFile::to_stream).collect(),
                    next_token: page.next_token,
                })
            },
            self.page_sizes.streams,
        )
    }

    fn events(&self, group: &str, stream: &str) -> Cursor<LogEvent> {
        let path = group_dir(&self.root, group).and_then(|dir| stream_path(&dir, stream));
        let name = format!("{group}/{stream}");
        Cursor::new(
            move |token: Option<&str>, limit: usize| {
                let path = path
                    .as_deref()
                    .filter(|p| p.is_file())
                    .ok_or_else(|| SourceError::NotFound { name: name.clone() })?;
                read_events(path, token, limit)
            },
            self.page_sizes.events,
        )
    }
}

/// Resolve a group name to its directory. Rejects `..` and absolute tricks.
fn group_dir(root: &Path, group: &str) -> Option<PathBuf> {
    let relative = Path::new(group.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    let safe = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    safe.then(|| root.join(relative))
}

fn stream_path(dir: &Path, stream: &str) -> Option<PathBuf> {
    let candidate = Path::new(stream);
    let mut components = candidate.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(dir.join(candidate)),
        _ => None,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Walk the tree and collect every group, sorted by name.
fn scan_groups(root: &Path) -> Result<Vec<LogGroup>, SourceError> {
    let mut groups = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == root => return Err(SourceError::io(&dir, &e)),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        let mut has_files = false;
        for entry in entries.flatten() {
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => pending.push(path),
                Ok(ft) if ft.is_file() => has_files = true,
                _ => {}
            }
        }

        if has_files && dir != root {
            if let Some(name) = group_name(root, &dir) {
                groups.push(LogGroup::new(name));
            }
        }
    }

    groups.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(groups)
}

fn group_name(root: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(format!("/{}", parts.join("/")))
}

#[derive(Debug, Clone)]
struct StreamFile {
    name: String,
    path: PathBuf,
    modified: DateTime<Utc>,
}

impl StreamFile {
    fn to_stream(&self) -> LogStream {
        let first = first_event_time(&self.path).unwrap_or(self.modified);
        LogStream::new(self.name.clone(), first)
    }
}

/// Regular files in `dir`, newest modification first, ties by name.
fn list_stream_files(dir: &Path) -> Result<Vec<StreamFile>, SourceError> {
    let entries = fs::read_dir(dir).map_err(|e| SourceError::io(dir, &e))?;
    let mut files = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        files.push(StreamFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            modified,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(files)
}

/// Envelope recognized on event lines.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventRecord {
    timestamp: i64,
    message: String,
}

/// Parse one event line, stamping plain text with `fallback_millis`.
fn parse_event_line(line: &str, fallback_millis: i64) -> LogEvent {
    match serde_json::from_str::<EventRecord>(line) {
        Ok(record) => LogEvent::new(record.timestamp, record.message),
        Err(_) => LogEvent::new(fallback_millis, line),
    }
}

fn modified_millis(path: &Path) -> i64 {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Non-blank lines of a file, lossily decoded, `\r` stripped.
///
/// Read failures are yielded as errors rather than ending the iterator.
fn event_lines(
    path: &Path,
) -> Result<impl Iterator<Item = Result<String, SourceError>> + '_, SourceError> {
    let file = fs::File::open(path).map_err(|e| SourceError::io(path, &e))?;
    let lines = BufReader::new(file)
        .split(b'\n')
        .map(move |bytes| {
            let bytes = bytes.map_err(|e| SourceError::io(path, &e))?;
            let text = String::from_utf8_lossy(&bytes);
            Ok(text.strip_suffix('\r').unwrap_or(&text).to_string())
        })
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()));
    Ok(lines)
}

fn first_event_time(path: &Path) -> Option<DateTime<Utc>> {
    let fallback = modified_millis(path);
    let line = event_lines(path).ok()?.next()?.ok()?;
    parse_event_line(&line, fallback).time()
}

/// Read up to `limit` events after the event offset carried in `token`.
fn read_events(
    path: &Path,
    token: Option<&str>,
    limit: usize,
) -> Result<FetchedPage<LogEvent>, SourceError> {
    let start = parse_offset(token)?;
    let limit = limit.max(1);
    let fallback = modified_millis(path);

    // One extra line tells whether another page exists.
    let mut lines = event_lines(path)?
        .skip(start)
        .take(limit + 1)
        .collect::<Result<Vec<String>, SourceError>>()?;
    let has_more = lines.len() > limit;
    lines.truncate(limit);

    let events: Vec<LogEvent> = lines
        .iter()
        .map(|line| parse_event_line(line, fallback))
        .collect();

    if has_more {
        Ok(FetchedPage::more(events, (start + limit).to_string()))
    } else {
        Ok(FetchedPage::last(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Page;

    /// Fresh directory under the system temp dir, removed on drop.
    struct TempTree(PathBuf);

    impl TempTree {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("lgv_dir_source_{name}_{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, relative: &str, contents: &str) {
            let path = self.0.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
    }

    impl Drop for TempTree {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn sizes(n: usize) -> PageSizes {
        PageSizes {
            groups: n,
            streams: n,
            events: n,
        }
    }

    fn collect_all<T>(cursor: &mut Cursor<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Page::Items(items) = cursor.next_page().unwrap() {
            out.extend(items);
        }
        out
    }

    #[test]
    fn open_rejects_missing_root() {
        let err = DirectorySource::open("/definitely/not/here/lgv", PageSizes::default()).unwrap_err();
        assert!(matches!(err, SourceError::RootNotFound { .. }));
    }

    #[test]
    fn groups_are_directories_with_files_sorted_by_name() {
        let tree = TempTree::new("groups");
        tree.write("aws/lambda/api/stream-1", "a\n");
        tree.write("aws/lambda/worker/stream-1", "b\n");
        tree.write("app/web/access.log", "c\n");
        tree.write(".hidden/x/log", "d\n");

        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();
        let names: Vec<String> = collect_all(&mut source.groups(""))
            .iter()
            .map(|g| g.name().to_string())
            .collect();

        assert_eq!(names, vec!["/app/web", "/aws/lambda/api", "/aws/lambda/worker"]);
    }

    #[test]
    fn group_prefix_filters_names() {
        let tree = TempTree::new("group_prefix");
        tree.write("aws/lambda/api/s", "a\n");
        tree.write("app/web/s", "b\n");

        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();
        let groups = collect_all(&mut source.groups("/aws"));

        assert_eq!(groups, vec![LogGroup::new("/aws/lambda/api")]);
    }

    #[test]
    fn groups_paginate_by_page_size() {
        let tree = TempTree::new("group_pages");
        for i in 0..5 {
            tree.write(&format!("g{i}/s"), "x\n");
        }
        let source = DirectorySource::open(&tree.0, sizes(2)).unwrap();
        let mut cursor = source.groups("");

        assert!(matches!(cursor.next_page().unwrap(), Page::Items(ref v) if v.len() == 2));
        assert!(matches!(cursor.next_page().unwrap(), Page::Items(ref v) if v.len() == 2));
        assert!(matches!(cursor.next_page().unwrap(), Page::Items(ref v) if v.len() == 1));
        assert_eq!(cursor.next_page().unwrap(), Page::Exhausted);
    }

    #[test]
    fn streams_list_files_and_read_first_event_time() {
        let tree = TempTree::new("streams");
        tree.write(
            "svc/2024-01-01",
            "{\"timestamp\":1704067200000,\"message\":\"start\"}\n",
        );

        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();
        let streams = collect_all(&mut source.streams("/svc", ""));

        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].name(), "2024-01-01");
        assert_eq!(streams[0].first_event_time().timestamp_millis(), 1_704_067_200_000);
    }

    #[test]
    fn streams_of_unknown_group_is_not_found() {
        let tree = TempTree::new("streams_missing");
        tree.write("svc/s", "x\n");
        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();

        let err = source.streams("/nope", "").next_page().unwrap_err();
        assert_eq!(err, SourceError::NotFound { name: "/nope".into() });
    }

    #[test]
    fn group_names_with_parent_components_are_rejected() {
        let tree = TempTree::new("traversal");
        tree.write("svc/s", "x\n");
        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();

        assert!(source.streams("/../etc", "").next_page().is_err());
        assert!(source.events("/svc", "../svc/s").next_page().is_err());
    }

    #[test]
    fn events_unwrap_envelopes_and_keep_plain_lines() {
        let tree = TempTree::new("events");
        tree.write(
            "svc/s",
            "{\"timestamp\":5,\"message\":\"wrapped\"}\n\nplain line\r\n{\"level\":\"info\"}\n",
        );
        let source = DirectorySource::open(&tree.0, sizes(10)).unwrap();
        let events = collect_all(&mut source.events("/svc", "s"));

        assert_eq!(events.len(), 3, "blank line is skipped");
        assert_eq!(events[0], LogEvent::new(5, "wrapped"));
        assert_eq!(events[1].raw_message(), "plain line");
        assert_eq!(events[2].raw_message(), "{\"level\":\"info\"}");
    }

    fn set_mtime(path: &Path, secs_after_epoch: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs_after_epoch))
            .unwrap();
    }

    #[test]
    fn stream_pages_keep_first_listing_when_a_file_is_written() {
        let tree = TempTree::new("stream_snapshot");
        for (name, secs) in [("a", 3_000), ("b", 2_000), ("c", 1_000)] {
            tree.write(&format!("svc/{name}"), "x\n");
            set_mtime(&tree.0.join("svc").join(name), secs);
        }
        let source = DirectorySource::open(&tree.0, sizes(1)).unwrap();
        let mut cursor = source.streams("/svc", "");

        let Page::Items(first) = cursor.next_page().unwrap() else {
            panic!("expected a first page");
        };
        // `c` becomes the newest file mid-listing
        tree.write("svc/c", "x\ny\n");
        set_mtime(&tree.0.join("svc/c"), 9_000);

        let mut names: Vec<String> = first.iter().map(|s| s.name().to_string()).collect();
        names.extend(collect_all(&mut cursor).iter().map(|s| s.name().to_string()));
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_event_data_is_an_error_not_the_end() {
        let tree = TempTree::new("event_read_error");
        tree.write("svc/s", "x\n");
        // Opening a directory succeeds on unix but reading it fails
        let err = read_events(&tree.0.join("svc"), None, 10).unwrap_err();

        assert!(matches!(err, SourceError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn events_paginate_without_gaps_or_duplicates() {
        let tree = TempTree::new("event_pages");
        let body: String = (0..7).map(|i| format!("line {i}\n")).collect();
        tree.write("svc/s", &body);
        let source = DirectorySource::open(&tree.0, sizes(3)).unwrap();
        let mut cursor = source.events("/svc", "s");

        let events = collect_all(&mut cursor);
        let messages: Vec<&str> = events.iter().map(LogEvent::raw_message).collect();
        assert_eq!(
            messages,
            vec!["line 0", "line 1", "line 2", "line 3", "line 4", "line 5", "line 6"]
        );
        assert_eq!(cursor.fetch_count(), 3);
    }
}
