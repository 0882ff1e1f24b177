//! Remote log records: groups, streams and events.
//!
//! All three are immutable once fetched. Groups are identified by name,
//! streams by name within their group.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// A named collection of log streams.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogGroup {
    name: String,
}

impl LogGroup {
    /// Create a group with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The group's name (its identity).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for LogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A single ordered stream of events inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogStream {
    name: String,
    first_event_time: DateTime<Utc>,
}

impl LogStream {
    /// Create a stream record.
    pub fn new(name: impl Into<String>, first_event_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            first_event_time,
        }
    }

    /// The stream's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamp of the earliest event in the stream.
    pub fn first_event_time(&self) -> DateTime<Utc> {
        self.first_event_time
    }
}

/// One timestamped log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogEvent {
    /// Epoch milliseconds.
    timestamp: i64,
    raw_message: String,
}

impl LogEvent {
    /// Create an event from epoch milliseconds and its raw message body.
    pub fn new(timestamp: i64, raw_message: impl Into<String>) -> Self {
        Self {
            timestamp,
            raw_message: raw_message.into(),
        }
    }

    /// Epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The unformatted message body.
    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    /// Timestamp as a UTC datetime, `None` when out of chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Format epoch milliseconds for display, e.g. `2024-03-01 12:00:05.120`.
pub fn format_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => millis.to_string(),
    }
}
