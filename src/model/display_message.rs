//! Display-side wrapper around a loaded log event.

use super::log_data::LogEvent;

/// A loaded event as shown in the event pane.
///
/// Created 1:1 from a [`LogEvent`] when a page is appended. Only the
/// `collapsed` flag and the cached layout fields change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    content: String,
    timestamp: i64,
    collapsed: bool,
    /// Rendered height in lines at the current width.
    height: usize,
    /// Cumulative rendered lines up to and including this message.
    line_offset: usize,
}

impl DisplayMessage {
    /// Wrap an event. Layout fields stay zero until the owner relayouts.
    pub fn from_event(event: LogEvent, collapsed: bool) -> Self {
        let timestamp = event.timestamp();
        Self {
            content: event.raw_message().to_string(),
            timestamp,
            collapsed,
            height: 0,
            line_offset: 0,
        }
    }

    /// Raw message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Epoch milliseconds of the source event.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Whether the message renders as a single summary line.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Set the collapse flag. Callers must relayout afterwards.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Cached rendered height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cached cumulative line count through this message (inclusive).
    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    /// First rendered row of this message.
    pub fn start_line(&self) -> usize {
        self.line_offset - self.height
    }

    pub(crate) fn set_layout(&mut self, height: usize, line_offset: usize) {
        debug_assert!(line_offset >= height);
        self.height = height;
        self.line_offset = line_offset;
    }
}
