//! Event session: the loaded events of one (group, stream) pair.
//!
//! Owns the event cursor, the append-only message list, the selection and the
//! viewport offset. Every message caches its rendered height and cumulative
//! line offset; those caches are refreshed only when content or width changes
//! (append, collapse toggle, resize), never on plain navigation.

use crate::clipboard::Clipboard;
use crate::formatter::format_message;
use crate::model::{DisplayMessage, LogEvent};
use crate::source::{Cursor, LogSource, Page};
use crate::state::list_pane::PaneStatus;
use crate::state::viewport::{self, ScrollMove};
use crate::view_state::layout::message_height;
use std::ops::Range;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "event_session_tests.rs"]
mod tests;

/// Direction of a selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards newer events.
    Next,
    /// Towards older events.
    Prev,
}

/// Scope of a collapse toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleScope {
    /// Only the selected message.
    One,
    /// Every loaded message.
    All,
}

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No stream chosen.
    Empty,
    /// A stream is open; more pages may exist.
    Ready,
    /// A stream is open and its cursor reported the end of data.
    Exhausted,
}

/// The (group, stream) pair a session shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRef {
    /// Group name.
    pub group: String,
    /// Stream name.
    pub stream: String,
}

/// State of the event pane.
///
/// # Invariants
/// - `messages` only grows until the target changes
/// - `selected < messages.len()` when non-empty, `0` otherwise
/// - `line_offset` is non-decreasing by index and
///   `messages[i].line_offset() == sum(height[0..=i])`
#[derive(Debug)]
pub struct EventSession {
    target: Option<StreamRef>,
    cursor: Option<Cursor<LogEvent>>,
    messages: Vec<DisplayMessage>,
    selected: usize,
    /// Stored offset; may exceed the scrollable range after centering.
    offset: usize,
    content_width: usize,
    viewport_height: usize,
    total_lines: usize,
    status: Option<PaneStatus>,
}

impl EventSession {
    /// Empty session for a viewport of the given content size.
    pub fn new(content_width: usize, viewport_height: usize) -> Self {
        Self {
            target: None,
            cursor: None,
            messages: Vec::new(),
            selected: 0,
            offset: 0,
            content_width: content_width.max(1),
            viewport_height,
            total_lines: 0,
            status: None,
        }
    }

    /// Open `stream` of `group` and load its first page.
    ///
    /// Target, cursor, messages, selection and offset are replaced together
    /// before anything is fetched.
    pub fn select_group_stream(&mut self, source: &dyn LogSource, group: &str, stream: &str) {
        info!(group, stream, "Opening event stream");
        *self = Self {
            target: Some(StreamRef {
                group: group.to_string(),
                stream: stream.to_string(),
            }),
            cursor: Some(source.events(group, stream)),
            ..Self::new(self.content_width, self.viewport_height)
        };
        self.load_more();
    }

    /// Forget the current stream.
    pub fn clear(&mut self) {
        *self = Self::new(self.content_width, self.viewport_height);
    }

    /// Reopen the current stream from its first event with a fresh cursor.
    pub fn reload(&mut self, source: &dyn LogSource) {
        if let Some(StreamRef { group, stream }) = self.target.clone() {
            self.select_group_stream(source, &group, &stream);
        }
    }

    /// Fetch the next page of events.
    ///
    /// Returns the number of messages appended. No-op without a cursor or
    /// after exhaustion. A failure becomes the session status.
    pub fn load_more(&mut self) -> usize {
        let Some(cursor) = self.cursor.as_mut() else {
            return 0;
        };
        if cursor.is_exhausted() {
            self.status = Some(PaneStatus::Info("all events loaded".to_string()));
            return 0;
        }

        match cursor.next_page() {
            Ok(Page::Items(events)) => {
                let first_new = self.messages.len();
                let count = events.len();
                self.messages
                    .extend(events.into_iter().map(|e| DisplayMessage::from_event(e, true)));
                self.relayout_from(first_new);
                self.status = None;
                debug!(count, total = self.messages.len(), "Appended events");
                count
            }
            Ok(Page::Exhausted) => {
                self.status = Some(PaneStatus::Info("all events loaded".to_string()));
                0
            }
            Err(e) => {
                warn!(error = %e, "Failed to load events");
                self.status = Some(PaneStatus::Error(format!(
                    "failed to load events: {e} (L retry, R reload)"
                )));
                0
            }
        }
    }

    /// Move the selection by one message and recenter. No wrap.
    ///
    /// Returns whether the selection changed.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        let moved = match direction {
            Direction::Next if self.selected + 1 < self.messages.len() => {
                self.selected += 1;
                true
            }
            Direction::Prev if self.selected > 0 => {
                self.selected -= 1;
                true
            }
            _ => false,
        };
        if moved {
            self.center_on_selected();
        }
        moved
    }

    /// Flip collapse flags, relayout everything and recenter.
    ///
    /// `All` expands every message if any is collapsed, otherwise collapses
    /// every message.
    pub fn toggle_collapse(&mut self, scope: ToggleScope) {
        if self.messages.is_empty() {
            return;
        }
        match scope {
            ToggleScope::One => {
                let index = self.clamped_selection();
                let message = &mut self.messages[index];
                message.set_collapsed(!message.is_collapsed());
            }
            ToggleScope::All => {
                let collapse = !self.messages.iter().any(DisplayMessage::is_collapsed);
                for message in &mut self.messages {
                    message.set_collapsed(collapse);
                }
            }
        }
        self.relayout_from(0);
        self.center_on_selected();
    }

    /// Copy the selected message, formatted as expanded, to `clipboard`.
    ///
    /// The outcome is reported through the session status.
    pub fn copy_selected(&mut self, clipboard: &mut dyn Clipboard) {
        let Some(message) = self.selected_message() else {
            return;
        };
        let text = format_message(message.content(), true);
        self.status = Some(match clipboard.set(&text) {
            Ok(()) => PaneStatus::Info(format!("copied {} bytes", text.len())),
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                PaneStatus::Error(e.to_string())
            }
        });
    }

    /// Update the viewport size. Relayouts when the width changes and
    /// recenters on the selection.
    pub fn resize(&mut self, content_width: usize, viewport_height: usize) {
        let content_width = content_width.max(1);
        let width_changed = content_width != self.content_width;
        self.content_width = content_width;
        self.viewport_height = viewport_height;
        if width_changed {
            self.relayout_from(0);
        }
        self.center_on_selected();
    }

    /// Move the viewport without touching the selection.
    pub fn scroll(&mut self, movement: ScrollMove) {
        self.offset = viewport::scroll(self.offset, movement, self.total_lines, self.viewport_height);
    }

    /// Recompute heights and cumulative offsets from `start` to the end.
    fn relayout_from(&mut self, start: usize) {
        let mut running = match start.checked_sub(1) {
            Some(prev) => self.messages[prev].line_offset(),
            None => 0,
        };
        for message in &mut self.messages[start..] {
            let height = message_height(message, self.content_width);
            running += height;
            message.set_layout(height, running);
        }
        self.total_lines = running;
    }

    fn center_on_selected(&mut self) {
        if let Some(message) = self.messages.get(self.clamped_selection()) {
            self.offset =
                viewport::center_offset(message.start_line(), message.height(), self.viewport_height);
        }
    }

    fn clamped_selection(&self) -> usize {
        debug_assert!(self.messages.is_empty() || self.selected < self.messages.len());
        self.selected.min(self.messages.len().saturating_sub(1))
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        match &self.cursor {
            None => SessionState::Empty,
            Some(cursor) if cursor.is_exhausted() => SessionState::Exhausted,
            Some(_) => SessionState::Ready,
        }
    }

    /// Stream currently shown.
    pub fn target(&self) -> Option<&StreamRef> {
        self.target.as_ref()
    }

    /// Loaded messages in event order.
    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    /// Index of the selected message.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected message.
    pub fn selected_message(&self) -> Option<&DisplayMessage> {
        self.messages.get(self.clamped_selection())
    }

    /// Stored viewport offset.
    pub fn viewport_offset(&self) -> usize {
        self.offset
    }

    /// Offset to draw with: the stored one clamped to the scrollable range.
    pub fn render_offset(&self) -> usize {
        viewport::clamp_offset(self.offset, self.total_lines, self.viewport_height)
    }

    /// Total rendered lines of all messages.
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Visible rows.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Columns available to message text.
    pub fn content_width(&self) -> usize {
        self.content_width
    }

    /// Whether more pages may be fetched.
    pub fn has_more(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Number of fetches issued by the current cursor.
    pub fn fetch_count(&self) -> usize {
        self.cursor.as_ref().map_or(0, Cursor::fetch_count)
    }

    /// Inline status, if any.
    pub fn status(&self) -> Option<&PaneStatus> {
        self.status.as_ref()
    }

    /// Scroll position for the footer.
    pub fn scroll_percent(&self) -> u16 {
        viewport::scroll_percent(self.render_offset(), self.total_lines, self.viewport_height)
    }

    /// Indices of messages with at least one row inside the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        let top = self.render_offset();
        let bottom = top + self.viewport_height;
        // First message ending below `top`.
        let first = self.messages.partition_point(|m| m.line_offset() <= top);
        let last = self.messages.partition_point(|m| m.start_line() < bottom);
        first..last.max(first)
    }
}
