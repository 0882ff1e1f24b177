//! Paginated, filterable list panes (groups and streams).
//!
//! One generic [`ListPane`] serves both the group list and the stream list.
//! Items are tagged types implementing [`ListItem`], so each pane knows its
//! item kind at compile time.

use crate::model::{format_timestamp, DisplayMessage, LogEvent, LogGroup, LogStream};
use crate::source::{Cursor, Page};
use tracing::{debug, warn};

#[cfg(test)]
#[path = "list_pane_tests.rs"]
mod tests;

/// Shared display capability of everything shown in a list.
pub trait ListItem {
    /// Record type delivered by the source cursor.
    type Record;

    /// Plural noun used in status text ("groups", "streams").
    const NOUN: &'static str;

    /// Build an item from a fetched record.
    fn from_record(record: Self::Record) -> Self;

    /// Primary text.
    fn title(&self) -> &str;

    /// Secondary text shown after the title. May be empty.
    fn description(&self) -> String;

    /// Text matched by the pane filter.
    fn filter_value(&self) -> &str {
        self.title()
    }
}

/// Item of the group pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem(pub LogGroup);

impl ListItem for GroupItem {
    type Record = LogGroup;
    const NOUN: &'static str = "groups";

    fn from_record(record: LogGroup) -> Self {
        Self(record)
    }

    fn title(&self) -> &str {
        self.0.name()
    }

    fn description(&self) -> String {
        String::new()
    }
}

/// Item of the stream pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamItem(pub LogStream);

impl ListItem for StreamItem {
    type Record = LogStream;
    const NOUN: &'static str = "streams";

    fn from_record(record: LogStream) -> Self {
        Self(record)
    }

    fn title(&self) -> &str {
        self.0.name()
    }

    fn description(&self) -> String {
        format_timestamp(self.0.first_event_time().timestamp_millis())
    }
}

impl ListItem for DisplayMessage {
    type Record = LogEvent;
    const NOUN: &'static str = "events";

    /// Events arrive collapsed.
    fn from_record(record: LogEvent) -> Self {
        DisplayMessage::from_event(record, true)
    }

    fn title(&self) -> &str {
        self.content()
    }

    fn description(&self) -> String {
        format_timestamp(self.timestamp())
    }
}

/// Filter state machine of a list pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    /// No filter; every item is visible.
    #[default]
    Inactive,
    /// The user is typing a query; it already narrows the list.
    Editing(String),
    /// Query confirmed with Enter.
    Applied(String),
}

impl FilterState {
    /// Current query, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            FilterState::Inactive => None,
            FilterState::Editing(q) | FilterState::Applied(q) => Some(q),
        }
    }
}

/// Inline status line of a pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneStatus {
    /// Informational hint.
    Info(String),
    /// A recoverable failure.
    Error(String),
}

impl PaneStatus {
    /// Status text.
    pub fn text(&self) -> &str {
        match self {
            PaneStatus::Info(t) | PaneStatus::Error(t) => t,
        }
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, PaneStatus::Error(_))
    }
}

/// A paginated, filterable list.
///
/// # Invariants
/// - `selected` indexes the visible (filtered) items and is `0` when none
///   are visible
/// - items are append-only until [`ListPane::reset`] or [`ListPane::clear`]
#[derive(Debug)]
pub struct ListPane<T: ListItem> {
    title: String,
    items: Vec<T>,
    cursor: Option<Cursor<T::Record>>,
    selected: usize,
    filter: FilterState,
    status: Option<PaneStatus>,
}

impl<T: ListItem> ListPane<T> {
    /// Empty pane without a cursor.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            cursor: None,
            selected: 0,
            filter: FilterState::Inactive,
            status: None,
        }
    }

    /// Pane title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Drop everything and start over with `cursor`. Does not fetch.
    pub fn reset(&mut self, cursor: Cursor<T::Record>) {
        self.clear();
        self.cursor = Some(cursor);
    }

    /// Drop items, cursor, filter and status.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
        self.selected = 0;
        self.filter = FilterState::Inactive;
        self.status = None;
    }

    /// Fetch one more page.
    ///
    /// Returns the number of items appended. Failures become an error status;
    /// end of data becomes an informational one.
    pub fn load_more(&mut self) -> usize {
        let Some(cursor) = self.cursor.as_mut() else {
            return 0;
        };
        if cursor.is_exhausted() {
            self.status = Some(PaneStatus::Info(format!("all {} loaded", T::NOUN)));
            return 0;
        }

        match cursor.next_page() {
            Ok(Page::Items(records)) => {
                let count = records.len();
                self.items.extend(records.into_iter().map(T::from_record));
                self.status = None;
                debug!(pane = %self.title, count, total = self.items.len(), "Loaded items");
                count
            }
            Ok(Page::Exhausted) => {
                self.status = Some(PaneStatus::Info(format!("all {} loaded", T::NOUN)));
                0
            }
            Err(e) => {
                warn!(pane = %self.title, error = %e, "Failed to load items");
                self.status = Some(PaneStatus::Error(format!(
                    "failed to load {}: {e} (L retry, R reload)",
                    T::NOUN
                )));
                0
            }
        }
    }

    /// Whether a cursor exists and has not reported the end of data.
    pub fn has_more(&self) -> bool {
        self.cursor.as_ref().is_some_and(|c| !c.is_exhausted())
    }

    /// Whether a cursor is attached.
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// All loaded items, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Loaded items passing the filter, in load order.
    pub fn visible_items(&self) -> Vec<&T> {
        match self.filter.query() {
            None | Some("") => self.items.iter().collect(),
            Some(query) => {
                let needle = query.to_lowercase();
                self.items
                    .iter()
                    .filter(|item| item.filter_value().to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    /// Index of the selection within [`ListPane::visible_items`].
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected visible item.
    pub fn selected_item(&self) -> Option<&T> {
        self.visible_items().get(self.selected).copied()
    }

    /// Move the selection down one item. No wrap.
    pub fn select_next(&mut self) {
        let len = self.visible_items().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move the selection up one item. No wrap.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the visible item whose title equals `title`.
    pub fn select_title(&mut self, title: &str) -> bool {
        match self.visible_items().iter().position(|item| item.title() == title) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Current filter state.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Whether keystrokes go to the filter query.
    pub fn is_editing_filter(&self) -> bool {
        matches!(self.filter, FilterState::Editing(_))
    }

    /// Enter filter editing, keeping any applied query.
    pub fn start_filter(&mut self) {
        let query = self.filter.query().unwrap_or_default().to_string();
        self.filter = FilterState::Editing(query);
    }

    /// Append a character to the query being edited.
    pub fn push_filter_char(&mut self, c: char) {
        if let FilterState::Editing(query) = &mut self.filter {
            query.push(c);
            self.clamp_selection();
        }
    }

    /// Remove the last character of the query being edited.
    pub fn pop_filter_char(&mut self) {
        if let FilterState::Editing(query) = &mut self.filter {
            query.pop();
            self.clamp_selection();
        }
    }

    /// Confirm the query. An empty query turns the filter off.
    pub fn apply_filter(&mut self) {
        if let FilterState::Editing(query) = &self.filter {
            self.filter = if query.is_empty() {
                FilterState::Inactive
            } else {
                FilterState::Applied(query.clone())
            };
            self.clamp_selection();
        }
    }

    /// Turn the filter off.
    pub fn clear_filter(&mut self) {
        self.filter = FilterState::Inactive;
        self.clamp_selection();
    }

    /// Inline status, if any.
    pub fn status(&self) -> Option<&PaneStatus> {
        self.status.as_ref()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
