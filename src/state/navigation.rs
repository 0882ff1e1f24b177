//! Navigation controller: focus, input routing and selection propagation.
//!
//! Owns the three panes and the collaborators they need. Every user action
//! goes through [`NavigationController::handle_action`] and is delivered to
//! the focused pane only. Choosing a group resets the stream list and clears
//! the event session in one step; choosing a stream opens it in the session.

use crate::clipboard::Clipboard;
use crate::model::KeyAction;
use crate::source::LogSource;
use crate::state::event_session::{Direction, EventSession, ToggleScope};
use crate::state::focus::PaneFocus;
use crate::state::layout::{PaneLayout, DEFAULT_LIST_WIDTH_PERCENT};
use crate::state::list_pane::{GroupItem, ListItem, ListPane, StreamItem};
use crate::state::viewport::ScrollMove;
use ratatui::layout::Rect;
use tracing::{debug, info};

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Exit the application.
    Quit,
}

/// Keystrokes delivered while a list filter is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Printable character.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Keep the query and leave edit mode.
    Confirm,
    /// Drop the query and leave edit mode.
    Cancel,
}

/// Construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Prefix applied to the group listing.
    pub group_prefix: String,
    /// Share of the width used by the list column.
    pub list_width_percent: u16,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            group_prefix: String::new(),
            list_width_percent: DEFAULT_LIST_WIDTH_PERCENT,
        }
    }
}

/// Root of the UI state.
pub struct NavigationController {
    source: Box<dyn LogSource>,
    clipboard: Box<dyn Clipboard>,
    groups: ListPane<GroupItem>,
    streams: ListPane<StreamItem>,
    session: EventSession,
    focus: PaneFocus,
    help_visible: bool,
    active_group: Option<String>,
    // Prefix the group list was last queried with
    group_query: String,
    options: NavigationOptions,
    layout: PaneLayout,
}

impl NavigationController {
    /// Controller with empty panes and focus on the group list.
    ///
    /// Nothing is fetched until [`NavigationController::start`].
    pub fn new(
        source: Box<dyn LogSource>,
        clipboard: Box<dyn Clipboard>,
        options: NavigationOptions,
    ) -> Self {
        let layout = PaneLayout::default();
        let (width, height) = layout.event_viewport();
        Self {
            source,
            clipboard,
            groups: ListPane::new("Log Groups"),
            streams: ListPane::new("Log Streams"),
            session: EventSession::new(width, height),
            focus: PaneFocus::Groups,
            help_visible: false,
            active_group: None,
            group_query: options.group_prefix.clone(),
            options,
            layout,
        }
    }

    /// Load the group list and, given `initial_group`, open it.
    ///
    /// `initial_group` narrows the group listing. When it names a group
    /// exactly, or matches exactly one group, that group is chosen, its
    /// newest stream is opened and focus moves to the events.
    pub fn start(&mut self, initial_group: Option<&str>) {
        self.group_query = initial_group
            .unwrap_or(&self.options.group_prefix)
            .to_string();
        self.groups.reset(self.source.groups(&self.group_query));
        self.groups.load_more();

        let Some(wanted) = initial_group else {
            self.focus = PaneFocus::Groups;
            return;
        };

        let found = self.groups.select_title(wanted) || self.groups.visible_items().len() == 1;
        let Some(name) = found
            .then(|| self.groups.selected_item().map(|g| g.title().to_string()))
            .flatten()
        else {
            info!(group = wanted, "Initial group not found, showing group list");
            self.focus = PaneFocus::Groups;
            return;
        };

        self.choose_group(&name);
        if self.streams.selected_item().is_some() {
            self.choose_stream();
            self.focus = PaneFocus::Events;
        } else {
            self.focus = PaneFocus::Streams;
        }
    }

    /// Apply one user action.
    pub fn handle_action(&mut self, action: KeyAction) -> Flow {
        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::Help => {
                self.help_visible = !self.help_visible;
                return Flow::Continue;
            }
            _ if self.help_visible => return Flow::Continue,
            KeyAction::NextPane => self.focus = self.focus.next(),
            KeyAction::PrevPane => self.focus = self.focus.previous(),
            _ => match self.focus {
                PaneFocus::Groups => self.group_action(action),
                PaneFocus::Streams => self.stream_action(action),
                PaneFocus::Events => self.event_action(action),
            },
        }
        Flow::Continue
    }

    fn group_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextItem => self.groups.select_next(),
            KeyAction::PrevItem => self.groups.select_prev(),
            KeyAction::Select => {
                if let Some(name) = self.groups.selected_item().map(|g| g.title().to_string()) {
                    self.choose_group(&name);
                }
            }
            KeyAction::LoadMore => {
                self.groups.load_more();
            }
            KeyAction::Reload => {
                self.groups.reset(self.source.groups(&self.group_query));
                self.groups.load_more();
            }
            KeyAction::StartFilter => self.groups.start_filter(),
            _ => {}
        }
    }

    fn stream_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextItem => self.streams.select_next(),
            KeyAction::PrevItem => self.streams.select_prev(),
            KeyAction::Select => self.choose_stream(),
            KeyAction::LoadMore => {
                self.streams.load_more();
            }
            KeyAction::Reload => {
                if let Some(group) = self.active_group.clone() {
                    self.streams.reset(self.source.streams(&group, ""));
                    self.streams.load_more();
                }
            }
            KeyAction::StartFilter => self.streams.start_filter(),
            _ => {}
        }
    }

    fn event_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextItem => {
                self.session.move_selection(Direction::Next);
            }
            KeyAction::PrevItem => {
                self.session.move_selection(Direction::Prev);
            }
            KeyAction::Select | KeyAction::ToggleCollapse => {
                self.session.toggle_collapse(ToggleScope::One)
            }
            KeyAction::ToggleCollapseAll => self.session.toggle_collapse(ToggleScope::All),
            KeyAction::Copy => self.session.copy_selected(self.clipboard.as_mut()),
            KeyAction::LoadMore => {
                self.session.load_more();
            }
            KeyAction::Reload => self.session.reload(self.source.as_ref()),
            KeyAction::ScrollUp => self.session.scroll(ScrollMove::LineUp),
            KeyAction::ScrollDown => self.session.scroll(ScrollMove::LineDown),
            KeyAction::HalfPageUp => self.session.scroll(ScrollMove::HalfPageUp),
            KeyAction::HalfPageDown => self.session.scroll(ScrollMove::HalfPageDown),
            KeyAction::PageUp => self.session.scroll(ScrollMove::PageUp),
            KeyAction::PageDown => self.session.scroll(ScrollMove::PageDown),
            KeyAction::ScrollToTop => self.session.scroll(ScrollMove::Top),
            KeyAction::ScrollToBottom => self.session.scroll(ScrollMove::Bottom),
            _ => {}
        }
    }

    /// Make `group` active: new stream cursor, first stream page, empty
    /// event session. Focus does not move.
    pub fn choose_group(&mut self, group: &str) {
        info!(group, "Group chosen");
        self.active_group = Some(group.to_string());
        self.streams.reset(self.source.streams(group, ""));
        self.session.clear();
        self.streams.load_more();
    }

    /// Open the selected stream of the active group.
    pub fn choose_stream(&mut self) {
        let Some(group) = self.active_group.clone() else {
            return;
        };
        let Some(stream) = self.streams.selected_item().map(|s| s.title().to_string()) else {
            return;
        };
        self.session
            .select_group_stream(self.source.as_ref(), &group, &stream);
    }

    /// Whether keystrokes should go to a list filter.
    pub fn is_editing_filter(&self) -> bool {
        match self.focus {
            PaneFocus::Groups => self.groups.is_editing_filter(),
            PaneFocus::Streams => self.streams.is_editing_filter(),
            PaneFocus::Events => false,
        }
    }

    /// Deliver a keystroke to the focused pane's filter.
    pub fn filter_input(&mut self, key: FilterKey) {
        match self.focus {
            PaneFocus::Groups => apply_filter_key(&mut self.groups, key),
            PaneFocus::Streams => apply_filter_key(&mut self.streams, key),
            PaneFocus::Events => {}
        }
    }

    /// Recompute pane geometry for a terminal of `width` x `height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = PaneLayout::compute(
            Rect::new(0, 0, width, height),
            self.options.list_width_percent,
        );
        let (content_width, viewport_height) = self.layout.event_viewport();
        debug!(width, height, content_width, viewport_height, "Resized");
        self.session.resize(content_width, viewport_height);
    }

    /// Focused pane.
    pub fn focus(&self) -> PaneFocus {
        self.focus
    }

    /// Move focus directly.
    pub fn set_focus(&mut self, focus: PaneFocus) {
        self.focus = focus;
    }

    /// Group list.
    pub fn groups(&self) -> &ListPane<GroupItem> {
        &self.groups
    }

    /// Stream list of the active group.
    pub fn streams(&self) -> &ListPane<StreamItem> {
        &self.streams
    }

    /// Event session.
    pub fn session(&self) -> &EventSession {
        &self.session
    }

    /// Group whose streams are listed.
    pub fn active_group(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    /// Whether the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Current pane geometry.
    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }
}

fn apply_filter_key<T: ListItem>(pane: &mut ListPane<T>, key: FilterKey) {
    match key {
        FilterKey::Char(c) => pane.push_filter_char(c),
        FilterKey::Backspace => pane.pop_filter_char(),
        FilterKey::Confirm => pane.apply_filter(),
        FilterKey::Cancel => pane.clear_filter(),
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("focus", &self.focus)
            .field("active_group", &self.active_group)
            .field("help_visible", &self.help_visible)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
