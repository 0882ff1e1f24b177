//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Which pane receives an action is decided by the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Item navigation
    /// Move the selection to the next item. Default: j/↓
    NextItem,
    /// Move the selection to the previous item. Default: k/↑
    PrevItem,
    /// Choose the selected group or stream; toggles collapse in the event pane. Default: Enter
    Select,

    // Pane focus
    /// Focus the next pane (Groups → Streams → Events → Groups). Default: Tab
    NextPane,
    /// Focus the previous pane. Default: Shift+Tab
    PrevPane,

    // Viewport scrolling (event pane)
    /// Scroll up three lines. Default: K/Shift+↑
    ScrollUp,
    /// Scroll down three lines. Default: J/Shift+↓
    ScrollDown,
    /// Scroll up half a page. Default: u/Ctrl+u
    HalfPageUp,
    /// Scroll down half a page. Default: d/Ctrl+d
    HalfPageDown,
    /// Scroll up a full page. Default: b/Page Up
    PageUp,
    /// Scroll down a full page. Default: f/Page Down
    PageDown,
    /// Jump to the first line. Default: g/Home
    ScrollToTop,
    /// Jump to the last line. Default: G/End
    ScrollToBottom,

    // Messages
    /// Toggle collapse of the selected message. Default: Space
    ToggleCollapse,
    /// Expand everything if anything is collapsed, otherwise collapse everything. Default: C
    ToggleCollapseAll,
    /// Copy the selected message to the clipboard. Default: c
    Copy,

    // Data
    /// Fetch the next page for the focused pane. Default: L
    LoadMore,
    /// Discard loaded data and fetch from the start with a fresh cursor. Default: R
    Reload,
    /// Start typing a filter in a list pane. Default: /
    StartFilter,

    // Application
    /// Show or hide the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Actions that only move the event viewport.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::HalfPageUp
                | KeyAction::HalfPageDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_actions_are_classified() {
        assert!(KeyAction::ScrollUp.is_scroll());
        assert!(KeyAction::HalfPageDown.is_scroll());
        assert!(KeyAction::ScrollToBottom.is_scroll());
    }

    #[test]
    fn selection_actions_are_not_scroll() {
        assert!(!KeyAction::NextItem.is_scroll());
        assert!(!KeyAction::ToggleCollapse.is_scroll());
        assert!(!KeyAction::Quit.is_scroll());
    }
}
