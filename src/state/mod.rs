//! UI state machine (pure).
//!
//! All state transitions are plain method calls testable without a terminal.
//! The view reads this state; only [`navigation::NavigationController`]
//! mutates it in response to user actions.

pub mod event_session;
pub mod focus;
pub mod layout;
pub mod list_pane;
pub mod navigation;
pub mod viewport;

// Re-export for convenience
pub use event_session::{Direction, EventSession, SessionState, StreamRef, ToggleScope};
pub use focus::PaneFocus;
pub use layout::PaneLayout;
pub use list_pane::{FilterState, GroupItem, ListItem, ListPane, PaneStatus, StreamItem};
pub use navigation::{FilterKey, Flow, NavigationController, NavigationOptions};
pub use viewport::{center_offset, ScrollMove};
