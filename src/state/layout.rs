//! Screen geometry shared by the controller and the view.
//!
//! ```text
//! ┌ hint bar ─────────────────────────────────────┐
//! ├ groups ──────┬ events ────────────────────────┤
//! │              │ header                         │
//! ├ streams ─────┤ messages…                      │
//! │              │ footer                         │
//! └──────────────┴────────────────────────────────┘
//! ```
//!
//! The left column takes `list_width_percent` of the width, split in half
//! between groups (top) and streams (bottom). The event pane takes the rest.

use crate::view_state::layout::content_width;
use ratatui::layout::Rect;

/// Rows used by the key hint bar at the top.
pub const HINT_BAR_HEIGHT: u16 = 1;

/// Rows inside the event pane border used by its header and footer.
pub const EVENT_CHROME_ROWS: u16 = 2;

/// Default share of the width given to the group/stream column.
pub const DEFAULT_LIST_WIDTH_PERCENT: u16 = 33;

/// Areas of every pane for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneLayout {
    /// Key hints.
    pub hint_bar: Rect,
    /// Group list, including border.
    pub groups: Rect,
    /// Stream list, including border.
    pub streams: Rect,
    /// Event pane, including border.
    pub events: Rect,
}

impl PaneLayout {
    /// Split `area` into panes.
    pub fn compute(area: Rect, list_width_percent: u16) -> Self {
        let percent = list_width_percent.clamp(10, 90);
        let hint_height = HINT_BAR_HEIGHT.min(area.height);
        let body_height = area.height - hint_height;
        let body_y = area.y + hint_height;

        let left_width = u16::try_from(u32::from(area.width) * u32::from(percent) / 100)
            .unwrap_or(area.width);
        let groups_height = body_height / 2;

        Self {
            hint_bar: Rect::new(area.x, area.y, area.width, hint_height),
            groups: Rect::new(area.x, body_y, left_width, groups_height),
            streams: Rect::new(
                area.x,
                body_y + groups_height,
                left_width,
                body_height - groups_height,
            ),
            events: Rect::new(
                area.x + left_width,
                body_y,
                area.width - left_width,
                body_height,
            ),
        }
    }

    /// Message text columns and visible rows of the event pane.
    pub fn event_viewport(&self) -> (usize, usize) {
        let inner_width = self.events.width.saturating_sub(2);
        let inner_height = self
            .events
            .height
            .saturating_sub(2)
            .saturating_sub(EVENT_CHROME_ROWS);
        (
            content_width(usize::from(inner_width)),
            usize::from(inner_height),
        )
    }

    /// Message area inside the event pane border, between header and footer.
    pub fn event_body(&self) -> Rect {
        let (_, rows) = self.event_viewport();
        Rect::new(
            self.events.x + 1,
            self.events.y + 2,
            self.events.width.saturating_sub(2),
            u16::try_from(rows).unwrap_or(0),
        )
    }
}
