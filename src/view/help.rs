//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the shortcuts grouped by category.
//! Toggled by `?`.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::PaneStyles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut table: category heading, then `(keys, description)` rows.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓ k/↑", "Next / previous item"),
            ("Enter", "Choose group or stream"),
            ("Tab", "Focus next pane"),
            ("Shift+Tab", "Focus previous pane"),
        ],
    ),
    (
        "Events",
        &[
            ("Space/Enter", "Collapse or expand message"),
            ("C", "Collapse or expand all"),
            ("c", "Copy message"),
            ("K/J", "Scroll three lines"),
            ("u/d", "Half page up / down"),
            ("b/f", "Page up / down"),
            ("g/G", "Top / bottom"),
        ],
    ),
    (
        "Data",
        &[
            ("L", "Load more"),
            ("R", "Reload"),
            ("/", "Filter list (Enter keep, Esc clear)"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Esc/Ctrl+c", "Quit")],
    ),
];

/// Width of the key column.
const KEY_COLUMN: usize = 15;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &PaneStyles) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: popup_area.height.min(1),
    };
    let hint = Paragraph::new(Line::from(Span::styled(" Press ? to close ", styles.muted)))
        .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(styles: &PaneStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (heading, rows)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*heading, styles.heading)));
        for (keys, description) in rows.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN$}"), styles.key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
