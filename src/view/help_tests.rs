//! Tests for help overlay widget

use super::*;
use crate::view::styles::ColorConfig;
use crate::view::test_support::buffer_to_string;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(width: u16, height: u16) -> String {
    let styles = PaneStyles::with_color_config(ColorConfig::from_env_and_args(true));
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_help_overlay(frame, &styles))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn render_help_overlay_shows_rounded_modal() {
    let text = render(80, 40);
    assert!(text.contains('╭'), "overlay should have a rounded border:\n{text}");
    assert!(text.contains("Keyboard Shortcuts"));
}

#[test]
fn render_help_overlay_lists_every_category() {
    let text = render(100, 50);
    for heading in ["Navigation", "Events", "Data", "Application"] {
        assert!(text.contains(heading), "missing {heading}:\n{text}");
    }
}

#[test]
fn render_help_overlay_names_core_keys() {
    let text = render(100, 50);
    assert!(text.contains("Shift+Tab"));
    assert!(text.contains("Collapse or expand all"));
    assert!(text.contains("Load more"));
    assert!(text.contains("Quit"));
}

#[test]
fn centered_rect_is_centered() {
    let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
    assert_eq!(rect, Rect::new(25, 10, 50, 20));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let _ = render(4, 2);
}

#[test]
fn content_has_one_heading_per_category() {
    let styles = PaneStyles::with_color_config(ColorConfig::from_env_and_args(true));
    let lines = build_help_content(&styles);
    let rows: usize = SHORTCUTS.iter().map(|(_, rows)| rows.len() + 1).sum();
    assert_eq!(lines.len(), rows + SHORTCUTS.len() - 1);
}
