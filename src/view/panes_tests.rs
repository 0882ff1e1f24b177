//! Tests for pane rendering.

use super::*;
use crate::clipboard::testing::MockClipboard;
use crate::model::{KeyAction, LogEvent};
use crate::source::MemorySource;
use crate::state::{FilterKey, NavigationOptions};
use crate::view::styles::{ColorConfig, FOCUSED_BORDER, UNFOCUSED_BORDER};
use crate::view::test_support::buffer_to_string;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn source() -> MemorySource {
    MemorySource::new()
        .with_stream(
            "/app/api",
            "new",
            vec![
                LogEvent::new(1_000, r#"start {"port":8080}"#),
                LogEvent::new(2_000, "second line"),
                LogEvent::new(3_000, "third line"),
            ],
        )
        .with_stream("/app/worker", "w", vec![LogEvent::new(5_000, "worker 0")])
}

fn controller(source: &MemorySource) -> NavigationController {
    let mut nav = NavigationController::new(
        Box::new(source.clone()),
        Box::new(MockClipboard::default()),
        NavigationOptions::default(),
    );
    nav.resize(WIDTH, HEIGHT);
    nav
}

fn draw(nav: &NavigationController, colors: bool) -> Terminal<TestBackend> {
    let styles = PaneStyles::with_color_config(ColorConfig::new(colors));
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal
        .draw(|frame| render_layout(frame, nav, &styles, None))
        .unwrap();
    terminal
}

fn render(nav: &NavigationController) -> String {
    buffer_to_string(draw(nav, false).backend().buffer())
}

#[test]
fn group_pane_lists_loaded_groups() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(None);

    let text = render(&nav);

    assert!(text.contains("Log Groups"));
    assert!(text.contains("/app/api"));
    assert!(text.contains("/app/worker"));
    assert!(text.contains("choose a stream"));
}

#[test]
fn focused_pane_gets_the_accent_border() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(None);

    let terminal = draw(&nav, true);
    let buffer = terminal.backend().buffer();
    let groups = nav.layout().groups;
    let events = nav.layout().events;

    assert_eq!(buffer[(groups.x, groups.y)].fg, FOCUSED_BORDER);
    assert_eq!(buffer[(events.x, events.y)].fg, UNFOCUSED_BORDER);
}

#[test]
fn event_pane_shows_header_gutter_and_footer() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(Some("/app/api"));

    let text = render(&nav);

    assert!(text.contains("LogGroup: /app/api  LogStream: new"), "{text}");
    assert!(text.contains("▌ start {\"port\":8080}"), "{text}");
    assert!(text.contains("1/3"), "{text}");
    assert!(text.contains("1970-01-01 00:00:01.000 UTC"), "{text}");
}

#[test]
fn expanded_message_renders_pretty_json() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(Some("/app/api"));

    nav.handle_action(KeyAction::ToggleCollapse);
    let text = render(&nav);

    assert!(text.contains("▌ start"), "{text}");
    assert!(text.contains("▌   \"port\": 8080"), "{text}");
    assert!(text.contains("  second line"), "{text}");
}

#[test]
fn moving_selection_moves_the_gutter() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(Some("/app/api"));

    nav.handle_action(KeyAction::NextItem);
    let text = render(&nav);

    assert!(text.contains("▌ second line"), "{text}");
    assert!(text.contains("2/3"), "{text}");
}

#[test]
fn failed_fetch_shows_inline_error() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(None);
    source.fail_next_fetches(1);

    nav.handle_action(KeyAction::Reload);
    let text = render(&nav);

    assert!(text.contains("failed to load groups"), "{text}");
}

#[test]
fn filter_query_is_echoed_while_editing() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(None);

    nav.handle_action(KeyAction::StartFilter);
    nav.filter_input(FilterKey::Char('w'));
    nav.filter_input(FilterKey::Char('o'));
    let text = render(&nav);

    assert!(text.contains("/wo▏"), "{text}");
    assert!(!text.contains("/app/api"), "{text}");
    assert!(text.contains("Enter keep"), "{text}");
}

#[test]
fn tiny_terminal_does_not_panic() {
    let source = source();
    let mut nav = controller(&source);
    nav.start(Some("/app/api"));
    nav.resize(5, 3);

    let styles = PaneStyles::with_color_config(ColorConfig::new(false));
    let mut terminal = Terminal::new(TestBackend::new(5, 3)).unwrap();
    terminal
        .draw(|frame| render_layout(frame, &nav, &styles, None))
        .unwrap();
}
