//! End-to-end navigation over a log tree on disk.
//!
//! Drives the controller with key actions the same way the terminal shell
//! does and checks what each pane ends up holding.

use lgv::clipboard::{Clipboard, ClipboardError};
use lgv::model::KeyAction;
use lgv::source::{DirectorySource, PageSizes};
use lgv::state::{NavigationController, NavigationOptions, PaneFocus, SessionState};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Log tree under the temp dir, removed on drop.
struct LogTree(PathBuf);

impl LogTree {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("lgv_it_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        LogTree(root)
    }

    fn write(&self, relative: &str, lines: &[&str]) {
        let path = self.0.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, lines.join("\n")).unwrap();
    }
}

impl Drop for LogTree {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[derive(Clone, Default)]
struct RecordingClipboard(Rc<RefCell<Vec<String>>>);

impl Clipboard for RecordingClipboard {
    fn set(&mut self, contents: &str) -> Result<(), ClipboardError> {
        self.0.borrow_mut().push(contents.to_string());
        Ok(())
    }
}

fn fixture(name: &str) -> LogTree {
    let tree = LogTree::new(name);
    tree.write(
        "app/api/2024-03-01",
        &[
            r#"{"timestamp": 1709251200000, "message": "GET /health 200"}"#,
            r#"{"timestamp": 1709251201000, "message": "request done {\"ms\":12,\"ok\":true}"}"#,
            "plain line without envelope",
        ],
    );
    tree.write("app/worker/run-1", &["worker started"]);
    tree.write("infra/db/slow", &["query took 2s"]);
    tree
}

fn controller(tree: &LogTree, page_sizes: PageSizes) -> (NavigationController, RecordingClipboard) {
    let source = DirectorySource::open(&tree.0, page_sizes).unwrap();
    let clipboard = RecordingClipboard::default();
    let mut nav = NavigationController::new(
        Box::new(source),
        Box::new(clipboard.clone()),
        NavigationOptions::default(),
    );
    nav.resize(120, 40);
    (nav, clipboard)
}

#[test]
fn browse_from_group_to_event_and_copy() {
    let tree = fixture("browse");
    let (mut nav, clipboard) = controller(&tree, PageSizes::default());
    nav.start(None);

    let groups: Vec<String> = nav.groups().items().iter().map(|g| g.0.name().to_string()).collect();
    assert_eq!(groups, vec!["/app/api", "/app/worker", "/infra/db"]);

    nav.handle_action(KeyAction::Select);
    nav.handle_action(KeyAction::NextPane);
    nav.handle_action(KeyAction::Select);
    nav.handle_action(KeyAction::NextPane);
    assert_eq!(nav.focus(), PaneFocus::Events);

    let session = nav.session();
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.messages()[0].content(), "GET /health 200");
    assert_eq!(session.messages()[0].timestamp(), 1_709_251_200_000);
    assert_eq!(session.messages()[2].content(), "plain line without envelope");

    nav.handle_action(KeyAction::NextItem);
    nav.handle_action(KeyAction::Copy);
    assert_eq!(
        *clipboard.0.borrow(),
        vec!["request done\n{\n  \"ms\": 12,\n  \"ok\": true\n}".to_string()]
    );
}

#[test]
fn startup_group_argument_opens_its_stream() {
    let tree = fixture("startup");
    let (mut nav, _) = controller(&tree, PageSizes::default());

    nav.start(Some("/infra"));

    assert_eq!(nav.active_group(), Some("/infra/db"));
    assert_eq!(nav.focus(), PaneFocus::Events);
    assert_eq!(nav.session().messages()[0].content(), "query took 2s");
}

#[test]
fn events_load_page_by_page_until_exhausted() {
    let tree = fixture("paging");
    let sizes = PageSizes {
        events: 2,
        ..PageSizes::default()
    };
    let (mut nav, _) = controller(&tree, sizes);
    nav.start(Some("/app/api"));

    assert_eq!(nav.session().messages().len(), 2);
    assert_eq!(nav.session().state(), SessionState::Ready);

    nav.handle_action(KeyAction::LoadMore);
    assert_eq!(nav.session().messages().len(), 3);

    nav.handle_action(KeyAction::LoadMore);
    assert_eq!(nav.session().messages().len(), 3);
    assert_eq!(nav.session().state(), SessionState::Exhausted);
    assert_eq!(
        nav.session().status().map(|s| s.text()),
        Some("all events loaded")
    );
}

#[test]
fn switching_group_clears_the_open_stream() {
    let tree = fixture("switch");
    let (mut nav, _) = controller(&tree, PageSizes::default());
    nav.start(Some("/app/api"));
    assert!(!nav.session().messages().is_empty());

    nav.set_focus(PaneFocus::Groups);
    nav.handle_action(KeyAction::Reload);
    nav.handle_action(KeyAction::NextItem);
    nav.handle_action(KeyAction::Select);

    assert_eq!(nav.session().state(), SessionState::Empty);
    assert!(nav.session().target().is_none());
    assert_eq!(nav.streams().items().len(), 1);
}

#[test]
fn collapse_all_then_scroll_keeps_offsets_consistent() {
    let tree = fixture("collapse");
    let (mut nav, _) = controller(&tree, PageSizes::default());
    nav.start(Some("/app/api"));

    nav.handle_action(KeyAction::ToggleCollapseAll);
    let total: usize = nav.session().messages().iter().map(|m| m.height()).sum();
    assert_eq!(nav.session().total_lines(), total);
    assert!(total > 3, "the JSON message expands to several rows");

    nav.handle_action(KeyAction::ScrollToBottom);
    nav.handle_action(KeyAction::ScrollToTop);
    assert_eq!(nav.session().viewport_offset(), 0);
}
