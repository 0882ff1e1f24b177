//! TUI rendering and terminal management (impure shell).
//!
//! [`TuiApp`] owns the terminal and the [`NavigationController`]. It turns
//! crossterm events into [`KeyAction`]s or filter keystrokes, forwards
//! resizes, and redraws after every event.

pub mod constants;
mod help;
mod panes;
pub mod styles;

pub use help::render_help_overlay;
pub use panes::render_layout;
pub use styles::{ColorConfig, PaneStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction, SourceError};
use crate::state::{FilterKey, Flow, NavigationController};
use crate::view_state::JsonHighlighter;
use constants::POLL_INTERVAL_MS;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Log source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Presentation settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Whether colors are used at all.
    pub colors: ColorConfig,
    /// Syntax theme for expanded JSON.
    pub theme: String,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    nav: NavigationController,
    key_bindings: KeyBindings,
    styles: PaneStyles,
    highlighter: Option<JsonHighlighter>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(nav: NavigationController, options: &ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Self::with_terminal(terminal, nav, options)
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an already prepared terminal and size the panes to it.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut nav: NavigationController,
        options: &ViewOptions,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        nav.resize(size.width, size.height);

        let highlighter = options
            .colors
            .colors_enabled()
            .then(|| JsonHighlighter::new(&options.theme));

        Ok(Self {
            terminal,
            nav,
            key_bindings: KeyBindings::default(),
            styles: PaneStyles::with_color_config(options.colors),
            highlighter,
        })
    }

    /// Load the group list and open `initial_group` if given.
    pub fn start(&mut self, initial_group: Option<&str>) {
        self.nav.start(initial_group);
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws only after an event.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }

    /// Handle a key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing a filter
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.nav.is_editing_filter() {
            let filter_key = match key.code {
                KeyCode::Char(c) => FilterKey::Char(c),
                KeyCode::Backspace => FilterKey::Backspace,
                KeyCode::Enter => FilterKey::Confirm,
                KeyCode::Esc => FilterKey::Cancel,
                _ => return false,
            };
            self.nav.filter_input(filter_key);
            return false;
        }

        // Esc closes help instead of quitting
        if key.code == KeyCode::Esc && self.nav.help_visible() {
            self.nav.handle_action(KeyAction::Help);
            return false;
        }

        let Some(action) = self.key_bindings.get(&key) else {
            return false;
        };
        if action.is_scroll() {
            trace!(?action, "Scroll");
        } else {
            debug!(?action, focus = ?self.nav.focus(), "Key action");
        }
        self.nav.handle_action(action) == Flow::Quit
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.nav.resize(width, height);
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let nav = &self.nav;
        let styles = &self.styles;
        let highlighter = self.highlighter.as_ref();
        self.terminal.draw(|frame| {
            render_layout(frame, nav, styles, highlighter);
            if nav.help_visible() {
                render_help_overlay(frame, styles);
            }
        })?;
        Ok(())
    }

    /// Navigation state.
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    nav: NavigationController,
    initial_group: Option<&str>,
    options: &ViewOptions,
) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(nav, options) {
        Ok(app) => app,
        Err(e) => {
            restore_terminal()?;
            return Err(e);
        }
    };
    app.start(initial_group);

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Non-blank rows of `buffer`, right-trimmed, joined by newlines.
    pub(crate) fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area();
        let mut lines = Vec::new();

        for y in area.top()..area.bottom() {
            let mut line = String::new();
            for x in area.left()..area.right() {
                line.push_str(buffer[(x, y)].symbol());
            }
            let trimmed = line.trim_end();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
