//! Pane styling configuration.
//!
//! Focus is shown through border color and the list highlight; status lines
//! are colored by severity. Everything falls back to the terminal default
//! when colors are disabled.

use ratatui::style::{Color, Modifier, Style};

/// Border color of the focused pane.
pub const FOCUSED_BORDER: Color = Color::Indexed(69);

/// Border color of unfocused panes.
pub const UNFOCUSED_BORDER: Color = Color::Indexed(8);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        Self::new(!no_color_flag && std::env::var("NO_COLOR").is_err())
    }

    /// Explicit configuration, bypassing the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles shared by every pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneStyles {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of the other panes.
    pub unfocused_border: Style,
    /// Selected row of a list.
    pub selected: Style,
    /// Secondary text such as descriptions and timestamps.
    pub muted: Style,
    /// Gutter marker of the selected message.
    pub gutter: Style,
    /// Informational status line.
    pub info: Style,
    /// Error status line.
    pub error: Style,
    /// Key names in the hint bar and help overlay.
    pub key: Style,
    /// Category headings in the help overlay.
    pub heading: Style,
}

impl PaneStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(FOCUSED_BORDER),
                unfocused_border: Style::default().fg(UNFOCUSED_BORDER),
                selected: Style::default()
                    .fg(Color::Black)
                    .bg(FOCUSED_BORDER)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                gutter: Style::default().fg(FOCUSED_BORDER),
                info: Style::default().fg(Color::Cyan),
                error: Style::default().fg(Color::Red),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                heading: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                unfocused_border: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default(),
                gutter: Style::default(),
                info: Style::default(),
                error: Style::default().add_modifier(Modifier::BOLD),
                key: Style::default().add_modifier(Modifier::BOLD),
                heading: Style::default().add_modifier(Modifier::UNDERLINED),
            }
        }
    }

    /// Border style for a pane.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }

    /// Style for a status line.
    pub fn status(&self, is_error: bool) -> Style {
        if is_error {
            self.error
        } else {
            self.info
        }
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    fn focused_border_differs_from_unfocused() {
        for enabled in [true, false] {
            let styles = PaneStyles::with_color_config(ColorConfig { enabled });
            assert_ne!(styles.border(true), styles.border(false));
        }
    }

    #[test]
    fn disabled_colors_use_no_foreground() {
        let styles = PaneStyles::with_color_config(ColorConfig { enabled: false });
        assert_eq!(styles.focused_border.fg, None);
        assert_eq!(styles.error.fg, None);
        assert_eq!(styles.selected.bg, None);
    }

    #[test]
    fn error_status_is_red_when_colored() {
        let styles = PaneStyles::with_color_config(ColorConfig { enabled: true });
        assert_eq!(styles.status(true).fg, Some(Color::Red));
        assert_eq!(styles.status(false).fg, Some(Color::Cyan));
    }
}
