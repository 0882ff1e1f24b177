//! JSON syntax highlighting with configurable themes using syntect + two-face.
//!
//! The theme is chosen once from configuration and carried by the
//! [`JsonHighlighter`] instance; there is no process-wide theme setting.
//!
//! # Theme Support
//!
//! Built-in themes (from two-face):
//! - `base16-ocean-dark` - Ocean-inspired colors (default)
//! - `gruvbox-dark` / `gruvbox-light` - Warm retro groove colors
//! - `solarized-dark` / `solarized-light` - Precision colors
//! - `monokai` - Sublime Text classic
//! - `nord`, `dracula` and more (see [`VALID_THEMES`])

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// All valid theme names that can be used in configuration.
pub const VALID_THEMES: &[&str] = &[
    "ansi",
    "base16",
    "base16-256",
    "base16-eighties-dark",
    "base16-mocha-dark",
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-cold",
    "coldark-dark",
    "dark-neon",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "inspired-github",
    "leet",
    "monokai",
    "monokai-bright",
    "monokai-light",
    "monokai-origin",
    "nord",
    "one-half-dark",
    "one-half-light",
    "solarized-dark",
    "solarized-light",
    "sublime-snazzy",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

/// Default theme name.
pub const DEFAULT_THEME: &str = "base16-ocean-dark";

static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

#[allow(deprecated)]
fn theme_name_to_embedded(name: &str) -> Option<EmbeddedThemeName> {
    match name {
        "ansi" => Some(EmbeddedThemeName::Ansi),
        "base16" => Some(EmbeddedThemeName::Base16),
        "base16-256" => Some(EmbeddedThemeName::Base16_256),
        "base16-eighties-dark" => Some(EmbeddedThemeName::Base16EightiesDark),
        "base16-mocha-dark" => Some(EmbeddedThemeName::Base16MochaDark),
        "base16-ocean-dark" => Some(EmbeddedThemeName::Base16OceanDark),
        "base16-ocean-light" => Some(EmbeddedThemeName::Base16OceanLight),
        "coldark-cold" => Some(EmbeddedThemeName::ColdarkCold),
        "coldark-dark" => Some(EmbeddedThemeName::ColdarkDark),
        "dark-neon" => Some(EmbeddedThemeName::DarkNeon),
        "dracula" => Some(EmbeddedThemeName::Dracula),
        "github" => Some(EmbeddedThemeName::Github),
        "gruvbox-dark" => Some(EmbeddedThemeName::GruvboxDark),
        "gruvbox-light" => Some(EmbeddedThemeName::GruvboxLight),
        "inspired-github" => Some(EmbeddedThemeName::InspiredGithub),
        "leet" => Some(EmbeddedThemeName::Leet),
        "monokai" | "monokai-extended" => Some(EmbeddedThemeName::MonokaiExtended),
        "monokai-bright" => Some(EmbeddedThemeName::MonokaiExtendedBright),
        "monokai-light" => Some(EmbeddedThemeName::MonokaiExtendedLight),
        "monokai-origin" => Some(EmbeddedThemeName::MonokaiExtendedOrigin),
        "nord" => Some(EmbeddedThemeName::Nord),
        "one-half-dark" => Some(EmbeddedThemeName::OneHalfDark),
        "one-half-light" => Some(EmbeddedThemeName::OneHalfLight),
        "solarized-dark" => Some(EmbeddedThemeName::SolarizedDark),
        "solarized-light" => Some(EmbeddedThemeName::SolarizedLight),
        "sublime-snazzy" => Some(EmbeddedThemeName::SublimeSnazzy),
        "two-dark" => Some(EmbeddedThemeName::TwoDark),
        "visual-studio-dark-plus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
        "zenburn" => Some(EmbeddedThemeName::Zenburn),
        _ => None,
    }
}

/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    theme_name_to_embedded(name).is_some()
}

/// Colors pretty-printed JSON with a fixed theme.
#[derive(Debug, Clone, Copy)]
pub struct JsonHighlighter {
    theme: EmbeddedThemeName,
}

impl JsonHighlighter {
    /// Create a highlighter. Unknown theme names fall back to [`DEFAULT_THEME`].
    pub fn new(theme_name: &str) -> Self {
        let theme = theme_name_to_embedded(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme = theme_name, fallback = DEFAULT_THEME, "Unknown theme");
            EmbeddedThemeName::Base16OceanDark
        });
        Self { theme }
    }

    /// Highlight JSON text, one output line per input line.
    ///
    /// Line terminators are stripped from the spans. Lines syntect fails on
    /// are returned unstyled.
    pub fn highlight(&self, json: &str) -> Vec<Line<'static>> {
        let theme = THEME_SET.get(self.theme);
        let syntax = SYNTAX_SET
            .find_syntax_by_extension("json")
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);

        LinesWithEndings::from(json)
            .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(regions) => Line::from(
                    regions
                        .into_iter()
                        .filter_map(|(style, text)| {
                            let text = text.trim_end_matches(['\n', '\r']);
                            (!text.is_empty())
                                .then(|| Span::styled(text.to_string(), syntect_style_to_ratatui(style)))
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(_) => Line::from(line.trim_end_matches(['\n', '\r']).to_string()),
            })
            .collect()
    }
}

impl Default for JsonHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

fn syntect_style_to_ratatui(style: syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut ratatui_style = Style::default().fg(fg);

    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    ratatui_style
}
