//! View-state layer: pure message layout and JSON coloring.
//!
//! Nothing here touches the terminal. The event session uses
//! [`layout::message_height`] to keep its cached line offsets current, and the
//! view draws the rows produced by [`layout::message_lines`].
//!
//! # Module Structure
//!
//! - `layout`: summary lines, width-aware wrapping, message heights and rows
//! - `highlighter`: `JsonHighlighter` built on syntect + two-face themes

pub mod highlighter;
pub mod layout;

pub use highlighter::{is_valid_theme, JsonHighlighter, DEFAULT_THEME, VALID_THEMES};
pub use layout::{content_width, message_height, message_lines, GUTTER_WIDTH};
