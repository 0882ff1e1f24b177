//! Layout dimension constants for TUI rendering.

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Marker drawn in the gutter beside the selected message.
pub const SELECTED_GUTTER: &str = "▌ ";

/// Gutter beside unselected messages.
pub const EMPTY_GUTTER: &str = "  ";

/// Event loop poll interval.
pub const POLL_INTERVAL_MS: u64 = 250;
