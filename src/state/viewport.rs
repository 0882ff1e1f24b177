//! Event viewport: scroll offset arithmetic.
//!
//! All functions are pure and work in rendered lines.

/// Lines moved by a single scroll step.
pub const SCROLL_STEP: usize = 3;

/// Rows kept above a message too tall to center.
pub const TALL_ITEM_MARGIN: usize = 2;

/// Offset that brings the selected message into view.
///
/// `start` is the message's first rendered line, `height` its rendered height
/// and `viewport_height` the number of visible rows.
///
/// - a message taller than the viewport is anchored `TALL_ITEM_MARGIN` rows
///   below its top: `max(0, start - 2)`
/// - otherwise it is centered: `max(0, start - viewport_height/2 + height/2)`
///
/// ```
/// use lgv::state::viewport::center_offset;
/// assert_eq!(center_offset(50, 4, 20), 42);
/// assert_eq!(center_offset(50, 30, 20), 48);
/// ```
pub fn center_offset(start: usize, height: usize, viewport_height: usize) -> usize {
    if height > viewport_height {
        start.saturating_sub(TALL_ITEM_MARGIN)
    } else {
        (start + height / 2).saturating_sub(viewport_height / 2)
    }
}

/// Largest useful offset: the last line sits on the last row.
pub fn max_offset(total_lines: usize, viewport_height: usize) -> usize {
    total_lines.saturating_sub(viewport_height)
}

/// Clamp an offset into `[0, max_offset]`.
pub fn clamp_offset(offset: usize, total_lines: usize, viewport_height: usize) -> usize {
    offset.min(max_offset(total_lines, viewport_height))
}

/// Viewport movement without changing the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMove {
    /// Up by [`SCROLL_STEP`] lines.
    LineUp,
    /// Down by [`SCROLL_STEP`] lines.
    LineDown,
    /// Up half a viewport.
    HalfPageUp,
    /// Down half a viewport.
    HalfPageDown,
    /// Up a full viewport.
    PageUp,
    /// Down a full viewport.
    PageDown,
    /// To the first line.
    Top,
    /// To the last page.
    Bottom,
}

/// Apply `movement` to `offset`; the result is clamped.
pub fn scroll(
    offset: usize,
    movement: ScrollMove,
    total_lines: usize,
    viewport_height: usize,
) -> usize {
    let half = (viewport_height / 2).max(1);
    let page = viewport_height.max(1);
    let offset = clamp_offset(offset, total_lines, viewport_height);

    let moved = match movement {
        ScrollMove::LineUp => offset.saturating_sub(SCROLL_STEP),
        ScrollMove::LineDown => offset + SCROLL_STEP,
        ScrollMove::HalfPageUp => offset.saturating_sub(half),
        ScrollMove::HalfPageDown => offset + half,
        ScrollMove::PageUp => offset.saturating_sub(page),
        ScrollMove::PageDown => offset + page,
        ScrollMove::Top => 0,
        ScrollMove::Bottom => usize::MAX,
    };
    clamp_offset(moved, total_lines, viewport_height)
}

/// Scroll position as a percentage, 100 when everything fits.
pub fn scroll_percent(offset: usize, total_lines: usize, viewport_height: usize) -> u16 {
    let max = max_offset(total_lines, viewport_height);
    if max == 0 {
        return 100;
    }
    let offset = offset.min(max);
    u16::try_from(offset * 100 / max).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_short_item() {
        // 50 - 10 + 2
        assert_eq!(center_offset(50, 4, 20), 42);
    }

    #[test]
    fn anchors_tall_item_near_its_top() {
        assert_eq!(center_offset(50, 30, 20), 48);
    }

    #[test]
    fn never_negative_near_the_start() {
        assert_eq!(center_offset(0, 1, 20), 0);
        assert_eq!(center_offset(3, 1, 20), 0);
        assert_eq!(center_offset(1, 30, 20), 0);
    }

    #[test]
    fn item_exactly_viewport_height_is_centered() {
        assert_eq!(center_offset(50, 20, 20), 50);
    }

    #[test]
    fn clamp_limits_to_last_page() {
        assert_eq!(clamp_offset(100, 30, 10), 20);
        assert_eq!(clamp_offset(5, 30, 10), 5);
        assert_eq!(clamp_offset(5, 4, 10), 0);
    }

    #[test]
    fn line_scroll_moves_three_lines() {
        assert_eq!(scroll(10, ScrollMove::LineDown, 100, 20), 13);
        assert_eq!(scroll(10, ScrollMove::LineUp, 100, 20), 7);
        assert_eq!(scroll(1, ScrollMove::LineUp, 100, 20), 0);
    }

    #[test]
    fn page_scrolls_use_viewport_height() {
        assert_eq!(scroll(0, ScrollMove::HalfPageDown, 100, 20), 10);
        assert_eq!(scroll(0, ScrollMove::PageDown, 100, 20), 20);
        assert_eq!(scroll(30, ScrollMove::PageUp, 100, 20), 10);
        assert_eq!(scroll(30, ScrollMove::HalfPageUp, 100, 20), 20);
    }

    #[test]
    fn top_and_bottom() {
        assert_eq!(scroll(42, ScrollMove::Top, 100, 20), 0);
        assert_eq!(scroll(0, ScrollMove::Bottom, 100, 20), 80);
    }

    #[test]
    fn scrolling_down_stops_at_last_page() {
        assert_eq!(scroll(79, ScrollMove::PageDown, 100, 20), 80);
        assert_eq!(scroll(0, ScrollMove::LineDown, 5, 20), 0);
    }

    #[test]
    fn percent_reports_position() {
        assert_eq!(scroll_percent(0, 100, 20), 0);
        assert_eq!(scroll_percent(40, 100, 20), 50);
        assert_eq!(scroll_percent(80, 100, 20), 100);
        assert_eq!(scroll_percent(0, 5, 20), 100);
    }
}
