//! Message layout: how many terminal rows each message occupies and what
//! goes on them.
//!
//! Height and rendering share one wrapping rule so the cached
//! `line_offset` of every message matches what is drawn:
//! - a collapsed message is exactly one row (a summary truncated with `…`)
//! - an expanded message is `format_message(content, true)` split on `\n`,
//!   each line hard-wrapped at the content width by display width

use crate::formatter::{format_message, split_json};
use crate::model::DisplayMessage;
use crate::view_state::highlighter::JsonHighlighter;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Columns reserved left of every message for the selection marker.
pub const GUTTER_WIDTH: usize = 2;

/// Width available for message text inside a pane of `pane_width` columns.
pub fn content_width(pane_width: usize) -> usize {
    pane_width.saturating_sub(GUTTER_WIDTH).max(1)
}

/// One-row summary of a message: whitespace control characters become
/// spaces and the result is cut to `width` columns, ending in `…` if cut.
pub fn summary_line(content: &str, width: usize) -> String {
    let width = width.max(1);
    let flat: String = content
        .chars()
        .map(|c| if matches!(c, '\n' | '\t' | '\r') { ' ' } else { c })
        .collect();

    let total: usize = flat.chars().map(char_width).sum();
    if total <= width {
        return flat;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = char_width(c);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Number of rows `text` (a single line) takes when hard-wrapped at `width`.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut rows = 1;
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used > 0 && used + w > width {
            rows += 1;
            used = 0;
        }
        used += w;
    }
    rows
}

/// Hard-wrap one line of styled spans at `width` columns.
///
/// Uses the same break rule as [`wrapped_line_count`]: a character moves to
/// a new row when it would overflow a row that already holds something.
/// An empty input still yields one (empty) row.
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        let style = span.style;
        let mut piece = String::new();
        for c in span.content.chars() {
            let w = char_width(c);
            if used > 0 && used + w > width {
                if !piece.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut piece), style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            piece.push(c);
            used += w;
        }
        if !piece.is_empty() {
            current.push(Span::styled(piece, style));
        }
    }
    rows.push(Line::from(current));
    rows
}

/// Rendered height of `message` at `width` content columns.
pub fn message_height(message: &DisplayMessage, width: usize) -> usize {
    if message.is_collapsed() {
        return 1;
    }
    format_message(message.content(), true)
        .split('\n')
        .map(|line| wrapped_line_count(line, width))
        .sum()
}

/// Rows for `message` at `width` content columns.
///
/// Expanded JSON is colored with `highlighter` when given; the row count is
/// identical either way and equals [`message_height`].
pub fn message_lines(
    message: &DisplayMessage,
    width: usize,
    highlighter: Option<&JsonHighlighter>,
) -> Vec<Line<'static>> {
    if message.is_collapsed() {
        return vec![Line::from(summary_line(message.content(), width))];
    }

    let plain = |text: &str| -> Vec<Line<'static>> {
        text.split('\n')
            .flat_map(|line| wrap_spans(vec![Span::raw(line.to_string())], width))
            .collect()
    };

    let (Some(highlighter), Some(parts)) = (highlighter, split_json(message.content())) else {
        return plain(&format_message(message.content(), true));
    };

    let mut lines = Vec::new();
    if !parts.prefix.is_empty() {
        lines.extend(plain(&parts.prefix));
    }
    for line in highlighter.highlight(&parts.json) {
        lines.extend(wrap_spans(line.spans, width));
    }
    if !parts.suffix.is_empty() {
        lines.extend(plain(&parts.suffix));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogEvent;

    fn message(text: &str, collapsed: bool) -> DisplayMessage {
        DisplayMessage::from_event(LogEvent::new(0, text), collapsed)
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn content_width_subtracts_gutter_and_stays_positive() {
        assert_eq!(content_width(40), 38);
        assert_eq!(content_width(1), 1);
        assert_eq!(content_width(0), 1);
    }

    #[test]
    fn summary_flattens_newlines_and_tabs() {
        assert_eq!(summary_line("a\nb\tc", 20), "a b c");
    }

    #[test]
    fn summary_truncates_with_ellipsis() {
        assert_eq!(summary_line("abcdefghij", 5), "abcd…");
        assert_eq!(summary_line("abcde", 5), "abcde");
    }

    #[test]
    fn summary_respects_wide_characters() {
        // Each CJK character is two columns wide.
        assert_eq!(summary_line("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn wrapped_line_count_handles_exact_and_overflow() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcde", 5), 1);
        assert_eq!(wrapped_line_count("abcdef", 5), 2);
        assert_eq!(wrapped_line_count("日本語", 4), 2);
    }

    #[test]
    fn wrap_spans_keeps_styles_across_breaks() {
        use ratatui::style::{Color, Style};
        let red = Style::default().fg(Color::Red);
        let rows = wrap_spans(vec![Span::raw("abc"), Span::styled("defg", red)], 4);

        assert_eq!(rows.len(), 2);
        assert_eq!(text_of(&rows[0]), "abcd");
        assert_eq!(text_of(&rows[1]), "efg");
        assert_eq!(rows[1].spans[0].style, red);
    }

    #[test]
    fn collapsed_height_is_one() {
        assert_eq!(message_height(&message("{\"a\":1}\nmore", true), 10), 1);
    }

    #[test]
    fn expanded_height_counts_pretty_json_rows() {
        // prefix / { / "a": 1 / } / suffix
        assert_eq!(message_height(&message(r#"prefix {"a":1} suffix"#, false), 80), 5);
    }

    #[test]
    fn expanded_height_includes_wrapping() {
        assert_eq!(message_height(&message("abcdefghij", false), 4), 3);
    }

    #[test]
    fn lines_match_height_with_and_without_highlighting() {
        let highlighter = JsonHighlighter::default();
        for (text, width) in [
            (r#"prefix {"a":1,"long_key_name":"long value here"} suffix"#, 12),
            ("plain text that wraps", 5),
            ("{\"k\":[1,2,3]}", 80),
        ] {
            let msg = message(text, false);
            let height = message_height(&msg, width);
            assert_eq!(message_lines(&msg, width, None).len(), height, "{text}");
            assert_eq!(message_lines(&msg, width, Some(&highlighter)).len(), height, "{text}");
        }
    }

    #[test]
    fn expanded_plain_lines_show_pretty_json() {
        let msg = message(r#"{"a":1}"#, false);
        let rendered: Vec<String> = message_lines(&msg, 80, None).iter().map(text_of).collect();
        assert_eq!(rendered, vec!["{", "  \"a\": 1", "}"]);
    }
}
