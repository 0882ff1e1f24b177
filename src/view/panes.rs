//! Rendering of the hint bar, the two list panes and the event pane.
//!
//! Every function here only reads state. Geometry comes from the
//! controller's [`PaneLayout`](crate::state::PaneLayout) so the rows drawn
//! for messages always agree with the session's viewport.

use super::constants::{EMPTY_GUTTER, SELECTED_GUTTER};
use super::styles::PaneStyles;
use crate::model::format_timestamp;
use crate::state::{
    EventSession, FilterState, ListItem, ListPane, NavigationController, PaneFocus,
};
use crate::view_state::{message_lines, JsonHighlighter};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem as ListRow, ListState, Paragraph},
    Frame,
};

/// Draw every pane of `nav`.
pub fn render_layout(
    frame: &mut Frame,
    nav: &NavigationController,
    styles: &PaneStyles,
    highlighter: Option<&JsonHighlighter>,
) {
    let layout = nav.layout();
    let focus = nav.focus();

    render_hint_bar(frame, layout.hint_bar, nav, styles);
    render_list_pane(
        frame,
        layout.groups,
        nav.groups(),
        focus == PaneFocus::Groups,
        styles,
    );
    render_list_pane(
        frame,
        layout.streams,
        nav.streams(),
        focus == PaneFocus::Streams,
        styles,
    );
    render_event_pane(
        frame,
        layout.events,
        layout.event_body(),
        nav.session(),
        focus == PaneFocus::Events,
        styles,
        highlighter,
    );
}

fn pane_block(title: &str, focused: bool, styles: &PaneStyles) -> Block<'static> {
    Block::default()
        .title(Line::from(format!(" {title} ")))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles.border(focused))
}

fn hint_text(nav: &NavigationController) -> &'static str {
    if nav.help_visible() {
        return "? close help  q quit";
    }
    if nav.is_editing_filter() {
        return "type to filter  Enter keep  Esc clear  Backspace delete";
    }
    match nav.focus() {
        PaneFocus::Groups | PaneFocus::Streams => {
            "j/k move  Enter open  / filter  L more  R reload  Tab pane  ? help  q quit"
        }
        PaneFocus::Events => {
            "j/k select  Space toggle  C all  c copy  J/K scroll  L more  R reload  Tab pane  ? help  q quit"
        }
    }
}

fn render_hint_bar(frame: &mut Frame, area: Rect, nav: &NavigationController, styles: &PaneStyles) {
    let line = Line::from(Span::styled(hint_text(nav), styles.muted));
    frame.render_widget(Paragraph::new(line), area);
}

/// Bottom line of a list pane: the filter while it is in use, else the status.
fn list_footer<T: ListItem>(pane: &ListPane<T>, styles: &PaneStyles) -> Option<Line<'static>> {
    match pane.filter() {
        FilterState::Editing(query) => Some(Line::from(vec![
            Span::styled("/", styles.key),
            Span::raw(format!("{query}▏")),
        ])),
        FilterState::Applied(query) => Some(Line::from(Span::styled(
            format!("filter: {query}"),
            styles.info,
        ))),
        FilterState::Inactive => pane.status().map(|status| {
            Line::from(Span::styled(
                status.text().to_string(),
                styles.status(status.is_error()),
            ))
        }),
    }
}

fn render_list_pane<T: ListItem>(
    frame: &mut Frame,
    area: Rect,
    pane: &ListPane<T>,
    focused: bool,
    styles: &PaneStyles,
) {
    let block = pane_block(pane.title(), focused, styles);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let footer = list_footer(pane, styles);
    let footer_height = u16::from(footer.is_some()).min(inner.height);
    let list_area = Rect {
        height: inner.height - footer_height,
        ..inner
    };

    let visible = pane.visible_items();
    if visible.is_empty() {
        let placeholder = if pane.has_cursor() {
            format!("no {}", T::NOUN)
        } else {
            String::new()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(placeholder, styles.muted))),
            list_area,
        );
    } else {
        let rows: Vec<ListRow> = visible
            .iter()
            .map(|item| {
                let description = item.description();
                let mut lines = vec![Line::from(item.title().to_string())];
                if !description.is_empty() {
                    lines.push(Line::from(Span::styled(description, styles.muted)));
                }
                ListRow::new(lines)
            })
            .collect();
        let mut state = ListState::default().with_selected(Some(pane.selected_index()));
        let list = List::new(rows).highlight_style(if focused {
            styles.selected
        } else {
            styles.muted
        });
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    if let Some(footer) = footer {
        let footer_area = Rect {
            y: list_area.y + list_area.height,
            height: footer_height,
            ..inner
        };
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

fn event_header(session: &EventSession) -> String {
    match session.target() {
        Some(target) => format!("LogGroup: {}  LogStream: {}", target.group, target.stream),
        None => "No stream selected".to_string(),
    }
}

fn event_footer(session: &EventSession, styles: &PaneStyles) -> Line<'static> {
    let mut spans = Vec::new();
    if !session.messages().is_empty() {
        let more = if session.has_more() { " +more" } else { "" };
        spans.push(Span::raw(format!(
            "{:>3}%  {}/{}{more}",
            session.scroll_percent(),
            session.selected_index() + 1,
            session.messages().len(),
        )));
        if let Some(message) = session.selected_message() {
            spans.push(Span::styled(
                format!("  {} UTC", format_timestamp(message.timestamp())),
                styles.muted,
            ));
        }
    }
    if let Some(status) = session.status() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            status.text().to_string(),
            styles.status(status.is_error()),
        ));
    }
    Line::from(spans)
}

/// Rows of the message list between `top` and `top + rows`.
fn event_rows(
    session: &EventSession,
    rows: usize,
    styles: &PaneStyles,
    highlighter: Option<&JsonHighlighter>,
) -> Vec<Line<'static>> {
    let top = session.render_offset();
    let bottom = top + rows;
    let width = session.content_width();
    let mut out = Vec::with_capacity(rows);

    for index in session.visible_range() {
        let message = &session.messages()[index];
        let gutter = if index == session.selected_index() {
            Span::styled(SELECTED_GUTTER, styles.gutter)
        } else {
            Span::raw(EMPTY_GUTTER)
        };
        let start = message.start_line();
        for (row, line) in message_lines(message, width, highlighter).into_iter().enumerate() {
            let global = start + row;
            if global < top {
                continue;
            }
            if global >= bottom {
                break;
            }
            let mut spans = Vec::with_capacity(line.spans.len() + 1);
            spans.push(gutter.clone());
            spans.extend(line.spans);
            out.push(Line::from(spans));
        }
    }
    out
}

fn render_event_pane(
    frame: &mut Frame,
    area: Rect,
    body: Rect,
    session: &EventSession,
    focused: bool,
    styles: &PaneStyles,
    highlighter: Option<&JsonHighlighter>,
) {
    let block = pane_block("Events", focused, styles);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let header_area = Rect { height: 1, ..inner };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(event_header(session), styles.heading))),
        header_area,
    );

    let body = body.intersection(inner);
    if session.messages().is_empty() {
        let placeholder = if session.target().is_some() {
            "no events"
        } else {
            "choose a stream to view its events"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(placeholder, styles.muted))),
            body,
        );
    } else {
        let rows = usize::from(body.height).min(session.viewport_height());
        frame.render_widget(
            Paragraph::new(event_rows(session, rows, styles, highlighter)),
            body,
        );
    }

    if inner.height >= 2 {
        let footer_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(event_footer(session, styles)), footer_area);
    }
}

#[cfg(test)]
#[path = "panes_tests.rs"]
mod tests;
