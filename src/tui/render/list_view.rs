use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::TodoItem;
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::{CURSOR, input_spans, pad_to_width};

/// Render the todo rows, one per item, in server order
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.sync.items().is_empty() {
        let message = if app.sync.is_pending() {
            " Loading\u{2026}"
        } else {
            " No todos"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    app.scroll_to_cursor(height);

    let width = area.width as usize;
    let lines: Vec<Line> = app
        .sync
        .items()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, item)| row_line(app, i, item, width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn row_line(app: &App, index: usize, item: &TodoItem, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let is_cursor = index == app.cursor && app.mode != Mode::Add;
    let row_bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let row_style = Style::default().bg(row_bg);

    let mut spans: Vec<Span<'static>> = Vec::new();
    if is_cursor {
        spans.push(Span::styled(
            format!("{} ", CURSOR),
            Style::default().fg(theme.highlight).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled("  ", row_style));
    }
    let text_width = width.saturating_sub(2);

    match app.sync.editing() {
        Some(edit) if edit.id == item.id => {
            let text_style = Style::default()
                .fg(theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::UNDERLINED);
            if app.mode == Mode::Edit && app.sync.controls().input {
                spans.extend(input_spans(
                    &edit.draft,
                    app.input_cursor,
                    text_width,
                    text_style,
                    Style::default().fg(theme.highlight).bg(row_bg),
                ));
            } else {
                spans.push(Span::styled(
                    truncate_to_width(&edit.draft, text_width),
                    text_style.fg(theme.dim),
                ));
            }
        }
        _ => {
            let fg = if is_cursor {
                theme.text_bright
            } else {
                theme.text
            };
            spans.push(Span::styled(
                truncate_to_width(&item.text, text_width),
                Style::default().fg(fg).bg(row_bg),
            ));
        }
    }

    if is_cursor {
        pad_to_width(&mut spans, width, row_style);
    }
    Line::from(spans)
}
