use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the title row and the separator under it
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            " Todos",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.sync.items().len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    let indicator = if app.sync.stalled().is_some() {
        Some(("stalled ", app.theme.red))
    } else if app.sync.is_pending() {
        Some(("syncing\u{2026} ", app.theme.yellow))
    } else {
        None
    };
    if let Some((label, color)) = indicator {
        let used = spans_width(&spans);
        let label_width = label.chars().count();
        if used + label_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - label_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(label, Style::default().fg(color).bg(bg)));
        }
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
