use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = if let Some(err) = app.sync.stalled() {
        // Leave room for the quit hint
        let budget = width.saturating_sub(14);
        spans.push(Span::styled(
            truncate_to_width(&format!(" \u{2717} {}", err), budget),
            Style::default().fg(app.theme.red).bg(bg),
        ));
        Some("Ctrl-C quit ")
    } else {
        if app.sync.is_pending() {
            spans.push(Span::styled(
                " syncing\u{2026}",
                Style::default().fg(app.theme.yellow).bg(bg),
            ));
        }
        app.show_key_hints.then_some(match app.mode {
            Mode::Navigate => "a add  e edit  d delete  ? help  q quit ",
            Mode::Add => "Enter add  Esc back ",
            Mode::Edit => "Enter save  Esc cancel ",
        })
    };

    if let Some(hint) = hint {
        let used = spans_width(&spans);
        let hint_width = hint.chars().count();
        if used + hint_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
