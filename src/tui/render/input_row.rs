use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::input_spans;

const PROMPT: &str = " + ";
const PLACEHOLDER: &str = "New todo";

/// Render the new-todo input row
pub fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = (area.width as usize).saturating_sub(PROMPT.len());
    let controls = app.sync.controls();
    let draft = app.sync.draft();

    let prompt_color = if app.mode == Mode::Add && controls.input {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(prompt_color).bg(bg))];

    if app.mode == Mode::Add && controls.input {
        spans.extend(input_spans(
            draft,
            app.input_cursor,
            width,
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if draft.is_empty() {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg)));
    } else {
        spans.push(Span::styled(
            truncate_to_width(draft, width),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
