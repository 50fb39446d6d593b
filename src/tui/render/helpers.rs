use ratatui::style::Style;
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode::{display_width, truncate_to_width};

/// Block cursor glyph drawn inside text inputs
pub(super) const CURSOR: &str = "\u{258C}";

/// Spans for a single-line input with a block cursor at byte `cursor`,
/// scrolled horizontally so the cursor stays within `width` cells.
pub(super) fn input_spans(
    text: &str,
    cursor: usize,
    width: usize,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    if width == 0 {
        return Vec::new();
    }
    let cursor = cursor.min(text.len());
    let (mut before, after) = text.split_at(cursor);

    // Drop leading graphemes until the text left of the cursor fits
    let room = width - 1;
    while display_width(before) > room {
        let first = before.graphemes(true).next().map_or(0, str::len);
        if first == 0 {
            break;
        }
        before = &before[first..];
    }
    let after_room = room - display_width(before).min(room);

    let mut spans = vec![
        Span::styled(before.to_string(), text_style),
        Span::styled(CURSOR, cursor_style),
    ];
    if after_room > 0 && !after.is_empty() {
        spans.push(Span::styled(truncate_to_width(after, after_room), text_style));
    }
    spans
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

/// Pad `spans` with `style`d blanks out to `width` cells
pub(super) fn pad_to_width(spans: &mut Vec<Span<'static>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}
