use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Typing in the new-todo input
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            if !app.sync.controls().add {
                return;
            }
            if let Ok(request) = app.sync.create() {
                app.send(request);
            }
        }
        _ => edit_focused(app, key),
    }
}

/// Typing in the row under edit
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let controls = app.sync.controls();
    match key.code {
        KeyCode::Esc => {
            if controls.cancel {
                app.sync.cancel_edit();
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Enter => {
            if !controls.save {
                return;
            }
            if let Ok(request) = app.sync.update() {
                app.send(request);
            }
        }
        _ => edit_focused(app, key),
    }
}

/// Insert `text` at the cursor of the focused input
pub(super) fn insert_text(app: &mut App, text: &str) {
    if !app.sync.controls().input {
        return;
    }
    let at = app.input_cursor;
    if let Some(buf) = app.focused_text_mut() {
        let at = at.min(buf.len());
        buf.insert_str(at, text);
        app.input_cursor = at + text.len();
    }
}

/// Cursor movement and deletion inside the focused input. Ignored while pending.
fn edit_focused(app: &mut App, key: KeyEvent) {
    if !app.sync.controls().input {
        return;
    }
    let cursor = app.input_cursor;
    let Some(buf) = app.focused_text_mut() else {
        return;
    };
    let cursor = cursor.min(buf.len());
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let new_cursor = match key.code {
        KeyCode::Char('u') if ctrl => {
            buf.replace_range(..cursor, "");
            0
        }
        KeyCode::Char('a') if ctrl => 0,
        KeyCode::Char('e') if ctrl => buf.len(),
        KeyCode::Char(c) if !ctrl => {
            buf.insert(cursor, c);
            cursor + c.len_utf8()
        }
        KeyCode::Backspace => match prev_grapheme_boundary(buf, cursor) {
            Some(prev) => {
                buf.replace_range(prev..cursor, "");
                prev
            }
            None => cursor,
        },
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(buf, cursor) {
                buf.replace_range(cursor..next, "");
            }
            cursor
        }
        KeyCode::Left => prev_grapheme_boundary(buf, cursor).unwrap_or(cursor),
        KeyCode::Right => next_grapheme_boundary(buf, cursor).unwrap_or(cursor),
        KeyCode::Home => 0,
        KeyCode::End => buf.len(),
        _ => cursor,
    };
    app.input_cursor = new_cursor;
}
