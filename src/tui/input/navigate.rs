use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let controls = app.sync.controls();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Movement stays available while a request is in flight
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.sync.items().len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.sync.items().len().saturating_sub(1);
        }

        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.mode = Mode::Add;
            app.input_cursor = app.sync.draft().len();
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if !controls.edit {
                return;
            }
            let Some(item) = app.selected().cloned() else {
                return;
            };
            app.input_cursor = item.text.len();
            app.sync.begin_edit(item.id, item.text);
            app.mode = Mode::Edit;
        }
        KeyCode::Char('d') | KeyCode::Char('x') => {
            if !controls.delete {
                return;
            }
            let Some(id) = app.selected().map(|item| item.id.clone()) else {
                return;
            };
            let request = app.sync.delete(id);
            app.send(request);
        }
        _ => {}
    }
}
