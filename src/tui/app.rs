use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::parse_base_url;
use crate::io::http::{Completion, TodoClient};
use crate::io::worker::RequestWorker;
use crate::model::{Config, Request, TodoItem, UiConfig};
use crate::ops::sync::ListSync;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing in the new-todo input
    Add,
    /// Typing in the row under edit
    Edit,
}

/// Main application state
pub struct App {
    pub sync: ListSync,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Index of the selected row
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Byte offset of the text cursor in the focused input
    pub input_cursor: usize,
    /// Requests produced by key handling, waiting to be dispatched
    outbox: Vec<Request>,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        App {
            sync: ListSync::new(),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            show_help: false,
            cursor: 0,
            scroll_offset: 0,
            input_cursor: 0,
            outbox: Vec::new(),
        }
    }

    /// Initial activation: fetch the list once
    pub fn start(&mut self) {
        let request = self.sync.load();
        self.send(request);
    }

    pub fn send(&mut self, request: Request) {
        self.outbox.push(request);
    }

    /// Drain the requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Feed a finished request back into the synchronizer
    pub fn apply(&mut self, completion: Completion) {
        if let Some(next) = self.sync.complete(completion) {
            self.send(next);
        }
        if self.mode == Mode::Edit && self.sync.editing().is_none() {
            self.mode = Mode::Navigate;
        }
        self.clamp_cursor();
        let len = self.focused_text().map_or(0, str::len);
        self.input_cursor = self.input_cursor.min(len);
    }

    /// The row under the cursor
    pub fn selected(&self) -> Option<&TodoItem> {
        self.sync.items().get(self.cursor)
    }

    /// Text of the input that has keyboard focus
    pub fn focused_text(&self) -> Option<&str> {
        match self.mode {
            Mode::Navigate => None,
            Mode::Add => Some(self.sync.draft()),
            Mode::Edit => self.sync.editing().map(|e| e.draft.as_str()),
        }
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            Mode::Navigate => None,
            Mode::Add => Some(self.sync.draft_mut()),
            Mode::Edit => self.sync.edit_draft_mut(),
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.sync.items().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Keep the cursor row inside a viewport of `height` rows
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let base = parse_base_url(&config.server.base_url)?;
    let client = TodoClient::new(base, config.server.update_body)?;
    let worker = RequestWorker::new(client);

    let mut app = App::new(&config.ui);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &RequestWorker,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for completion in worker.poll() {
            app.apply(completion);
        }
        for request in app.take_requests() {
            worker.dispatch(request);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
