// session.rs

use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::dispatch::Dispatcher;
use crate::executor::Executor;
use crate::history::History;
use crate::render::{Render, View};
use crate::storage::Store;
use crate::transcript::Transcript;

pub const TRANSCRIPT_FILE: &str = "webshell_log.txt";
pub const HTML_VIEW_FILE: &str = "webshell_log.html";

const WELCOME_NOTICE: &str = "💡 Tip: Use 'help' to view all available commands.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "🌞",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the whole session state and translates key events into history,
/// dispatch, and view operations.
pub struct Session {
    view: View,
    history: History,
    transcript: Transcript,
    executor: Executor,
    dispatcher: Dispatcher,
    input: String,
    // cursor column in chars, not bytes
    cursor: usize,
    theme: Theme,
    transcript_dir: PathBuf,
}

impl Session {
    pub fn new(endpoint: String, store: Store, transcript_dir: PathBuf) -> Self {
        let mut view = View::new();
        view.show_notice(WELCOME_NOTICE);
        Self {
            view,
            history: History::load(store),
            transcript: Transcript::new(),
            executor: Executor::new(endpoint),
            dispatcher: Dispatcher::new(),
            input: String::new(),
            cursor: 0,
            theme: Theme::Dark,
            transcript_dir,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn endpoint(&self) -> &str {
        self.executor.endpoint()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_control(key.code);
        }
        match key.code {
            KeyCode::Enter => self.submit_line(),
            KeyCode::Up => {
                if let Some(entry) = self.history.recall_previous() {
                    self.replace_input(entry);
                }
            }
            KeyCode::Down => match self.history.recall_next() {
                Some(entry) => self.replace_input(entry),
                // past the end: fresh line
                None => self.replace_input(String::new()),
            },
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::PageUp => self.view.scroll_up(10),
            KeyCode::PageDown => self.view.scroll_down(10),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_control(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('c') | KeyCode::Char('d') => return Flow::Quit,
            KeyCode::Char('l') => self.clear_terminal(),
            KeyCode::Char('s') => self.export_transcript(),
            KeyCode::Char('e') => self.export_html_view(),
            KeyCode::Char('t') => self.toggle_theme(),
            _ => {}
        }
        Flow::Continue
    }

    /// The TUI analogue of the original's global click-to-focus handler:
    /// a click snaps the view back to the live input line.
    pub fn focus_input(&mut self) {
        self.view.scroll_to_bottom();
    }

    fn submit_line(&mut self) {
        let command = self.input.trim().to_string();
        if command.is_empty() {
            return;
        }
        self.dispatcher.submit(
            &command,
            &mut self.history,
            &mut self.view,
            &mut self.transcript,
            &self.executor,
        );
        self.input.clear();
        self.cursor = 0;
        self.history.reset_cursor();
    }

    pub fn clear_terminal(&mut self) {
        self.view.clear();
        self.transcript.clear();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn export_transcript(&mut self) {
        let path = self.transcript_dir.join(TRANSCRIPT_FILE);
        match fs::write(&path, self.transcript.snapshot()) {
            Ok(()) => {
                info!(path = %path.display(), "transcript saved");
                self.view
                    .show_notice(&format!("Transcript saved to {}", path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not save transcript");
                self.view.show_notice(&format!("Could not save transcript: {e}"));
            }
        }
    }

    /// Writes the session view as the HTML document the browser front end
    /// used to render live.
    pub fn export_html_view(&mut self) {
        let path = self.transcript_dir.join(HTML_VIEW_FILE);
        let body_class = match self.theme {
            Theme::Light => " class=\"light\"",
            Theme::Dark => "",
        };
        let document = format!(
            "<!DOCTYPE html>\n<html>\n<body{body_class}>\n<div id=\"output\">\n{}\n</div>\n</body>\n</html>\n",
            self.view.to_html()
        );
        match fs::write(&path, document) {
            Ok(()) => {
                info!(path = %path.display(), "html view saved");
                self.view
                    .show_notice(&format!("HTML view saved to {}", path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not save html view");
                self.view.show_notice(&format!("Could not save HTML view: {e}"));
            }
        }
    }

    fn replace_input(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.input = text;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.input.len())
    }
}
