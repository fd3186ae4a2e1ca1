//! Application state for the TUI.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use runlog_core::analytics::{person_names, Dashboard};
use runlog_core::config::DashboardConfig;
use runlog_core::{ingest, ParseOutcome};

/// Current input mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Dashboard navigation
    #[default]
    Normal,
    /// Typing a path to open
    OpenPath { buffer: String },
}

/// Main application state.
///
/// Everything tied to the loaded file (outcome, path, filter, dashboard)
/// is replaced together by [`App::load_file`] and [`App::clear`].
pub struct App {
    /// Result of the last successful read, if any
    pub outcome: Option<ParseOutcome>,
    /// Path of the loaded (or last attempted) file
    pub path: Option<PathBuf>,
    /// Operational failure from the last load (unreadable file, bad encoding)
    pub load_error: Option<String>,
    /// Sorted runner names from the loaded rows
    pub persons: Vec<String>,
    /// Person filter: 0 is All Runners, `i` selects `persons[i - 1]`
    pub filter_index: usize,
    /// Derived view model for the current filter
    pub dashboard: Option<Dashboard>,
    /// Bumped every time the session is replaced
    pub reset_count: u64,
    /// Current input mode
    pub input_mode: InputMode,
    /// Scroll offset into the validation error list
    pub error_scroll: usize,
    /// Rows reserved for the chart
    pub chart_height: u16,
    /// Filter applied after each load when the runner exists
    default_person: Option<String>,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create an empty session.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            outcome: None,
            path: None,
            load_error: None,
            persons: Vec::new(),
            filter_index: 0,
            dashboard: None,
            reset_count: 0,
            input_mode: InputMode::default(),
            error_scroll: 0,
            chart_height: config.chart_height,
            default_person: config.default_person.clone(),
            should_quit: false,
        }
    }

    /// Load a CSV file, replacing the whole session.
    pub fn load_file(&mut self, path: &Path) {
        tracing::info!(path = %path.display(), "Loading file");

        match ingest::load_path(path) {
            Ok(outcome) => self.replace_session(Some(path.to_path_buf()), Some(outcome), None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load file");
                self.replace_session(Some(path.to_path_buf()), None, Some(e.to_string()));
            }
        }
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.path.clone() {
            self.load_file(&path);
        }
    }

    /// Drop the loaded data and return to the empty dashboard.
    pub fn clear(&mut self) {
        tracing::debug!("Clearing session");
        self.replace_session(None, None, None);
    }

    fn replace_session(
        &mut self,
        path: Option<PathBuf>,
        outcome: Option<ParseOutcome>,
        load_error: Option<String>,
    ) {
        self.persons = outcome
            .as_ref()
            .map(|o| person_names(&o.rows))
            .unwrap_or_default();
        self.filter_index = self
            .default_person
            .as_deref()
            .and_then(|name| self.persons.iter().position(|p| p == name))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.outcome = outcome;
        self.path = path;
        self.load_error = load_error;
        self.error_scroll = 0;
        self.reset_count += 1;
        self.rebuild_dashboard();
    }

    fn rebuild_dashboard(&mut self) {
        let selected = self.selected_person().map(str::to_string);
        self.dashboard = self
            .outcome
            .as_ref()
            .filter(|o| o.has_rows())
            .map(|o| Dashboard::build(&o.rows, selected.as_deref()));
    }

    /// The runner currently filtered on, or `None` for All Runners.
    pub fn selected_person(&self) -> Option<&str> {
        self.filter_index
            .checked_sub(1)
            .and_then(|i| self.persons.get(i))
            .map(String::as_str)
    }

    /// Label for the person selector.
    pub fn filter_label(&self) -> &str {
        match self.selected_person() {
            Some(name) => runlog_core::format::display_person(name),
            None => "All Runners",
        }
    }

    fn next_person(&mut self) {
        if self.persons.is_empty() {
            return;
        }
        self.filter_index = (self.filter_index + 1) % (self.persons.len() + 1);
        self.rebuild_dashboard();
    }

    fn previous_person(&mut self) {
        if self.persons.is_empty() {
            return;
        }
        self.filter_index = if self.filter_index == 0 {
            self.persons.len()
        } else {
            self.filter_index - 1
        };
        self.rebuild_dashboard();
    }

    /// Validation errors from the current outcome.
    pub fn error_count(&self) -> usize {
        self.outcome.as_ref().map(|o| o.errors.len()).unwrap_or(0)
    }

    fn scroll_errors_down(&mut self) {
        if self.error_scroll + 1 < self.error_count() {
            self.error_scroll += 1;
        }
    }

    fn scroll_errors_up(&mut self) {
        self.error_scroll = self.error_scroll.saturating_sub(1);
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::OpenPath { .. } => self.handle_path_key(key),
        }
    }

    /// Handle keyboard input on the dashboard.
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('o') => {
                let buffer = self
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.input_mode = InputMode::OpenPath { buffer };
            }
            KeyCode::Char('c') => {
                self.clear();
            }
            KeyCode::Char('r') => {
                self.reload();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.next_person();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.previous_person();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_errors_down();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_errors_up();
            }
            _ => {}
        }
    }

    /// Handle keyboard input in the open-file prompt.
    fn handle_path_key(&mut self, key: KeyEvent) {
        let InputMode::OpenPath { buffer } = &mut self.input_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let path = PathBuf::from(buffer.trim());
                self.input_mode = InputMode::Normal;
                if !path.as_os_str().is_empty() {
                    self.load_file(&path);
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                buffer.push(c);
            }
            _ => {}
        }
    }
}
