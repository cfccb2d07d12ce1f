//! Terminal browser state and event loop.

use std::collections::VecDeque;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use tracing::{debug, info};

use crate::launcher;
use crate::snapshot::{DirectorySnapshotService, ListingSink};
use crate::types::DirectoryEntry;
use crate::ui;
use crate::ui::theme::Theme;
use crate::watcher::{DirectoryWatcher, EventSource, NotifySource};

/// An error waiting to be acknowledged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

/// What the user sees. Updated only through [`ListingSink`].
#[derive(Default)]
pub struct BrowserView {
    pub directory: Option<PathBuf>,
    /// Display copy of the listing: directories first, then by name.
    pub entries: Vec<DirectoryEntry>,
    pub list_state: ListState,
    pub errors: VecDeque<ErrorDialog>,
    pub last_update: Option<DateTime<Local>>,
    pub updates: u64,
}

impl BrowserView {
    pub fn selected(&self) -> Option<&DirectoryEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| (i + 1).min(self.entries.len() - 1));
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    pub fn select_path(&mut self, path: &Path) {
        if let Some(i) = self.entries.iter().position(|e| e.path() == path) {
            self.list_state.select(Some(i));
        }
    }
}

impl ListingSink for BrowserView {
    fn listing_changed(&mut self, directory: &Path, entries: &[DirectoryEntry]) {
        let same_directory = self.directory.as_deref() == Some(directory);
        let previous = self.selected().map(|e| e.path().to_path_buf());
        let previous_index = self.list_state.selected();

        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name().cmp(b.name())));
        self.entries = sorted;
        self.directory = Some(directory.to_path_buf());
        self.last_update = Some(Local::now());
        self.updates += 1;

        // Keep the cursor on the same entry across live updates if it survived.
        let selection = if self.entries.is_empty() {
            None
        } else if !same_directory {
            Some(0)
        } else {
            previous
                .and_then(|p| self.entries.iter().position(|e| e.path() == p))
                .or_else(|| previous_index.map(|i| i.min(self.entries.len() - 1)))
                .or(Some(0))
        };
        self.list_state.select(selection);
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.errors.push_back(ErrorDialog {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    /// Typing a directory path to jump to.
    Prompt(String),
}

pub struct App<S: EventSource = NotifySource> {
    service: DirectorySnapshotService<BrowserView, S>,
    theme: Theme,
    mode: InputMode,
    should_quit: bool,
}

impl App<NotifySource> {
    pub fn new(source: NotifySource, theme: Theme) -> Self {
        Self::with_watcher(DirectoryWatcher::new(source), theme)
    }
}

impl<S: EventSource> App<S> {
    pub fn with_watcher(watcher: DirectoryWatcher<S>, theme: Theme) -> Self {
        Self {
            service: DirectorySnapshotService::with_watcher(BrowserView::default(), watcher),
            theme,
            mode: InputMode::Browse,
            should_quit: false,
        }
    }

    /// Switch to `path`. Failures are already on screen as error dialogs.
    pub fn open_directory(&mut self, path: &Path) -> bool {
        self.service.set_active_directory(path).is_ok()
    }

    /// Apply reloads posted by the watch thread since the last frame.
    pub fn sync(&mut self) -> usize {
        self.service.process_pending()
    }

    pub fn shutdown(&mut self) {
        self.service.shutdown();
    }

    pub fn view(&self) -> &BrowserView {
        self.service.sink()
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame) {
        let watching = self.service.is_watching();
        ui::render(frame, self.service.sink_mut(), &self.mode, &self.theme, watching);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        // Error dialogs are modal.
        if !self.service.sink().errors.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.service.sink_mut().errors.pop_front();
            }
            return;
        }

        if self.mode == InputMode::Browse {
            self.handle_browse_key(key);
            return;
        }
        let InputMode::Prompt(input) = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.mode = InputMode::Browse,
            KeyCode::Enter => {
                let target = expand_home(input.trim());
                self.mode = InputMode::Browse;
                self.open_directory(&target);
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.service.sink_mut().select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.service.sink_mut().select_previous(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_to_parent(),
            KeyCode::Char('o') => {
                let current = self
                    .service
                    .active_directory()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.mode = InputMode::Prompt(current);
            }
            KeyCode::Char('r') => {
                self.service.refresh();
            }
            KeyCode::Char('t') => {
                self.theme.cycle();
                debug!("Theme: {}", self.theme.variant.name());
            }
            _ => {}
        }
    }

    fn activate_selected(&mut self) {
        let Some(entry) = self.service.sink().selected().cloned() else {
            return;
        };

        if entry.is_dir() {
            self.open_directory(entry.path());
        } else if let Err(e) = launcher::open_entry(&entry) {
            self.service.sink_mut().report_error(e.title(), &e.to_string());
        }
    }

    fn go_to_parent(&mut self) {
        let Some(current) = self.service.active_directory().map(Path::to_path_buf) else {
            return;
        };
        let Some(parent) = current.parent() else {
            return;
        };
        if self.open_directory(parent) {
            self.service.sink_mut().select_path(&current);
        }
    }
}

fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(input),
        },
        _ => PathBuf::from(input),
    }
}

pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // A. Reconcile on this thread; the watch thread only posts requests
        app.sync();

        // B. Render
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit() {
            info!("Quit requested");
            return Ok(());
        }

        // C. Poll Input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
}
