//! Main TUI application state machine.
//!
//! Handles:
//! - Symptom selection
//! - Input event handling
//! - Service integration

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::DiagnosisService;
use crate::config::EngineConfig;
use crate::domain::{ResultList, SymptomSet};

use super::i18n::Language;
use super::ui::{
    render_disclaimer, render_header, render_key_hints, results::render_results,
    symptoms::render_symptoms,
};

/// Main application state
pub struct App {
    service: DiagnosisService,

    /// Ticked symptoms
    selection: SymptomSet,

    /// Cursor position in the symptom list
    cursor: usize,

    /// Results of the last diagnosis
    results: ResultList,

    language: Language,

    should_quit: bool,
}

impl App {
    /// Create the application from environment configuration.
    ///
    /// # Errors
    /// Returns error if the model directory cannot be loaded or verified.
    pub fn new() -> Result<Self> {
        let config = EngineConfig::from_env_or_default();
        let service = DiagnosisService::from_config(&config)?;
        Ok(Self::with_service(service))
    }

    /// Create application with an injected service (Composition Root pattern).
    #[must_use]
    pub fn with_service(service: DiagnosisService) -> Self {
        let results = service.reset();
        Self {
            service,
            selection: SymptomSet::new(),
            cursor: 0,
            results,
            language: Language::default(),
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let labels = self.language.labels();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),       // Header
                        Constraint::Percentage(45),  // Symptoms
                        Constraint::Min(6),          // Results
                        Constraint::Length(2),       // Key hints
                        Constraint::Length(3),       // Disclaimer
                    ])
                    .split(f.area());

                render_header(f, chunks[0], self.language);
                render_symptoms(
                    f,
                    chunks[1],
                    self.service.vocabulary(),
                    &self.selection,
                    self.cursor,
                    labels,
                );
                render_results(f, chunks[2], &self.results, labels);
                render_key_hints(f, chunks[3], labels);
                render_disclaimer(f, chunks[4], labels);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let n_symptoms = self.service.vocabulary().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = if self.cursor == 0 {
                    n_symptoms.saturating_sub(1)
                } else {
                    self.cursor - 1
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = if n_symptoms == 0 {
                    0
                } else {
                    (self.cursor + 1) % n_symptoms
                };
            }
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Enter => self.diagnose(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.selection = SymptomSet::new();
                self.results = self.service.reset();
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.language = self.language.toggled();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn toggle_current(&mut self) {
        let Some(name) = self.service.vocabulary().names().get(self.cursor) else {
            return;
        };
        if !self.selection.remove(name) {
            self.selection.insert(name.clone());
        }
    }

    fn diagnose(&mut self) {
        self.results = self.service.diagnose(&self.selection);
    }
}
