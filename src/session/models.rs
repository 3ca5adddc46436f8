/*!
 * Session state for the current document.
 *
 * One `Session` holds everything the user currently sees: the extracted
 * text, the translated text, the selected language and the loading and
 * translating flags. New documents and new runs overwrite it, nothing is
 * merged or persisted.
 */

use std::fmt;
use uuid::Uuid;

use crate::errors::TranslationError;
use crate::language_utils::{self, Language};

/// State of the current translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No run started for the current document
    #[default]
    Idle,
    /// A run is sending chunks to the backend
    Translating,
    /// Every chunk was translated
    Completed,
    /// A chunk request failed and the run was abandoned
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Translating => write!(f, "translating"),
            RunState::Completed => write!(f, "completed"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// What a run captured when it started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTicket {
    /// Id used to match the run's outcome to the session
    pub run_id: Uuid,
    /// Language snapshot, later selection changes do not affect the run
    pub language: Language,
}

/// Single-owner state of the current document
#[derive(Debug, Clone)]
pub struct Session {
    extracted_text: String,
    translated_text: String,
    selected_language: Language,
    translated_language: Option<Language>,
    is_loading: bool,
    run_state: RunState,
    current_run: Option<Uuid>,
}

impl Session {
    /// Create an empty session with a selected language
    pub fn new(selected_language: Language) -> Self {
        Self {
            extracted_text: String::new(),
            translated_text: String::new(),
            selected_language,
            translated_language: None,
            is_loading: false,
            run_state: RunState::Idle,
            current_run: None,
        }
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn selected_language(&self) -> Language {
        self.selected_language
    }

    /// Language the current translated text is in
    pub fn translated_language(&self) -> Option<Language> {
        self.translated_language
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_translating(&self) -> bool {
        self.run_state == RunState::Translating
    }

    /// Change the selected language
    pub fn select_language(&mut self, code: &str) -> Result<Language, TranslationError> {
        let language = language_utils::resolve_language(code)?;
        self.selected_language = language;
        Ok(language)
    }

    /// A new document is being read: drop everything derived from the old one
    ///
    /// Rejected while another document is loading or a run is translating.
    pub fn begin_loading(&mut self) -> Result<(), TranslationError> {
        if self.is_translating() {
            return Err(TranslationError::RunInProgress);
        }
        if self.is_loading {
            return Err(TranslationError::LoadInProgress);
        }
        self.is_loading = true;
        self.extracted_text.clear();
        self.translated_text.clear();
        self.translated_language = None;
        self.run_state = RunState::Idle;
        Ok(())
    }

    /// Reading finished, with the extracted text on success
    ///
    /// Ignored unless a load is pending.
    pub fn finish_loading(&mut self, extracted_text: Option<String>) -> bool {
        if !self.is_loading {
            return false;
        }
        self.is_loading = false;
        self.extracted_text = extracted_text.unwrap_or_default();
        true
    }

    /// Start a run, snapshotting the selected language
    ///
    /// A second run while one is translating is rejected, so is a run while
    /// a document is loading.
    pub fn begin_run(&mut self) -> Result<RunTicket, TranslationError> {
        if self.is_translating() {
            return Err(TranslationError::RunInProgress);
        }
        if self.is_loading {
            return Err(TranslationError::LoadInProgress);
        }
        if self.extracted_text.trim().is_empty() {
            return Err(TranslationError::NothingToTranslate);
        }

        let ticket = RunTicket {
            run_id: Uuid::new_v4(),
            language: self.selected_language,
        };
        self.run_state = RunState::Translating;
        self.current_run = Some(ticket.run_id);
        Ok(ticket)
    }

    /// Record a successful run; outcomes of other runs are ignored
    pub fn complete_run(&mut self, ticket: &RunTicket, translated_text: String) -> bool {
        if self.current_run != Some(ticket.run_id) {
            return false;
        }
        self.translated_text = translated_text;
        self.translated_language = Some(ticket.language);
        self.run_state = RunState::Completed;
        self.current_run = None;
        true
    }

    /// Record a failed run; nothing of it is kept
    pub fn fail_run(&mut self, ticket: &RunTicket) -> bool {
        if self.current_run != Some(ticket.run_id) {
            return false;
        }
        self.translated_text.clear();
        self.translated_language = None;
        self.run_state = RunState::Failed;
        self.current_run = None;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(language_utils::default_language())
    }
}
