use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{AppError, InputError, ProviderError, TranslationError};
use crate::file_utils::FileManager;
use crate::language_utils::{self, Language};
use crate::pdf_extractor::{ExtractedDocument, PdfExtractor};
use crate::providers::Provider;
use crate::providers::huggingface::HuggingFace;
use crate::session::{RunState, RunTicket, Session};
use crate::speech::{CommandSpeech, SpeechOutput};
use crate::translation::{ChunkTranslator, Chunker};

/// Work started on the session that has not recorded its outcome yet
enum PendingWork {
    Load,
    Run(RunTicket),
}

/// Records a failed outcome if the work is dropped before it finishes
///
/// Covers futures that are cancelled mid-await, e.g. by a timeout, so the
/// session never stays loading or translating.
struct PendingGuard<'a> {
    session: &'a Mutex<Session>,
    work: Option<PendingWork>,
}

impl<'a> PendingGuard<'a> {
    fn new(session: &'a Mutex<Session>, work: PendingWork) -> Self {
        Self { session, work: Some(work) }
    }

    /// Hand the outcome over to the caller
    fn disarm(mut self) {
        self.work = None;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        match self.work.take() {
            Some(PendingWork::Load) => {
                warn!("Document loading was interrupted");
                self.session.lock().finish_loading(None);
            }
            Some(PendingWork::Run(ticket)) => {
                warn!("Run {} was interrupted", ticket.run_id);
                self.session.lock().fail_run(&ticket);
            }
            None => {}
        }
    }
}

/// Main application controller for PDF translation
///
/// Owns the session state. The session lock is only ever taken for short,
/// synchronous updates and is never held across an await.
pub struct Controller<P: Provider> {
    /// App configuration
    config: Config,
    /// Sequential chunk translator
    translator: ChunkTranslator<P>,
    /// PDF text extractor
    extractor: PdfExtractor,
    /// Speech output
    speech: Box<dyn SpeechOutput>,
    /// Current document state
    session: Mutex<Session>,
    /// Draw progress bars on stderr
    show_progress: bool,
}

impl Controller<HuggingFace> {
    /// Create a new controller talking to the Hugging Face API
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let provider = HuggingFace::new(
            config.translation.api_key.clone(),
            config.translation.endpoint.clone(),
            config.translation.timeout_secs,
        );
        let speech = Box::new(CommandSpeech::from_config(&config.speech));
        Self::with_provider(config, provider, speech)
    }
}

impl<P: Provider> Controller<P> {
    /// Create a controller with an explicit provider and speech output
    pub fn with_provider(config: Config, provider: P, speech: Box<dyn SpeechOutput>) -> Result<Self, AppError> {
        let language = language_utils::resolve_language(&config.target_language)?;
        let chunker = Chunker::new(config.translation.chunk_size);

        Ok(Self {
            translator: ChunkTranslator::new(provider, chunker),
            extractor: PdfExtractor::new(),
            speech,
            session: Mutex::new(Session::new(language)),
            show_progress: false,
            config,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        self.translator.provider()
    }

    /// Copy of the current session state
    pub fn session(&self) -> Session {
        self.session.lock().clone()
    }

    /// Change the target language for the next run
    pub fn select_language(&self, code: &str) -> Result<Language, TranslationError> {
        let language = self.session.lock().select_language(code)?;
        debug!("Selected target language: {} ({})", language.name, language.code);
        Ok(language)
    }

    /// Validate, read and extract a PDF into the session
    ///
    /// Input problems are reported before the session is touched. On an
    /// extraction failure the extracted text is left empty.
    pub async fn load_document(&self, path: &Path) -> Result<ExtractedDocument, AppError> {
        let size = FileManager::validate_pdf(path, self.config.input.max_file_size_bytes)?;
        let bytes = std::fs::read(path).map_err(InputError::Io)?;
        debug!("Read {} bytes from {:?}", size, path);

        self.session.lock().begin_loading()?;
        let guard = PendingGuard::new(&self.session, PendingWork::Load);

        let spinner = self.spinner("Processing document...");
        let start_time = Instant::now();
        let result = self.extractor.extract(bytes).await;
        spinner.finish_and_clear();

        guard.disarm();
        let mut session = self.session.lock();
        match result {
            Ok(document) => {
                info!(
                    "Extracted {} chars from {} page(s) in {}",
                    document.text.chars().count(),
                    document.page_count,
                    Self::format_duration(start_time.elapsed())
                );
                session.finish_loading(Some(document.text.clone()));
                Ok(document)
            }
            Err(e) => {
                error!("Error processing PDF: {}", e);
                session.finish_loading(None);
                Err(e.into())
            }
        }
    }

    /// Translate the extracted text into the selected language
    ///
    /// The language is captured when the run starts. A call made while a run
    /// is in progress is rejected and does not disturb that run. Dropping the
    /// returned future mid-run records the run as failed.
    pub async fn translate(&self) -> Result<String, TranslationError> {
        let (ticket, text) = {
            let mut session = self.session.lock();
            let ticket = session.begin_run()?;
            (ticket, session.extracted_text().to_string())
        };
        let guard = PendingGuard::new(&self.session, PendingWork::Run(ticket));

        let chunks = self.translator.chunker().split(&text);
        info!(
            "Run {}: translating {} chunk(s) to {} ({})",
            ticket.run_id,
            chunks.len(),
            ticket.language.name,
            ticket.language.model
        );

        let progress_bar = self.chunk_progress_bar(chunks.len());
        let pb = progress_bar.clone();
        let start_time = Instant::now();
        let result = self.translator
            .translate_with_language(&chunks, ticket.language, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        guard.disarm();
        let mut session = self.session.lock();
        match result {
            Ok(translated) => {
                session.complete_run(&ticket, translated.clone());
                info!("Translation completed in {}.", Self::format_duration(start_time.elapsed()));
                Ok(translated)
            }
            Err(e) => {
                error!("Translation error: {}", e);
                session.fail_run(&ticket);
                Err(e)
            }
        }
    }

    /// Load a document and translate it right away
    pub async fn process(&self, path: &Path) -> Result<String, AppError> {
        self.load_document(path).await?;
        Ok(self.translate().await?)
    }

    /// Write the translated text as `translated_document_<code>.txt` into `output_dir`
    pub fn download(&self, output_dir: &Path, force_overwrite: bool) -> Result<PathBuf, AppError> {
        let (text, language) = self.finished_translation()?;

        let output_path = output_dir.join(FileManager::download_file_name(language.code));
        if output_path.exists() && !force_overwrite {
            return Err(AppError::File(format!(
                "Output file already exists: {} (use -f to force overwrite)",
                output_path.display()
            )));
        }

        FileManager::write_to_file(&output_path, &text)?;
        info!("Success: {}", output_path.display());
        Ok(output_path)
    }

    /// Speak the translated text; returns without waiting for playback
    pub fn speak(&self) -> Result<(), AppError> {
        let (text, language) = self.finished_translation()?;
        self.speech.speak(&text, language.code)?;
        info!("Speaking translation ({})", language.name);
        Ok(())
    }

    /// Write the extracted text as `<stem>.txt` into `output_dir`
    pub fn save_extracted(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<PathBuf, AppError> {
        let text = self.session.lock().extracted_text().to_string();
        let output_path = FileManager::extracted_output_path(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            return Err(AppError::File(format!(
                "Output file already exists: {} (use -f to force overwrite)",
                output_path.display()
            )));
        }

        FileManager::write_to_file(&output_path, &text)?;
        info!("Success: {}", output_path.display());
        Ok(output_path)
    }

    /// Check that the backend answers for the selected language's model
    pub async fn test_connection(&self) -> Result<Language, ProviderError> {
        let language = self.session.lock().selected_language();
        self.translator.provider().test_connection(language.model).await?;
        Ok(language)
    }

    /// Translated text and its language, if a run completed
    fn finished_translation(&self) -> Result<(String, Language), AppError> {
        let session = self.session.lock();
        if session.run_state() == RunState::Translating {
            return Err(TranslationError::RunInProgress.into());
        }
        match session.translated_language() {
            Some(language) if !session.translated_text().is_empty() => {
                Ok((session.translated_text().to_string(), language))
            }
            _ => {
                warn!("No translated text available");
                Err(AppError::File("There is no translated text yet.".to_string()))
            }
        }
    }

    fn chunk_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar.set_message("Translating...");
        progress_bar
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
