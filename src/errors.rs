/*!
 * Error types for the pdflingo application.
 *
 * This module contains custom error types for the different stages of a
 * document's trip through the application, using the thiserror crate for
 * ergonomic error definitions. Every error also knows the single message that
 * is shown to the user when it ends an operation.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a dropped file is over the size cap
pub const MSG_FILE_TOO_LARGE: &str = "PDF file is too large. Maximum size allowed is 10MB.";

/// Message shown for any extraction or input failure
pub const MSG_PROCESSING_FAILED: &str = "Error processing PDF. Please try again.";

/// Message shown when the selected code is not in the language table
pub const MSG_LANGUAGE_NOT_SUPPORTED: &str = "Language not supported";

/// Message shown when the document has no text layer
pub const MSG_NO_EXTRACTABLE_TEXT: &str = "The PDF has no extractable text (it may be a scanned document), so there is nothing to translate.";

/// Message shown when a translation run fails on the backend
pub const MSG_TRANSLATION_FAILED: &str = "Error translating text. The text might be too long or the selected language model might not be available. Please try with a shorter text or a different language.";

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised at the file input boundary, before any processing
#[derive(Error, Debug)]
pub enum InputError {
    /// The path does not point to an existing file
    #[error("Input file does not exist: {0:?}")]
    NotFound(PathBuf),

    /// The file is neither named nor shaped like a PDF
    #[error("Input file is not a PDF: {0:?}")]
    NotPdf(PathBuf),

    /// The file is over the configured size cap
    #[error("Input file is {size} bytes, maximum allowed is {max} bytes")]
    TooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Configured cap in bytes
        max: u64,
    },

    /// No file was handed over at all
    #[error("No input file given")]
    Missing,

    /// Reading file metadata or content failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while extracting text from a PDF
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document could not be parsed at all
    #[error("Failed to parse PDF document: {0}")]
    Parse(String),

    /// Text extraction failed on a single page
    #[error("Failed to extract text from page {page}: {message}")]
    Page {
        /// One-based page number
        page: u32,
        /// Underlying error message
        message: String,
    },

    /// The blocking extraction task did not finish
    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Errors that can occur during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The selected code does not resolve in the language table
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    /// A chunk request failed and the run was aborted
    #[error("Translation of chunk {index} failed: {source}")]
    Chunk {
        /// Zero-based index of the failing chunk
        index: usize,
        /// Provider error that ended the run
        #[source]
        source: ProviderError,
    },

    /// Error from the provider API outside of a chunk request
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A run was requested while another one is still translating
    #[error("A translation is already in progress")]
    RunInProgress,

    /// A document is still being read
    #[error("A document is still loading")]
    LoadInProgress,

    /// The document has no extractable text, typically a scanned PDF
    #[error("No extractable text to translate")]
    NothingToTranslate,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error at the input boundary
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from PDF extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl InputError {
    /// The message shown to the user for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => MSG_FILE_TOO_LARGE,
            _ => MSG_PROCESSING_FAILED,
        }
    }
}

impl ExtractionError {
    /// The message shown to the user for this error
    pub fn user_message(&self) -> &'static str {
        MSG_PROCESSING_FAILED
    }
}

impl TranslationError {
    /// The message shown to the user for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage(_) => MSG_LANGUAGE_NOT_SUPPORTED,
            Self::RunInProgress => "A translation is already in progress. Please wait for it to finish.",
            Self::LoadInProgress => "A document is still loading. Please wait for it to finish.",
            Self::NothingToTranslate => MSG_NO_EXTRACTABLE_TEXT,
            Self::Chunk { .. } | Self::Provider(_) => MSG_TRANSLATION_FAILED,
        }
    }
}

impl AppError {
    /// The message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(e) => e.user_message().to_string(),
            Self::Extraction(e) => e.user_message().to_string(),
            Self::Translation(e) => e.user_message().to_string(),
            Self::Provider(_) => MSG_TRANSLATION_FAILED.to_string(),
            Self::File(message) | Self::Unknown(message) => message.clone(),
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
