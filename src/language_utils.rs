use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;

use crate::errors::TranslationError;

/// Language utilities for the fixed target language table
///
/// Every target language the application offers maps to exactly one backend
/// model. The table is closed: codes outside of it are rejected, even when
/// they are valid ISO 639-1 codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code, also used as the speech language tag
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Backend model identifier for English to this language
    pub model: &'static str,
}

/// Code selected when nothing else is configured
pub const DEFAULT_LANGUAGE_CODE: &str = "es";

/// Selectable target languages
pub const SUPPORTED_LANGUAGES: [Language; 10] = [
    Language { code: "fr", name: "French", model: "Helsinki-NLP/opus-mt-en-fr" },
    Language { code: "es", name: "Spanish", model: "Helsinki-NLP/opus-mt-en-es" },
    Language { code: "de", name: "German", model: "Helsinki-NLP/opus-mt-en-de" },
    Language { code: "it", name: "Italian", model: "Helsinki-NLP/opus-mt-en-it" },
    Language { code: "pt", name: "Portuguese", model: "Helsinki-NLP/opus-mt-en-pt" },
    Language { code: "ru", name: "Russian", model: "Helsinki-NLP/opus-mt-en-ru" },
    Language { code: "ja", name: "Japanese", model: "Helsinki-NLP/opus-mt-en-ja" },
    Language { code: "ko", name: "Korean", model: "Helsinki-NLP/opus-mt-en-ko" },
    Language { code: "zh", name: "Chinese", model: "Helsinki-NLP/opus-mt-en-zh" },
    Language { code: "hi", name: "Hindi", model: "Helsinki-NLP/opus-mt-en-hi" },
];

/// Find a language in the table by code (case and surrounding whitespace are ignored)
pub fn find_language(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.iter()
        .copied()
        .find(|lang| lang.code == normalized_code)
}

/// Resolve a code to a table entry or fail with the unsupported-language error
pub fn resolve_language(code: &str) -> Result<Language, TranslationError> {
    find_language(code).ok_or_else(|| TranslationError::UnsupportedLanguage(code.to_string()))
}

/// The language selected by default
pub fn default_language() -> Language {
    // The default code is part of the table
    find_language(DEFAULT_LANGUAGE_CODE).unwrap_or(SUPPORTED_LANGUAGES[1])
}

/// Check whether a code is a valid ISO 639-1 code at all
pub fn is_iso_639_1(code: &str) -> bool {
    let normalized_code = code.trim().to_lowercase();
    normalized_code.len() == 2 && IsoLanguage::from_639_1(&normalized_code).is_some()
}

/// Validate a target language code and explain why it is rejected
///
/// Distinguishes codes that are not languages at all from real languages
/// that simply have no model in the table.
pub fn validate_target_language(code: &str) -> Result<Language> {
    if let Some(lang) = find_language(code) {
        return Ok(lang);
    }

    let supported = supported_codes().join(", ");
    if is_iso_639_1(code) {
        let name = IsoLanguage::from_639_1(&code.trim().to_lowercase())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| code.to_string());
        Err(anyhow!("{} ({}) is not a supported target language. Supported: {}", name, code, supported))
    } else {
        Err(anyhow!("Invalid language code: {}. Supported: {}", code, supported))
    }
}

/// All codes of the table, in table order
pub fn supported_codes() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|lang| lang.code).collect()
}
