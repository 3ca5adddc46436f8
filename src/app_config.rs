use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;
use log::warn;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language code, must be in the language table
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Input boundary config
    #[serde(default)]
    pub input: InputConfig,

    /// Speech output config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Directory the translated document is written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Inference API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token sent as a bearer token
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum characters per chunk sent to the backend
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// File input boundary configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    /// Largest accepted PDF in bytes
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Text-to-speech program to spawn
    #[serde(default = "default_speech_command")]
    pub command: String,

    /// Program arguments, `{lang}` is replaced with the language tag
    #[serde(default = "default_speech_args")]
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: default_speech_command(),
            args: default_speech_args(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the log crate
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    crate::language_utils::DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_chunk_size() -> usize {
    500
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

fn default_speech_args() -> Vec<String> {
    vec!["-v".to_string(), "{lang}".to_string(), "--stdin".to_string()]
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the settings every command relies on
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_target_language(&self.target_language)?;

        if self.translation.chunk_size == 0 {
            return Err(anyhow!("Chunk size must be greater than zero"));
        }

        if self.input.max_file_size_bytes == 0 {
            return Err(anyhow!("Maximum file size must be greater than zero"));
        }

        Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;

        if self.speech.command.trim().is_empty() {
            return Err(anyhow!("Speech command cannot be empty"));
        }

        Ok(())
    }

    /// Validate everything needed to talk to the translation backend
    pub fn validate_for_translation(&self) -> Result<()> {
        self.validate()?;

        if self.translation.api_key.trim().is_empty() {
            return Err(anyhow!("Translation API key is required (set it in the config file, pass --api-key or export HF_API_TOKEN)"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            input: InputConfig::default(),
            speech: SpeechConfig::default(),
            output_dir: None,
            log_level: LogLevel::default(),
        }
    }
}
