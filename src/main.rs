// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use pdflingo::app_config::{self, Config};
use pdflingo::errors::{AppError, ExtractionError, InputError, ProviderError, TranslationError};
use pdflingo::file_utils::FileManager;
use pdflingo::language_utils::{self, SUPPORTED_LANGUAGES};
use pdflingo::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a PDF document (default command)
    Translate(TranslateArgs),

    /// List the supported target languages
    Languages,

    /// Check that the translation backend answers for the target language
    Check {
        /// Target language code (e.g., 'fr', 'de', 'ja')
        #[arg(short, long)]
        target_language: Option<String>,

        /// Hugging Face API token
        #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Generate shell completions for pdflingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
struct TranslateArgs {
    /// PDF file to translate (only the first one is used)
    #[arg(value_name = "PDF_FILE")]
    inputs: Vec<PathBuf>,

    /// Target language code (e.g., 'fr', 'de', 'ja')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum characters per chunk sent to the backend
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Directory the translated document is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Read the translation aloud when done
    #[arg(long)]
    speak: bool,

    /// Extract the text without translating it
    #[arg(short, long)]
    extract_only: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Hugging Face API token
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    api_key: Option<String>,
}

/// pdflingo - PDF translation with hosted translation models
///
/// Extracts the text of a PDF, translates it chunk by chunk with the
/// Helsinki-NLP opus-mt models on the Hugging Face Inference API, and saves
/// or speaks the result.
#[derive(Parser, Debug)]
#[command(name = "pdflingo")]
#[command(version)]
#[command(about = "Translate the text of PDF documents")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "pdflingo extracts the text of a PDF and translates it from English with hosted translation models.

EXAMPLES:
    pdflingo paper.pdf                          # Translate to the configured language
    pdflingo -t fr paper.pdf                    # Translate to French
    pdflingo -t de --speak paper.pdf            # Translate to German and read it aloud
    pdflingo -e paper.pdf                       # Extract the text without translation
    pdflingo --chunk-size 300 paper.pdf         # Send smaller chunks to the backend
    pdflingo languages                          # List supported languages
    pdflingo check -t ja                        # Check the Japanese model answers
    pdflingo completions bash > pdflingo.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. The API token can also be given with the
    HF_API_TOKEN environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Register for every level; the effective level is set with set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        // One user-facing message, details only at debug level
        error!("{}", user_message(&e));
        debug!("{:?}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pdflingo", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            let config = load_config(&cli.config_path, cli.log_level.is_none())?;
            print_languages(&config.target_language);
            Ok(())
        }
        Some(Commands::Check { target_language, api_key }) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_none())?;
            if let Some(code) = target_language {
                config.target_language = code;
            }
            if let Some(key) = api_key {
                config.translation.api_key = key;
            }
            config.validate_for_translation().context("Configuration validation failed")?;
            run_check(config).await
        }
        Some(Commands::Translate(args)) => run_translate(args, &cli.config_path, cli.log_level.is_none()).await,
        None => run_translate(cli.translate, &cli.config_path, cli.log_level.is_none()).await,
    }
}

/// Load the config and apply its log level unless the CLI set one
fn load_config(config_path: &str, use_config_log_level: bool) -> Result<Config> {
    let config = Config::load_or_create(config_path)?;
    if use_config_log_level {
        log::set_max_level(config.log_level.to_level_filter());
    }
    Ok(config)
}

async fn run_translate(options: TranslateArgs, config_path: &str, use_config_log_level: bool) -> Result<()> {
    let input_path = FileManager::pick_single_input(&options.inputs)
        .map_err(|e| anyhow!(e).context("PDF_FILE is required when no subcommand is specified"))?;

    let mut config = load_config(config_path, use_config_log_level)?;

    // Override config with CLI options if provided
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(chunk_size) = options.chunk_size {
        config.translation.chunk_size = chunk_size;
    }
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = Some(output_dir.clone());
    }

    // Validate the configuration after loading and overriding
    let validation = if options.extract_only {
        config.validate()
    } else {
        config.validate_for_translation()
    };
    validation.context("Configuration validation failed")?;

    let output_dir = config.output_dir.clone().unwrap_or_else(FileManager::default_output_dir);
    let controller = Controller::with_config(config)?.with_progress(true);

    controller.load_document(&input_path).await?;

    if options.extract_only {
        controller.save_extracted(&input_path, &output_dir, options.force_overwrite)?;
        return Ok(());
    }

    controller.translate().await?;
    controller.download(&output_dir, options.force_overwrite)?;

    if options.speak {
        controller.speak()?;
    }

    Ok(())
}

async fn run_check(config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let language = controller.test_connection().await?;
    info!("Backend answered for {} ({})", language.name, language.model);
    Ok(())
}

fn print_languages(selected_code: &str) {
    let selected = language_utils::find_language(selected_code);
    for lang in SUPPORTED_LANGUAGES.iter() {
        let marker = if Some(*lang) == selected { "*" } else { " " };
        println!("{} {:<3} {:<11} {}", marker, lang.code, lang.name, lang.model);
    }
    if selected.is_none() {
        warn!("Configured target language '{}' is not supported", selected_code);
    }
}

/// The single message shown to the user for a failed command
fn user_message(error: &anyhow::Error) -> String {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<AppError>() {
            return e.user_message();
        }
        if let Some(e) = cause.downcast_ref::<InputError>() {
            return e.user_message().to_string();
        }
        if let Some(e) = cause.downcast_ref::<ExtractionError>() {
            return e.user_message().to_string();
        }
        if let Some(e) = cause.downcast_ref::<TranslationError>() {
            return e.user_message().to_string();
        }
        if let Some(e) = cause.downcast_ref::<ProviderError>() {
            return format!("Backend check failed: {}", e);
        }
    }
    format!("{:#}", error)
}
