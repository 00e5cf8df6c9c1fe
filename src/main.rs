// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use hanzi_cards::app_config::{self, AudioEncoding, Config};
use hanzi_cards::Controller;
use hanzi_cards::app_controller::run_from;

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
    /// Generate shell completions for hanzi-cards
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// hanzi-cards - Mandarin flashcards with AI
///
/// Turns a list of Mandarin words into Anki flashcard rows (meaning, pinyin,
/// example sentence, translation, cloze) plus word and sentence audio.
#[derive(Parser, Debug)]
#[command(name = "hanzi-cards")]
#[command(version)]
#[command(about = "Generate Mandarin flashcards with audio")]
#[command(long_about = "hanzi-cards generates Anki flashcard rows and audio for Mandarin vocabulary.

EXAMPLES:
    hanzi-cards words.txt                       # Process a word list, one word per line
    hanzi-cards                                 # Enter words interactively
    hanzi-cards -o deck words.txt               # Write to deck/notes.csv and deck/audio/
    hanzi-cards -m gpt-4o words.txt             # Use a different model
    hanzi-cards --checkpoint-every 5 words.txt  # Save progress every 5 words
    hanzi-cards completions bash > hanzi-cards.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created automatically. OPENAI_API_KEY (environment or .env)
    is used when no key is configured. Speech synthesis uses GOOGLE_TTS_API_KEY,
    GOOGLE_ACCESS_TOKEN, or the gcloud application default credentials.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word list, one word per line; omit to enter words interactively
    #[arg(value_name = "WORD_LIST")]
    input_path: Option<PathBuf>,

    /// Output directory for notes.csv and the audio folder
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Text-to-speech voice name
    #[arg(short, long)]
    voice: Option<String>,

    /// Audio encoding (MP3, OGG_OPUS, LINEAR16, MULAW, ALAW)
    #[arg(long)]
    audio_encoding: Option<AudioEncoding>,

    /// Save progress after this many successful words
    #[arg(long)]
    checkpoint_every: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Variables already present in the environment win over .env
    let _ = dotenvy::dotenv();

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "hanzi-cards", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

async fn run(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = options.config_path.clone();
    let config_exists = Path::new(&config_path).exists();
    let mut config = if config_exists {
        load_config(&config_path)?
    } else {
        Config::default()
    };
    apply_overrides(&mut config, &options);
    config.apply_env_credentials();

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // The default config is only written once there are words to process
    let stdin = std::io::stdin();
    let summary = run_from(
        config,
        options.input_path.as_deref(),
        stdin.lock(),
        std::io::stdout(),
        |config| {
            if !config_exists {
                write_default_config(&config_path)?;
            }
            Controller::with_config(config)
        },
    ).await?;

    if let Some(summary) = summary {
        println!("\n{}", summary.report());
        info!("Notes written to {}", summary.csv_path.display());
    }

    Ok(())
}

// Load configuration from an existing file
fn load_config(config_path: &str) -> Result<Config> {
    let file = File::open(config_path)
        .context(format!("Failed to open config file: {}", config_path))?;

    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .context(format!("Failed to parse config file: {}", config_path))?;

    Ok(config)
}

// Create a config file holding the defaults
fn write_default_config(config_path: &str) -> Result<()> {
    warn!("Config file not found at '{}', creating default config.", config_path);

    let config_json = serde_json::to_string_pretty(&Config::default())
        .context("Failed to serialize default config to JSON")?;

    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(())
}

// Override config with CLI options if provided
fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(output_dir) = &options.output_dir {
        config.output.output_dir = output_dir.clone();
    }

    if let Some(model) = &options.model {
        config.generation.model = model.clone();
    }

    if let Some(voice) = &options.voice {
        config.speech.voice_name = voice.clone();
    }

    if let Some(encoding) = options.audio_encoding {
        config.speech.audio_encoding = encoding;
    }

    if let Some(interval) = options.checkpoint_every {
        config.output.checkpoint_interval = interval;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
