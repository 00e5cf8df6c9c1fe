use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Text generation service settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech synthesis service settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Output locations and checkpointing
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation (OpenAI-compatible) service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    // @field: Model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    // @field: API key, falls back to OPENAI_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            api_key: String::new(),
            endpoint: default_generation_endpoint(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

/// Speech synthesis (Google Cloud Text-to-Speech) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// BCP-47 language code of the voice
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Voice name
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    /// Output encoding
    #[serde(default)]
    pub audio_encoding: AudioEncoding,

    /// Service URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// API key, falls back to GOOGLE_TTS_API_KEY when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Speaking rate, 1.0 is the voice's natural speed
    #[serde(default)]
    pub speaking_rate: Option<f32>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            voice_name: default_voice_name(),
            audio_encoding: AudioEncoding::default(),
            endpoint: default_speech_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            speaking_rate: None,
        }
    }
}

/// Audio encodings supported by the speech service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    OggOpus,
    Linear16,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    // @returns: Identifier expected by the synthesis API
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::OggOpus => "OGG_OPUS",
            Self::Linear16 => "LINEAR16",
            Self::Mulaw => "MULAW",
            Self::Alaw => "ALAW",
        }
    }

    // @returns: File extension for audio in this encoding
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggOpus => "ogg",
            Self::Linear16 | Self::Mulaw | Self::Alaw => "wav",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl std::str::FromStr for AudioEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "MP3" => Ok(Self::Mp3),
            "OGG_OPUS" | "OGG" => Ok(Self::OggOpus),
            "LINEAR16" | "WAV" => Ok(Self::Linear16),
            "MULAW" => Ok(Self::Mulaw),
            "ALAW" => Ok(Self::Alaw),
            _ => Err(anyhow!("Invalid audio encoding: {}", s)),
        }
    }
}

/// Where results are written and how often
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Root output directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Audio directory, relative to `output_dir`
    #[serde(default = "default_audio_subdir")]
    pub audio_subdir: String,

    /// CSV file name, relative to `output_dir`
    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: String,

    /// Number of successful words between two snapshots
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            audio_subdir: default_audio_subdir(),
            csv_file_name: default_csv_file_name(),
            checkpoint_interval: default_checkpoint_interval(),
        }
    }
}

impl OutputConfig {
    /// Full path of the CSV snapshot
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_file_name)
    }

    /// Full path of the audio directory
    pub fn audio_dir(&self) -> PathBuf {
        self.output_dir.join(&self.audio_subdir)
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

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_speech_endpoint() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_language_code() -> String {
    "cmn-CN".to_string()
}

fn default_voice_name() -> String {
    "cmn-CN-Chirp3-HD-Achernar".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_audio_subdir() -> String {
    "audio".to_string()
}

fn default_csv_file_name() -> String {
    "notes.csv".to_string()
}

fn default_checkpoint_interval() -> usize {
    10
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    AppError::Config(message.into()).into()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.generation.model.trim().is_empty() {
            return Err(config_error("Generation model must not be empty"));
        }

        Url::parse(&self.generation.endpoint).map_err(|e| {
            config_error(format!("Invalid generation endpoint '{}': {}", self.generation.endpoint, e))
        })?;
        Url::parse(&self.speech.endpoint).map_err(|e| {
            config_error(format!("Invalid speech endpoint '{}': {}", self.speech.endpoint, e))
        })?;

        if self.speech.language_code.trim().is_empty() || self.speech.voice_name.trim().is_empty() {
            return Err(config_error("Speech language code and voice name are required"));
        }

        if let Some(rate) = self.speech.speaking_rate {
            if !(0.25..=4.0).contains(&rate) {
                return Err(config_error(format!("Speaking rate must be between 0.25 and 4.0, got {}", rate)));
            }
        }

        if self.output.checkpoint_interval == 0 {
            return Err(config_error("Checkpoint interval must be at least 1"));
        }

        if self.output.csv_file_name.trim().is_empty() {
            return Err(config_error("CSV file name must not be empty"));
        }

        Ok(())
    }

    /// Check that the generation service can be authenticated
    pub fn validate_credentials(&self) -> Result<()> {
        if self.generation.api_key.is_empty() {
            return Err(config_error(
                "Generation API key is required (set OPENAI_API_KEY or generation.api_key)",
            ));
        }
        Ok(())
    }

    /// Fill empty credentials from the process environment
    pub fn apply_env_credentials(&mut self) {
        if self.generation.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.generation.api_key = key.trim().to_string();
            }
        }

        if self.speech.api_key.is_empty() {
            if let Ok(key) = std::env::var("GOOGLE_TTS_API_KEY") {
                self.speech.api_key = key.trim().to_string();
            }
        }
    }
}
