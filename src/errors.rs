/*!
 * Error types for the hanzi-cards application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

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

impl ProviderError {
    /// Classify a non-success HTTP response
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Classify a reqwest transport error
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that end the processing of a single word.
///
/// None of these stop the run: the controller records the word as failed
/// and moves on to the next one.
#[derive(Error, Debug)]
pub enum WordError {
    /// The generation response was not a JSON object with the five expected string fields
    #[error("Could not parse generated fields for '{word}': {reason}")]
    GenerationParse {
        /// Word being processed
        word: String,
        /// What was wrong with the response
        reason: String,
        /// Raw response text as returned by the service
        raw: String,
    },

    /// The generation call itself failed
    #[error("Generation failed for '{word}': {source}")]
    GenerationService {
        word: String,
        #[source]
        source: ProviderError,
    },

    /// One of the two synthesis calls failed
    #[error("Speech synthesis failed for '{word}': {source}")]
    SynthesisService {
        word: String,
        #[source]
        source: ProviderError,
    },

    /// Synthesized audio could not be written to disk
    #[error("Could not write audio for '{word}' to {path:?}: {message}")]
    AudioWrite {
        word: String,
        path: PathBuf,
        message: String,
    },
}

impl WordError {
    /// The word this failure belongs to
    pub fn word(&self) -> &str {
        match self {
            Self::GenerationParse { word, .. }
            | Self::GenerationService { word, .. }
            | Self::SynthesisService { word, .. }
            | Self::AudioWrite { word, .. } => word,
        }
    }

    /// Short tag used in the run summary
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GenerationParse { .. } => "parse",
            Self::GenerationService { .. } => "generation",
            Self::SynthesisService { .. } | Self::AudioWrite { .. } => "synthesis",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The word list given on the command line does not exist
    #[error("Input file not found: {0:?}")]
    InputNotFound(PathBuf),

    /// Nothing to process
    #[error("No words provided")]
    NoWordsProvided,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}
