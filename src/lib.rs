/*!
 * # hanzi-cards - Mandarin flashcards with AI
 *
 * A Rust library that turns a list of Mandarin words into Anki flashcard
 * rows with synthesized audio.
 *
 * ## Features
 *
 * - Read words from a file or interactively, duplicates removed
 * - Generate meaning, pinyin, an example sentence, its translation and a
 *   cloze deletion with an OpenAI-compatible model
 * - Synthesize word and sentence audio with Google Cloud Text-to-Speech
 * - Periodic CSV snapshots so an interrupted run keeps its progress
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `word_source`: Input word list loading and deduplication
 * - `generation`: Prompting and validation of generated fields
 * - `audio`: Speech synthesis and audio file naming
 * - `progress_writer`: CSV snapshots
 * - `app_controller`: The per-word pipeline and run summary
 * - `providers`: Client implementations for the remote services:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::google_tts`: Google Cloud Text-to-Speech client
 *   - `providers::mock`: In-process fakes
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod word_source;
pub mod generation;
pub mod audio;
pub mod progress_writer;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{run_from, Controller, RunSummary, WordOutcome};
pub use generation::{FieldGenerator, GeneratedFields};
pub use audio::{AudioNamer, AudioPaths, AudioSynthesizer};
pub use progress_writer::{ProgressWriter, WordRecord, CSV_HEADER};
pub use word_source::{WordList, WordSource};
pub use errors::{AppError, ProviderError, WordError};
