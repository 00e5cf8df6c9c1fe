/*!
 * Provider implementations for the remote services.
 *
 * This module contains client implementations for the two collaborators:
 * - OpenAI: text generation with JSON-object responses
 * - Google Cloud Text-to-Speech: speech synthesis
 * - Mock: in-process fakes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for text generation providers
///
/// The pipeline only needs one thing from a language model: a prompt in,
/// the raw text of a JSON object out.
#[async_trait]
pub trait TextProvider: Send + Sync + Debug {
    /// Complete a prompt, asking the service for a JSON object response
    ///
    /// # Arguments
    /// * `prompt` - The full instruction prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw response text or an error
    async fn complete_json(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Human readable provider name for logs
    fn name(&self) -> String;
}

/// Common trait for speech synthesis providers
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug {
    /// Synthesize `text` and return the encoded audio bytes
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;

    /// Extension of the files this provider produces, without the dot
    fn file_extension(&self) -> &str;

    /// Human readable provider name for logs
    fn name(&self) -> String;
}

pub mod openai;
pub mod google_tts;
pub mod mock;
