/*!
 * Google Cloud Text-to-Speech client.
 *
 * Uses the REST `text:synthesize` method. Audio comes back base64 encoded
 * in the `audioContent` field.
 */

use std::process::Command;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::{AudioEncoding, SpeechConfig};
use crate::errors::ProviderError;
use super::SpeechProvider;

/// How requests are authenticated
#[derive(Clone)]
pub enum SpeechAuth {
    /// `?key=` query parameter
    ApiKey(String),
    /// OAuth access token sent as a bearer header
    Bearer {
        token: String,
        /// Quota project for user credentials
        quota_project: Option<String>,
    },
}

impl std::fmt::Debug for SpeechAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => write!(f, "ApiKey(***)"),
            Self::Bearer { quota_project, .. } => f
                .debug_struct("Bearer")
                .field("quota_project", quota_project)
                .finish_non_exhaustive(),
        }
    }
}

impl SpeechAuth {
    /// Resolve credentials: configured API key, then `GOOGLE_ACCESS_TOKEN`,
    /// then the application default credentials known to `gcloud`.
    pub fn resolve(config: &SpeechConfig) -> Result<Self, ProviderError> {
        if !config.api_key.is_empty() {
            return Ok(Self::ApiKey(config.api_key.clone()));
        }

        let quota_project = std::env::var("GOOGLE_CLOUD_PROJECT")
            .ok()
            .filter(|p| !p.trim().is_empty());

        if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                return Ok(Self::Bearer { token: token.trim().to_string(), quota_project });
            }
        }

        let output = Command::new("gcloud")
            .args(["auth", "application-default", "print-access-token"])
            .output()
            .map_err(|e| ProviderError::AuthenticationError(format!(
                "No speech credentials found and gcloud could not be run: {}", e
            )))?;

        if !output.status.success() {
            return Err(ProviderError::AuthenticationError(format!(
                "gcloud could not print an access token: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ProviderError::AuthenticationError("gcloud returned an empty access token".to_string()));
        }

        Ok(Self::Bearer { token, quota_project })
    }
}

/// Synthesis request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelection,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
pub struct SynthesisInput {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
}

/// Synthesis response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    /// Base64 encoded audio
    pub audio_content: String,
}

/// Google Cloud Text-to-Speech client
#[derive(Debug)]
pub struct GoogleTts {
    client: Client,
    auth: SpeechAuth,
    endpoint: String,
    language_code: String,
    voice_name: String,
    encoding: AudioEncoding,
    speaking_rate: Option<f32>,
}

impl GoogleTts {
    /// Create a client for the voice described by `config`
    pub fn new(config: &SpeechConfig, auth: SpeechAuth) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            auth,
            endpoint: config.endpoint.clone(),
            language_code: config.language_code.clone(),
            voice_name: config.voice_name.clone(),
            encoding: config.audio_encoding,
            speaking_rate: config.speaking_rate,
        }
    }

    fn api_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.endpoint.trim_end_matches('/'))
    }

    /// Build the request body for `text`
    pub fn build_request(&self, text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            input: SynthesisInput { text: text.to_string() },
            voice: VoiceSelection {
                language_code: self.language_code.clone(),
                name: self.voice_name.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.encoding.api_name().to_string(),
                speaking_rate: self.speaking_rate,
            },
        }
    }

    /// Decode the audio payload of a response
    pub fn decode_audio(response: &SynthesizeResponse) -> Result<Vec<u8>, ProviderError> {
        BASE64_STANDARD
            .decode(response.audio_content.as_bytes())
            .map_err(|e| ProviderError::ParseError(format!("audioContent is not valid base64: {}", e)))
    }
}

#[async_trait]
impl SpeechProvider for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        debug!("Synthesizing: {}", text);

        let mut builder = self.client.post(self.api_url()).json(&self.build_request(text));
        builder = match &self.auth {
            SpeechAuth::ApiKey(key) => builder.query(&[("key", key)]),
            SpeechAuth::Bearer { token, quota_project } => {
                let builder = builder.bearer_auth(token);
                match quota_project {
                    Some(project) => builder.header("x-goog-user-project", project),
                    None => builder,
                }
            }
        };

        let response = builder.send().await.map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Text-to-Speech API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response.json::<SynthesizeResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Text-to-Speech response: {}", e)))?;

        Self::decode_audio(&body)
    }

    fn file_extension(&self) -> &str {
        self.encoding.file_extension()
    }

    fn name(&self) -> String {
        format!("Google TTS ({})", self.voice_name)
    }
}
