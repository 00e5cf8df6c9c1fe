/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockTextProvider::working()` - Always returns a well-formed field object
 * - `MockTextProvider::scripted(..)` - Returns queued responses in order
 * - `MockTextProvider::failing()` - Always fails with an error
 * - `MockSpeechProvider::working()` / `failing()` / `failing_on_call(n)`
 *
 * Clones share their counters, so a test can keep one handle and give
 * another to the pipeline.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{SpeechProvider, TextProvider};

/// Behavior mode for the mock text provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a valid field object
    Working,
    /// Fails every Nth request
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns text that is not JSON
    Malformed,
}

/// Mock text generation provider
#[derive(Debug, Clone)]
pub struct MockTextProvider {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that answers with non-JSON text
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that replays `responses` in order, then behaves like `working()`.
    /// `Err` entries are returned as API errors.
    pub fn scripted(responses: Vec<Result<String, String>>) -> Self {
        let mock = Self::working();
        if let Ok(mut script) = mock.script.lock() {
            script.extend(responses);
        }
        mock
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// A well-formed field object for request number `n`
    pub fn field_json(n: usize) -> String {
        serde_json::json!({
            "english": format!("meaning {}", n),
            "pinyin": format!("pin{}", n),
            "sentence": format!(" 这是第{}个句子。 ", n),
            "translation": format!("This is sentence {}.", n),
            "cloze": format!("这是第___个句子。 {}", n),
        })
        .to_string()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete_json(&self, prompt: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        if let Some(entry) = scripted {
            return entry.map_err(|message| ProviderError::ApiError { status_code: 500, message });
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::field_json(count + 1)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 500,
                        message: format!("Simulated failure on request {}", count + 1),
                    })
                } else {
                    Ok(Self::field_json(count + 1))
                }
            }
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),
            MockBehavior::Malformed => Ok("Sure! Here is the information you asked for.".to_string()),
        }
    }

    fn name(&self) -> String {
        "Mock text provider".to_string()
    }
}

/// Mock speech provider; audio bytes are the UTF-8 of `AUDIO:<text>`
#[derive(Debug, Clone)]
pub struct MockSpeechProvider {
    fail_on: Option<usize>,
    always_fail: bool,
    request_count: Arc<AtomicUsize>,
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockSpeechProvider {
    fn build(fail_on: Option<usize>, always_fail: bool) -> Self {
        Self {
            fail_on,
            always_fail,
            request_count: Arc::new(AtomicUsize::new(0)),
            texts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeeds
    pub fn working() -> Self {
        Self::build(None, false)
    }

    /// Always fails
    pub fn failing() -> Self {
        Self::build(None, true)
    }

    /// Fails only the given call, counted from 1
    pub fn failing_on_call(call: usize) -> Self {
        Self::build(Some(call), false)
    }

    /// Number of synthesis requests received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts received so far, in order
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }

        if self.always_fail || self.fail_on == Some(call) {
            return Err(ProviderError::RequestFailed(format!("Simulated synthesis failure on call {}", call)));
        }

        Ok(format!("AUDIO:{}", text).into_bytes())
    }

    fn file_extension(&self) -> &str {
        "mp3"
    }

    fn name(&self) -> String {
        "Mock speech provider".to_string()
    }
}
