/*!
 * Flashcard field generation.
 *
 * One prompt per word; the answer must be a JSON object with exactly the
 * string fields `english`, `pinyin`, `sentence`, `translation` and `cloze`.
 * The answer is validated right after parsing, so a caller either gets all
 * five fields or a `WordError::GenerationParse`.
 */

use log::debug;
use serde_json::Value;

use crate::errors::WordError;
use crate::providers::TextProvider;

/// Keys the generation response must contain
pub const REQUIRED_KEYS: [&str; 5] = ["english", "pinyin", "sentence", "translation", "cloze"];

const PROMPT_TEMPLATE: &str = r#"You are a Mandarin language assistant. For the word: {hanzi}, provide the following:
1. English meaning
2. Pinyin
3. Example sentence using the word
4. English translation of the sentence
5. Sentence with the word replaced by a blank (cloze format). Make sure the cloze deletion has low ambiguity and the missing word is clearly {hanzi}, not another word.

Respond in JSON like this:
{
  "english": "...",
  "pinyin": "...",
  "sentence": "...",
  "translation": "...",
  "cloze": "..."
}"#;

/// Validated output of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFields {
    pub english: String,
    pub pinyin: String,
    pub sentence: String,
    pub translation: String,
    pub cloze: String,
}

impl GeneratedFields {
    /// Parse and validate a raw response for `word`
    pub fn parse(word: &str, raw: &str) -> Result<Self, WordError> {
        let parse_error = |reason: String| WordError::GenerationParse {
            word: word.to_string(),
            reason,
            raw: raw.to_string(),
        };

        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| parse_error(format!("response is not valid JSON ({})", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| parse_error("response is not a JSON object".to_string()))?;

        let field = |key: &str| -> Result<String, WordError> {
            match object.get(key) {
                Some(Value::String(text)) => Ok(text.trim().to_string()),
                Some(other) => Err(parse_error(format!("field '{}' is not a string: {}", key, other))),
                None => Err(parse_error(format!("missing field '{}'", key))),
            }
        };

        Ok(Self {
            english: field("english")?,
            pinyin: field("pinyin")?,
            sentence: field("sentence")?,
            translation: field("translation")?,
            cloze: field("cloze")?,
        })
    }
}

/// Render the instruction prompt for `hanzi`
pub fn build_prompt(hanzi: &str) -> String {
    PROMPT_TEMPLATE.replace("{hanzi}", hanzi)
}

/// Generates flashcard fields through a text provider
#[derive(Debug)]
pub struct FieldGenerator {
    provider: Box<dyn TextProvider>,
}

impl FieldGenerator {
    pub fn new(provider: Box<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> String {
        self.provider.name()
    }

    /// One generation call for `hanzi`; never retried
    pub async fn generate(&self, hanzi: &str) -> Result<GeneratedFields, WordError> {
        let raw = self
            .provider
            .complete_json(&build_prompt(hanzi))
            .await
            .map_err(|source| WordError::GenerationService {
                word: hanzi.to_string(),
                source,
            })?;

        debug!("Generation response for {}: {}", hanzi, raw);
        GeneratedFields::parse(hanzi, &raw)
    }
}
