/*!
 * Integration tests for provider API interactions
 *
 * The live tests are ignored by default; run them with
 * `cargo test -- --ignored` and real credentials in the environment.
 */

use anyhow::Result;
use hanzi_cards::app_config::{AudioEncoding, SpeechConfig};
use hanzi_cards::generation::{build_prompt, FieldGenerator};
use hanzi_cards::providers::{SpeechProvider, TextProvider};
use hanzi_cards::providers::google_tts::{GoogleTts, SpeechAuth};
use hanzi_cards::providers::mock::MockTextProvider;
use hanzi_cards::providers::openai::{OpenAI, OpenAIRequest};

#[test]
fn test_openaiRequest_withJsonObject_shouldSerializeResponseFormat() -> Result<()> {
    let request = OpenAIRequest::new("gpt-4o-mini")
        .add_message("user", build_prompt("狗"))
        .temperature(0.7)
        .json_object();

    let json = serde_json::to_value(&request)?;

    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["response_format"]["type"], "json_object");
    assert_eq!(json["messages"][0]["role"], "user");
    assert!(json["messages"][0]["content"].as_str().unwrap_or_default().contains("狗"));
    assert!(json.get("temperature").is_some());
    Ok(())
}

#[test]
fn test_googleTts_withOggOpus_shouldUseOggExtension() {
    let config = SpeechConfig {
        audio_encoding: AudioEncoding::OggOpus,
        speaking_rate: Some(0.9),
        ..SpeechConfig::default()
    };
    let tts = GoogleTts::new(&config, SpeechAuth::ApiKey("k".to_string()));

    assert_eq!(tts.file_extension(), "ogg");
    let request = tts.build_request("这是狗。");
    assert_eq!(request.audio_config.audio_encoding, "OGG_OPUS");
    assert_eq!(request.audio_config.speaking_rate, Some(0.9));
}

#[test]
fn test_speechAuth_debug_shouldNotLeakSecrets() {
    let key = format!("{:?}", SpeechAuth::ApiKey("secret-key".to_string()));
    let bearer = format!("{:?}", SpeechAuth::Bearer {
        token: "secret-token".to_string(),
        quota_project: Some("my-project".to_string()),
    });

    assert!(!key.contains("secret-key"));
    assert!(!bearer.contains("secret-token"));
    assert!(bearer.contains("my-project"));
}

#[tokio::test]
async fn test_fieldGenerator_withMalformedProvider_shouldKeepRawResponse() {
    let generator = FieldGenerator::new(Box::new(MockTextProvider::malformed()));

    match generator.generate("狗").await {
        Err(hanzi_cards::WordError::GenerationParse { word, raw, .. }) => {
            assert_eq!(word, "狗");
            assert!(raw.starts_with("Sure!"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_withUnreachableEndpoint_shouldReturnProviderError() {
    let client = OpenAI::new_with_config("test-key", "http://127.0.0.1:9", "gpt-4o-mini", 0.7, 2);

    let result = client.complete_json("ping").await;

    assert!(result.is_err());
}

#[ignore]
#[tokio::test]
async fn test_integration_with_real_openai_api() {
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable not set");

    let client = OpenAI::new_with_config(api_key, "", "gpt-4o-mini", 0.7, 60);
    let generator = FieldGenerator::new(Box::new(client));

    let fields = generator.generate("狗").await.expect("generation should succeed");

    assert!(!fields.english.is_empty());
    assert!(fields.sentence.contains('狗'));
    assert!(!fields.cloze.contains('狗'));
}

#[ignore]
#[tokio::test]
async fn test_integration_with_real_tts_api() {
    let auth = SpeechAuth::resolve(&SpeechConfig {
        api_key: std::env::var("GOOGLE_TTS_API_KEY").unwrap_or_default(),
        ..SpeechConfig::default()
    })
    .expect("speech credentials should be available");

    let tts = GoogleTts::new(&SpeechConfig::default(), auth);
    let audio = tts.synthesize("狗").await.expect("synthesis should succeed");

    assert!(!audio.is_empty());
}
