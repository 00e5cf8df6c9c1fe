/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use hanzi_cards::errors::{AppError, ProviderError, WordError};

#[test]
fn test_providerError_fromStatus_shouldClassifyByCode() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "forbidden"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow down"), ProviderError::RateLimitExceeded(_)));

    match ProviderError::from_status(500, "boom") {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_wordError_generationParse_shouldNameWordButNotDumpRawText() {
    let error = WordError::GenerationParse {
        word: "狗".to_string(),
        reason: "missing field 'cloze'".to_string(),
        raw: "{\"english\": \"dog\"}".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("狗"));
    assert!(display.contains("cloze"));
    assert!(!display.contains("english"));
    assert_eq!(error.kind(), "parse");
}

#[test]
fn test_wordError_synthesisService_shouldExposeSource() {
    let error = WordError::SynthesisService {
        word: "猫".to_string(),
        source: ProviderError::ConnectionError("timed out".to_string()),
    };
    assert_eq!(error.word(), "猫");
    let source = std::error::Error::source(&error).expect("source should be set");
    assert!(source.to_string().contains("timed out"));
}

#[test]
fn test_appError_inputNotFound_shouldShowPath() {
    let error = AppError::InputNotFound(PathBuf::from("missing/words.txt"));
    assert!(error.to_string().contains("missing/words.txt"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapIt() {
    let error: AppError = ProviderError::AuthenticationError("no token".to_string()).into();
    assert!(matches!(error, AppError::Provider(ProviderError::AuthenticationError(_))));
    assert!(error.to_string().contains("no token"));
}

#[test]
fn test_appError_throughAnyhow_shouldDowncast() {
    let error: anyhow::Error = AppError::NoWordsProvided.into();
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::NoWordsProvided)));
}
