/*!
 * Tests for audio synthesis and file naming
 */

use std::fs;
use anyhow::Result;
use hanzi_cards::audio::{sound_ref, AudioNamer, AudioSynthesizer};
use hanzi_cards::errors::WordError;
use hanzi_cards::providers::mock::MockSpeechProvider;
use crate::common;

#[tokio::test]
async fn test_synthesize_withWorkingProvider_shouldCreateDirsAndWriteBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio_dir = temp_dir.path().join("nested").join("audio");
    let mock = MockSpeechProvider::working();
    let mut synthesizer = AudioSynthesizer::new(Box::new(mock.clone()), &audio_dir);

    let paths = synthesizer.paths_for("狗");
    synthesizer.synthesize("狗", "这是狗。", &paths.sentence).await?;

    assert_eq!(fs::read(&paths.sentence)?, "AUDIO:这是狗。".as_bytes());
    assert_eq!(paths.sentence, audio_dir.join("狗_sentence.mp3"));
    assert!(!paths.word.exists());
    assert_eq!(mock.texts(), vec!["这是狗。"]);
    Ok(())
}

#[tokio::test]
async fn test_synthesize_withFailingProvider_shouldReturnSynthesisErrorAndWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mock = MockSpeechProvider::failing();
    let mut synthesizer = AudioSynthesizer::new(Box::new(mock.clone()), temp_dir.path());

    let paths = synthesizer.paths_for("猫");
    let err = synthesizer.synthesize("猫", "猫", &paths.word).await.unwrap_err();

    assert!(matches!(err, WordError::SynthesisService { ref word, .. } if word == "猫"));
    assert_eq!(err.kind(), "synthesis");
    assert!(!paths.word.exists());
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_synthesize_withUnwritableDestination_shouldReturnAudioWriteError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // A regular file where a directory is expected
    let blocker = common::create_test_file(temp_dir.path(), "blocker", "x")?;
    let synthesizer = AudioSynthesizer::new(Box::new(MockSpeechProvider::working()), temp_dir.path());

    let err = synthesizer
        .synthesize("鱼", "鱼", &blocker.join("鱼_word.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(err, WordError::AudioWrite { .. }));
    Ok(())
}

#[test]
fn test_audioNamer_withSameWordTwice_shouldNotReuseFileNames() {
    let mut namer = AudioNamer::new("audio", "mp3");

    let first = namer.reserve("行");
    let second = namer.reserve("行");

    assert_ne!(first.word, second.word);
    assert_ne!(first.sentence, second.sentence);
    assert_eq!(second.word_ref(), "[sound:行-2_word.mp3]");
}

#[test]
fn test_soundRef_withNestedPath_shouldUseBasenameOnly() {
    let path = std::path::Path::new("/tmp/deck/output/audio/学习_word.mp3");
    assert_eq!(sound_ref(path), "[sound:学习_word.mp3]");
}

#[test]
fn test_audioNamer_afterRelease_shouldHandOutStemAgain() {
    let mut namer = AudioNamer::new("audio", "mp3");

    let abandoned = namer.reserve("A/B");
    namer.release(&abandoned);
    let next = namer.reserve("A:B");

    assert_eq!(next.stem, "A_B");
    assert_eq!(next.word_ref(), "[sound:A_B_word.mp3]");
}
