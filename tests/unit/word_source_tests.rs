/*!
 * Tests for word list loading
 */

use std::io::Cursor;
use anyhow::Result;
use hanzi_cards::errors::AppError;
use hanzi_cards::word_source::{dedupe, WordList, WordSource};
use crate::common;

#[test]
fn test_fromFile_withWordsAndBlankLines_shouldPreserveOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "words.txt", "\u{feff}狗\n  猫  \n\n\n学习\r\n")?;

    let list = WordSource::from_file(&path)?;

    assert_eq!(list.words, vec!["狗", "猫", "学习"]);
    assert_eq!(list.duplicates_removed, 0);
    Ok(())
}

#[test]
fn test_fromFile_withDuplicates_shouldReportRemovedCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "words.txt", "狗\n猫\n狗\n鱼\n猫\n狗\n")?;

    let list = WordSource::from_file(&path)?;

    assert_eq!(list.words, vec!["狗", "猫", "鱼"]);
    assert_eq!(list.duplicates_removed, 6 - 3);
    Ok(())
}

#[test]
fn test_fromFile_withMissingPath_shouldFailWithInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("nope.txt");

    let err = WordSource::from_file(&missing).unwrap_err();

    match err.downcast_ref::<AppError>() {
        Some(AppError::InputNotFound(path)) => assert_eq!(path, &missing),
        other => panic!("expected InputNotFound, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_fromFile_withOnlyBlankLines_shouldFailWithNoWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.txt", "\n   \n\t\n")?;

    let err = WordSource::from_file(&path).unwrap_err();

    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NoWordsProvided)));
    Ok(())
}

#[test]
fn test_fromReader_withWordsThenEmptyLine_shouldStopAtEmptyLine() -> Result<()> {
    let input = Cursor::new("狗\n 猫 \n\n鱼\n");
    let mut prompts = Vec::new();

    let list = WordSource::from_reader(input, &mut prompts)?;

    assert_eq!(list.words, vec!["狗", "猫"]);
    let prompt_text = String::from_utf8(prompts)?;
    assert_eq!(prompt_text.matches("Enter a Hanzi word").count(), 3);
    Ok(())
}

#[test]
fn test_fromReader_withEndOfInput_shouldKeepWordsRead() -> Result<()> {
    let list = WordSource::from_reader(Cursor::new("狗\n猫"), Vec::new())?;
    assert_eq!(list.words, vec!["狗", "猫"]);
    Ok(())
}

#[test]
fn test_fromReader_withImmediateEmptyLine_shouldFailWithNoWords() {
    let err = WordSource::from_reader(Cursor::new("\n狗\n"), Vec::new()).unwrap_err();
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NoWordsProvided)));
}

#[test]
fn test_dedupe_withManyRepeats_shouldMatchFirstOccurrenceOrder() {
    let input: Vec<String> = "a b a c b d a e".split(' ').map(str::to_string).collect();

    let (unique, removed) = dedupe(input.clone());

    assert_eq!(unique, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(removed, input.len() - unique.len());
}

#[test]
fn test_wordList_new_withNoEntries_shouldFail() {
    assert!(WordList::new(Vec::new()).is_err());
}
