/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use hanzi_cards::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    // A directory is not a file
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());
    Ok(())
}

#[test]
fn test_write_bytes_withMissingParent_shouldCreateParentAndWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("audio").join("狗_word.mp3");

    FileManager::write_bytes(&path, b"ID3")?;

    assert_eq!(fs::read(&path)?, b"ID3");
    Ok(())
}

#[test]
fn test_replace_file_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.csv", "old content that is longer")?;

    FileManager::replace_file(&path, b"new")?;

    assert_eq!(FileManager::read_to_string(&path)?, "new");
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() {
    let err = FileManager::read_to_string("definitely_missing_file.txt").unwrap_err();
    assert!(format!("{:#}", err).contains("definitely_missing_file.txt"));
}
