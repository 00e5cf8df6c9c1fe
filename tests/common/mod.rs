/*!
 * Common test utilities for the hanzi-cards test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use hanzi_cards::Config;
use hanzi_cards::Controller;
use hanzi_cards::providers::mock::{MockSpeechProvider, MockTextProvider};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Default configuration writing into `dir`
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.output_dir = dir.join("output");
    config.generation.api_key = "test-key".to_string();
    config
}

/// Controller wired to the given mocks, without a progress bar
pub fn mock_controller(config: Config, text: &MockTextProvider, speech: &MockSpeechProvider) -> Controller {
    Controller::with_providers(config, Box::new(text.clone()), Box::new(speech.clone()))
        .with_progress_bar(false)
}

/// Data rows of a CSV file, header excluded
pub fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// `count` distinct words
pub fn words(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("词{}", i)).collect()
}
