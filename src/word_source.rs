/*!
 * Input word list loading.
 *
 * Words come from a newline-delimited file or from interactive entry.
 * Either way the result is trimmed, free of empty entries and
 * deduplicated with the first occurrence kept.
 */

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::errors::AppError;
use crate::file_utils::FileManager;

/// Ordered, deduplicated list of words to process
#[derive(Debug, Clone, PartialEq)]
pub struct WordList {
    /// Words in processing order
    pub words: Vec<String>,
    /// How many duplicate entries were dropped
    pub duplicates_removed: usize,
}

impl WordList {
    /// Build a list from raw entries, dropping duplicates
    pub fn new(raw: Vec<String>) -> Result<Self> {
        if raw.is_empty() {
            return Err(AppError::NoWordsProvided.into());
        }

        let (words, duplicates_removed) = dedupe(raw);
        if duplicates_removed > 0 {
            info!("Removed {} duplicate word(s)", duplicates_removed);
        }

        Ok(Self { words, duplicates_removed })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Loads words from a file or an interactive session
pub struct WordSource;

impl WordSource {
    /// Read a newline-delimited word list.
    ///
    /// Fails with `AppError::InputNotFound` when `path` does not exist and
    /// with `AppError::NoWordsProvided` when it holds no words.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<WordList> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::InputNotFound(path.to_path_buf()).into());
        }

        let content = FileManager::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        WordList::new(parse_lines(content))
    }

    /// Prompt for one word per line until an empty line or end of input
    pub fn from_reader<R: BufRead, W: Write>(mut reader: R, mut prompt: W) -> Result<WordList> {
        let mut raw = Vec::new();
        loop {
            write!(prompt, "Enter a Hanzi word (empty line to finish): ")
                .context("Failed to write prompt")?;
            prompt.flush().context("Failed to flush prompt")?;

            let mut line = String::new();
            let read = reader.read_line(&mut line).context("Failed to read word from input")?;
            let word = line.trim();
            if read == 0 || word.is_empty() {
                break;
            }
            raw.push(word.to_string());
        }

        WordList::new(raw)
    }

}

/// Trim every line and drop the empty ones
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove duplicates, keeping each word's first position.
/// Returns the remaining words and the number removed.
pub fn dedupe(words: Vec<String>) -> (Vec<String>, usize) {
    let total = words.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<String> = words
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect();
    let removed = total - unique.len();
    (unique, removed)
}
