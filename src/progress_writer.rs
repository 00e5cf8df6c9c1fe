/*!
 * CSV snapshots of the finished flashcard rows.
 *
 * Every snapshot rewrites the whole file with all rows so far. The file on
 * disk is therefore always a complete table as of the last checkpoint.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::file_utils::FileManager;

/// Column header of the output table, in order
pub const CSV_HEADER: [&str; 8] = [
    "Hanzi",
    "English",
    "Pinyin",
    "Sentence",
    "Sentence (Translation)",
    "Sentence (Cloze)",
    "Audio (Word)",
    "Audio (Sentence)",
];

/// One finished flashcard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    #[serde(rename = "Hanzi")]
    pub hanzi: String,
    #[serde(rename = "English")]
    pub english: String,
    #[serde(rename = "Pinyin")]
    pub pinyin: String,
    #[serde(rename = "Sentence")]
    pub sentence: String,
    #[serde(rename = "Sentence (Translation)")]
    pub translation: String,
    #[serde(rename = "Sentence (Cloze)")]
    pub cloze: String,
    #[serde(rename = "Audio (Word)")]
    pub audio_word_ref: String,
    #[serde(rename = "Audio (Sentence)")]
    pub audio_sentence_ref: String,
}

/// Render the full table for `records`
pub fn render_csv(records: &[WordRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).context("Failed to write CSV header")?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write CSV row for {}", record.hanzi))?;
    }

    writer.into_inner().context("Failed to finish CSV output")
}

/// Writes snapshots to a fixed path
#[derive(Debug, Clone)]
pub struct ProgressWriter {
    path: PathBuf,
}

impl ProgressWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with the header and every record, in order
    pub fn snapshot(&self, records: &[WordRecord]) -> Result<()> {
        let content = render_csv(records)?;
        FileManager::replace_file(&self.path, &content)
            .with_context(|| format!("Failed to save progress to {}", self.path.display()))?;
        debug!("Snapshot of {} row(s) written to {}", records.len(), self.path.display());
        Ok(())
    }
}
