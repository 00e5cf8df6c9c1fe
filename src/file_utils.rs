use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

// @module: Filesystem helpers for word lists, audio clips and snapshots

// @struct: Stateless filesystem helpers
pub struct FileManager;

impl FileManager {
    // @checks: Regular file at path
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory tree, no-op when present
    pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory {:?}", dir))?;
        }
        Ok(())
    }

    /// Whole file as UTF-8 text
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Cannot read {:?}", path))
    }

    /// Write an audio clip or other binary payload, creating its directory
    pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            Self::ensure_dir(dir)?;
        }
        fs::write(path, bytes).with_context(|| format!("Cannot write {:?}", path))
    }

    /// Replace `path` with `content` in one step.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the destination, so the old file stays intact until
    /// the new one is complete.
    pub fn replace_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content)
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
        temp.as_file().sync_all()
            .with_context(|| format!("Failed to flush temporary file for {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to replace file: {:?}", path))?;

        Ok(())
    }
}
