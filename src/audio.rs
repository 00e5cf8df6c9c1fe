/*!
 * Audio clip synthesis and file naming.
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;

use crate::errors::WordError;
use crate::file_utils::FileManager;
use crate::providers::SpeechProvider;

/// The two audio files of one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPaths {
    /// Sanitised, run-unique file name stem
    pub stem: String,
    pub word: PathBuf,
    pub sentence: PathBuf,
}

impl AudioPaths {
    /// `[sound:<basename>]` markup for the word clip
    pub fn word_ref(&self) -> String {
        sound_ref(&self.word)
    }

    /// `[sound:<basename>]` markup for the sentence clip
    pub fn sentence_ref(&self) -> String {
        sound_ref(&self.sentence)
    }
}

/// Anki playback markup referencing a file by basename only
pub fn sound_ref(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("[sound:{}]", name)
}

fn hostile_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\p{Cc}]"#).expect("static regex"))
}

/// Replace characters that cannot appear in a file name
pub fn sanitize_stem(hanzi: &str) -> String {
    let stem = hostile_chars().replace_all(hanzi.trim(), "_").to_string();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        stem
    }
}

/// Derives unique audio file names for the words of one run.
///
/// Every stem handed out is remembered; a word whose stem is already taken
/// gets the next free numeric suffix (`<stem>-2`, `<stem>-3`, ...).
#[derive(Debug)]
pub struct AudioNamer {
    audio_dir: PathBuf,
    extension: String,
    used: HashSet<String>,
}

impl AudioNamer {
    pub fn new(audio_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            audio_dir: audio_dir.into(),
            extension: extension.into(),
            used: HashSet::new(),
        }
    }

    /// Reserve file names for `hanzi`
    pub fn reserve(&mut self, hanzi: &str) -> AudioPaths {
        let base = sanitize_stem(hanzi);
        let mut stem = base.clone();
        let mut suffix = 2;
        while self.used.contains(&stem) {
            stem = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        if stem != base {
            warn!("Audio file name for '{}' collides with an earlier word, using '{}'", hanzi, stem);
        }
        self.used.insert(stem.clone());

        AudioPaths {
            word: self.audio_dir.join(format!("{}_word.{}", stem, self.extension)),
            sentence: self.audio_dir.join(format!("{}_sentence.{}", stem, self.extension)),
            stem,
        }
    }

    /// Give back a reservation whose audio was never completed
    pub fn release(&mut self, paths: &AudioPaths) {
        self.used.remove(&paths.stem);
    }
}

/// Synthesizes text through a speech provider and stores the audio
#[derive(Debug)]
pub struct AudioSynthesizer {
    provider: Box<dyn SpeechProvider>,
    namer: AudioNamer,
}

impl AudioSynthesizer {
    pub fn new(provider: Box<dyn SpeechProvider>, audio_dir: impl Into<PathBuf>) -> Self {
        let namer = AudioNamer::new(audio_dir, provider.file_extension());
        Self { provider, namer }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> String {
        self.provider.name()
    }

    /// Reserve the file names for `hanzi`
    pub fn paths_for(&mut self, hanzi: &str) -> AudioPaths {
        self.namer.reserve(hanzi)
    }

    /// Free the file names of a word whose clips could not be produced
    pub fn release(&mut self, paths: &AudioPaths) {
        self.namer.release(paths);
    }

    /// Both clips of one word: the bare word first, then the sentence
    pub async fn synthesize_pair(&self, hanzi: &str, sentence: &str, paths: &AudioPaths) -> Result<(), WordError> {
        self.synthesize(hanzi, hanzi, &paths.word).await?;
        self.synthesize(hanzi, sentence, &paths.sentence).await
    }

    /// Synthesize `text` for `word` and write the audio to `destination`
    pub async fn synthesize(&self, word: &str, text: &str, destination: &Path) -> Result<(), WordError> {
        let audio = self
            .provider
            .synthesize(text)
            .await
            .map_err(|source| WordError::SynthesisService {
                word: word.to_string(),
                source,
            })?;

        FileManager::write_bytes(destination, &audio).map_err(|e| WordError::AudioWrite {
            word: word.to_string(),
            path: destination.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        debug!("Wrote {} bytes to {}", audio.len(), destination.display());
        Ok(())
    }
}
