use anyhow::Result;
use log::{error, warn, info};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::audio::AudioSynthesizer;
use crate::errors::{AppError, WordError};
use crate::generation::FieldGenerator;
use crate::progress_writer::{ProgressWriter, WordRecord};
use crate::providers::{SpeechProvider, TextProvider};
use crate::providers::openai::OpenAI;
use crate::providers::google_tts::{GoogleTts, SpeechAuth};
use crate::word_source::{WordList, WordSource};

// @module: Application controller for the flashcard pipeline

/// Result of processing one word
pub type WordOutcome = Result<WordRecord, WordError>;

/// What a run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Rows written, in processing order
    pub records: Vec<WordRecord>,
    /// Why each failed word failed, in processing order
    pub failures: Vec<WordError>,
    /// Duplicates dropped from the input
    pub duplicates_removed: usize,
    /// Where the table was written
    pub csv_path: PathBuf,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn success_count(&self) -> usize {
        self.records.len()
    }

    /// Failed words, verbatim, in processing order
    pub fn failed_words(&self) -> Vec<&str> {
        self.failures.iter().map(WordError::word).collect()
    }

    /// Multi-line report printed at the end of a run
    pub fn report(&self) -> String {
        let mut report = format!(
            "Processing complete in {}!\nSuccessfully processed: {} words",
            Controller::format_duration(self.elapsed),
            self.success_count()
        );
        if !self.failures.is_empty() {
            report.push_str(&format!(
                "\nFailed to process: {} words\nFailed words: {}",
                self.failures.len(),
                self.failed_words().join(", ")
            ));
            for failure in &self.failures {
                report.push_str(&format!("\n  {} ({}): {}", failure.word(), failure.kind(), failure));
            }
        }
        report
    }
}

/// Main application controller for flashcard generation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Field generation service
    generator: FieldGenerator,
    // @field: Speech synthesis service
    synthesizer: AudioSynthesizer,
    // @field: Snapshot target
    writer: ProgressWriter,
    // @field: Draw a progress bar
    show_progress: bool,
}

impl Controller {
    /// Create a controller with the real OpenAI and Google TTS clients
    pub fn with_config(config: Config) -> Result<Self> {
        // Checked before the speech credentials, which may shell out to gcloud
        config.validate_credentials()?;

        let generation = &config.generation;
        let text_provider = OpenAI::new_with_config(
            generation.api_key.clone(),
            generation.endpoint.clone(),
            generation.model.clone(),
            generation.temperature,
            generation.timeout_secs,
        );

        let auth = SpeechAuth::resolve(&config.speech).map_err(AppError::Provider)?;
        let speech_provider = GoogleTts::new(&config.speech, auth);

        Ok(Self::with_providers(config, Box::new(text_provider), Box::new(speech_provider)))
    }

    /// Create a controller around explicit service handles
    pub fn with_providers(
        config: Config,
        text_provider: Box<dyn TextProvider>,
        speech_provider: Box<dyn SpeechProvider>,
    ) -> Self {
        let generator = FieldGenerator::new(text_provider);
        let synthesizer = AudioSynthesizer::new(speech_provider, config.output.audio_dir());
        let writer = ProgressWriter::new(config.output.csv_path());

        Self {
            config,
            generator,
            synthesizer,
            writer,
            show_progress: true,
        }
    }

    /// Enable or disable the terminal progress bar
    pub fn with_progress_bar(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Generate, synthesize and assemble the record for one word.
    ///
    /// Errors are returned, never logged or swallowed here; the caller decides
    /// what a failure means for the run.
    pub async fn process_word(&mut self, hanzi: &str) -> WordOutcome {
        let fields = self.generator.generate(hanzi).await?;

        let paths = self.synthesizer.paths_for(hanzi);
        if let Err(e) = self.synthesizer.synthesize_pair(hanzi, &fields.sentence, &paths).await {
            self.synthesizer.release(&paths);
            return Err(e);
        }

        Ok(WordRecord {
            hanzi: hanzi.to_string(),
            english: fields.english,
            pinyin: fields.pinyin,
            sentence: fields.sentence,
            translation: fields.translation,
            cloze: fields.cloze,
            audio_word_ref: paths.word_ref(),
            audio_sentence_ref: paths.sentence_ref(),
        })
    }

    /// Run the whole pipeline over `words`
    pub async fn run(&mut self, words: &WordList) -> Result<RunSummary> {
        let start_time = Instant::now();
        let checkpoint_interval = self.config.output.checkpoint_interval.max(1);

        info!("Generator: {} - Speech: {}",
            self.generator.provider_name(),
            self.synthesizer.provider_name());

        // Header-only table, so the file exists even if the first word fails
        self.writer.snapshot(&[])?;

        let progress_bar = self.create_progress_bar(words.len() as u64);
        info!("Processing {} words...", words.len());

        let mut records: Vec<WordRecord> = Vec::with_capacity(words.len());
        let mut failures = Vec::new();

        for hanzi in &words.words {
            progress_bar.set_message(hanzi.clone());
            progress_bar.suspend(|| info!("Processing: {}", hanzi));

            match self.process_word(hanzi).await {
                Ok(record) => {
                    records.push(record);

                    if records.len() % checkpoint_interval == 0 {
                        progress_bar.suspend(|| info!("Saving progress after {} words...", records.len()));
                        self.writer.snapshot(&records)?;
                    }
                }
                Err(e) => {
                    progress_bar.suspend(|| match &e {
                        WordError::GenerationParse { raw, .. } => {
                            error!("Error processing {}: {}", hanzi, e);
                            warn!("Raw response was: {}", raw);
                        }
                        _ => error!("Error processing {}: {}", hanzi, e),
                    });
                    failures.push(e);
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        // Final save of all processed rows
        self.writer.snapshot(&records)?;

        Ok(RunSummary {
            records,
            failures,
            duplicates_removed: words.duplicates_removed,
            csv_path: self.writer.path().to_path_buf(),
            elapsed: start_time.elapsed(),
        })
    }

    fn create_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Load the words, then build a controller and run it over them.
///
/// Words come from `input_path` when given, otherwise from `reader` with
/// prompts written to `prompt`. `build_controller` is only called once there
/// is something to process, so a missing file or an empty list never reaches
/// a remote service. Returns `Ok(None)` when no words were provided.
pub async fn run_from<R, W, F>(
    config: Config,
    input_path: Option<&Path>,
    reader: R,
    prompt: W,
    build_controller: F,
) -> Result<Option<RunSummary>>
where
    R: BufRead,
    W: Write,
    F: FnOnce(Config) -> Result<Controller>,
{
    let loaded = match input_path {
        Some(path) => WordSource::from_file(path),
        None => WordSource::from_reader(reader, prompt),
    };

    let words = match loaded {
        Ok(words) => words,
        Err(e) if matches!(e.downcast_ref::<AppError>(), Some(AppError::NoWordsProvided)) => {
            warn!("No words to process");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let mut controller = build_controller(config)?;
    controller.run(&words).await.map(Some)
}
