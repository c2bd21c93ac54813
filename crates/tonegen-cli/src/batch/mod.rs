//! Batch orchestration.
//!
//! Drives each frequency through the pipeline in input order:
//!
//! ```text
//! Parsing -> Synthesizing -> WritingIntermediate -> Converting(1..N) -> Done
//!    |             |                  |
//!    v             +--------+---------+
//! Skipped                   v
//!                         Failed
//! ```
//!
//! A bad item never stops the batch. The only fatal errors are an invalid
//! tone config and an output directory that cannot be created, both raised
//! before the first item.

mod report;


pub use report::{BatchReport, ItemError, ItemReport, ItemStatus};

use std::path::PathBuf;

use thiserror::Error;
use tonegen_backend_audio::{synthesize, wav};
use tonegen_backend_ffmpeg::{convert, ConversionResult, Encoder};
use tonegen_spec::{
    artifact_path, base_name, AudioFormat, BackendError, DecimalPrecision, FormatSet,
    FrequencyParser, SpecError, ToneConfig,
};

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "audio_output";

/// Fatal errors that abort a batch before any item is processed.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The tone config is out of range.
    #[error(transparent)]
    InvalidToneConfig(SpecError),

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl BackendError for BatchError {
    fn code(&self) -> &'static str {
        match self {
            BatchError::InvalidToneConfig(_) => "BATCH_001",
            BatchError::CreateOutputDir { .. } => "BATCH_002",
        }
    }

    fn category(&self) -> &'static str {
        "batch"
    }
}

/// Settings shared by every item of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Synthesis parameters.
    pub tone: ToneConfig,
    /// Requested output formats.
    pub formats: FormatSet,
    /// Directory receiving every artifact.
    pub out_dir: PathBuf,
    /// Keep the WAV intermediate even when WAV was not requested.
    pub keep_intermediate: bool,
    /// Significant digits used when parsing frequency strings.
    pub precision: DecimalPrecision,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            tone: ToneConfig::default(),
            formats: [AudioFormat::Flac].into_iter().collect(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            keep_intermediate: true,
            precision: DecimalPrecision::default(),
        }
    }
}

/// Pipeline step reported to a [`BatchObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Parsing the frequency string.
    Parsing,
    /// Rendering samples.
    Synthesizing,
    /// Writing the WAV intermediate.
    WritingIntermediate,
    /// Encoding into one format.
    Converting(AudioFormat),
    /// Deleting the intermediate.
    Cleanup,
}

/// Progress callbacks. Observers cannot influence the pipeline.
pub trait BatchObserver {
    /// Called before an item is parsed.
    fn item_started(&mut self, _index: usize, _input: &str) {}

    /// Called as an item enters each step.
    fn step(&mut self, _index: usize, _step: Step) {}

    /// Called after each conversion attempt.
    fn conversion_finished(&mut self, _index: usize, _result: &ConversionResult) {}

    /// Called once an item reaches a terminal state.
    fn item_finished(&mut self, _report: &ItemReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Runs the full pipeline for every frequency string, in order.
///
/// Duplicates are processed independently and overwrite each other's files.
pub fn run_batch<I, S>(
    frequencies: I,
    options: &BatchOptions,
    encoder: &dyn Encoder,
    observer: &mut dyn BatchObserver,
) -> Result<BatchReport, BatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    options
        .tone
        .validate()
        .map_err(BatchError::InvalidToneConfig)?;

    std::fs::create_dir_all(&options.out_dir).map_err(|source| BatchError::CreateOutputDir {
        path: options.out_dir.clone(),
        source,
    })?;

    let parser = FrequencyParser::new(options.precision);
    let mut items = Vec::new();

    for (index, input) in frequencies.into_iter().enumerate() {
        let report = process_item(index, input.as_ref(), &parser, options, encoder, observer);
        observer.item_finished(&report);
        items.push(report);
    }

    Ok(BatchReport::new(
        options.out_dir.clone(),
        options.tone,
        options.formats.clone(),
        items,
    ))
}

fn process_item(
    index: usize,
    input: &str,
    parser: &FrequencyParser,
    options: &BatchOptions,
    encoder: &dyn Encoder,
    observer: &mut dyn BatchObserver,
) -> ItemReport {
    observer.item_started(index, input);
    let base = base_name(input);
    let mut report = ItemReport::new(index, input, base.clone());

    observer.step(index, Step::Parsing);
    let frequency = match parser.parse(input) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("skipping '{}': {}", input, e);
            return report.skipped(&e);
        }
    };
    if !frequency.round_trips() {
        log::debug!(
            "'{}' narrowed to {} Hz ({} significant digits)",
            input,
            frequency.hz(),
            parser.precision().digits()
        );
    }
    report.hz = Some(frequency.hz());

    observer.step(index, Step::Synthesizing);
    let buffer = match synthesize(frequency.hz(), &options.tone) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("synthesis of '{}' failed: {}", input, e);
            return report.failed(&e);
        }
    };

    observer.step(index, Step::WritingIntermediate);
    let wav_path = artifact_path(&options.out_dir, &base, AudioFormat::Wav);
    if let Err(e) = wav::write_wav_file(&wav_path, &buffer) {
        log::warn!("{}", e);
        return report.failed(&e);
    }
    report.num_samples = Some(buffer.len());
    report.pcm_hash = Some(buffer.pcm_hash());
    report.intermediate = Some(wav_path.clone());
    report.intermediate_retained = true;

    for format in options.formats.encoded() {
        observer.step(index, Step::Converting(format));
        let dest = artifact_path(&options.out_dir, &base, format);
        let result = convert(encoder, &wav_path, &dest, format);
        observer.conversion_finished(index, &result);
        report.conversions.push(result);
    }

    if !options.formats.contains(AudioFormat::Wav) && !options.keep_intermediate {
        observer.step(index, Step::Cleanup);
        match std::fs::remove_file(&wav_path) {
            Ok(()) => report.intermediate_retained = false,
            Err(e) => {
                log::warn!("failed to delete {}: {}", wav_path.display(), e);
                report.cleanup_error = Some(e.to_string());
            }
        }
    }

    report
}
