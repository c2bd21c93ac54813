//! Per-item and per-batch outcome records.

use std::path::PathBuf;

use serde::Serialize;
use tonegen_backend_ffmpeg::ConversionResult;
use tonegen_spec::{BackendError, FormatSet, ToneConfig};

/// Terminal state of one batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// The intermediate was written and every requested conversion attempted.
    Done,
    /// The frequency string did not parse; nothing was written.
    Skipped,
    /// Synthesis or the intermediate write failed.
    Failed,
}

/// Error attached to a skipped or failed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemError {
    /// Stable error code, e.g. `SPEC_001`.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl ItemError {
    pub(crate) fn from_backend(err: &dyn BackendError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
        }
    }
}

/// Outcome of one batch item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    /// Zero-based position in the input.
    pub index: usize,
    /// The frequency string as supplied.
    pub input: String,
    /// Shared file stem of every artifact.
    pub base_name: String,
    /// Parsed frequency in Hz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hz: Option<f64>,
    /// Terminal state.
    pub status: ItemStatus,
    /// Parse, synthesis, or write error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
    /// Path of the WAV intermediate once written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<PathBuf>,
    /// Whether the intermediate is still on disk after the item finished.
    pub intermediate_retained: bool,
    /// Why the intermediate could not be deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_error: Option<String>,
    /// Number of samples synthesized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_samples: Option<usize>,
    /// BLAKE3 hash of the PCM data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// One entry per requested non-WAV format, in request order.
    pub conversions: Vec<ConversionResult>,
}

impl ItemReport {
    pub(crate) fn new(index: usize, input: &str, base_name: String) -> Self {
        Self {
            index,
            input: input.to_string(),
            base_name,
            hz: None,
            status: ItemStatus::Done,
            error: None,
            intermediate: None,
            intermediate_retained: false,
            cleanup_error: None,
            num_samples: None,
            pcm_hash: None,
            conversions: Vec::new(),
        }
    }

    pub(crate) fn skipped(mut self, err: &dyn BackendError) -> Self {
        self.status = ItemStatus::Skipped;
        self.error = Some(ItemError::from_backend(err));
        self
    }

    pub(crate) fn failed(mut self, err: &dyn BackendError) -> Self {
        self.status = ItemStatus::Failed;
        self.error = Some(ItemError::from_backend(err));
        self
    }

    /// Number of conversions that failed.
    pub fn failed_conversions(&self) -> usize {
        self.conversions.iter().filter(|c| !c.is_success()).count()
    }

    /// True if the item is done and every conversion succeeded.
    pub fn is_clean(&self) -> bool {
        self.status == ItemStatus::Done && self.failed_conversions() == 0
    }
}

/// Outcome of a whole batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Output directory.
    pub out_dir: PathBuf,
    /// Tone parameters shared by every item.
    pub tone: ToneConfig,
    /// Requested formats.
    pub formats: FormatSet,
    /// Number of items processed.
    pub total: usize,
    /// Items that reached [`ItemStatus::Done`].
    pub done: usize,
    /// Items skipped on parse errors.
    pub skipped: usize,
    /// Items that failed during synthesis or writing.
    pub failed: usize,
    /// Conversions that failed across all items.
    pub failed_conversions: usize,
    /// Per-item results in input order.
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub(crate) fn new(
        out_dir: PathBuf,
        tone: ToneConfig,
        formats: FormatSet,
        items: Vec<ItemReport>,
    ) -> Self {
        let count = |status: ItemStatus| items.iter().filter(|i| i.status == status).count();
        Self {
            out_dir,
            tone,
            formats,
            total: items.len(),
            done: count(ItemStatus::Done),
            skipped: count(ItemStatus::Skipped),
            failed: count(ItemStatus::Failed),
            failed_conversions: items.iter().map(ItemReport::failed_conversions).sum(),
            items,
        }
    }

    /// True if nothing was skipped or failed.
    pub fn is_success(&self) -> bool {
        self.skipped == 0 && self.failed == 0 && self.failed_conversions == 0
    }
}
