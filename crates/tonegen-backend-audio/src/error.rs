//! Error types for audio backend.

use std::path::PathBuf;

use thiserror::Error;
use tonegen_spec::{BackendError, SpecError};

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during tone synthesis and WAV writing.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Tone configuration rejected before synthesis.
    #[error(transparent)]
    InvalidConfig(#[from] SpecError),

    /// Invalid frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// The sample count does not fit a WAV data chunk.
    #[error("tone too long: {num_samples} samples exceeds the WAV size limit")]
    TooLong {
        /// Requested sample count.
        num_samples: usize,
    },

    /// Writing the WAV file failed.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl AudioError {
    /// Creates a write failure error.
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidConfig(_) => "AUDIO_001",
            AudioError::InvalidFrequency { .. } => "AUDIO_002",
            AudioError::TooLong { .. } => "AUDIO_003",
            AudioError::WriteFailed { .. } => "AUDIO_004",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
