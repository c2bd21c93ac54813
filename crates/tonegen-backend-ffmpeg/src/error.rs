//! Error types for the ffmpeg backend.

use thiserror::Error;
use tonegen_spec::{AudioFormat, BackendError};

/// Result type for encoder operations.
pub type EncoderResult<T> = Result<T, EncoderError>;

/// Errors that can occur while invoking the external encoder.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// ffmpeg executable not found.
    #[error("ffmpeg executable not found ({detail}). Install ffmpeg and add it to PATH, or set TONEGEN_FFMPEG")]
    NotFound {
        /// Where we looked.
        detail: String,
    },

    /// Failed to spawn the ffmpeg process.
    #[error("failed to spawn ffmpeg: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// ffmpeg did not finish in time and was killed.
    #[error("ffmpeg timed out after {timeout_secs} seconds")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// ffmpeg exited with a non-zero status.
    #[error("ffmpeg exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        /// Exit code, or -1 if terminated by a signal.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The format has no encoder parameters (WAV is never encoded).
    #[error("format '{format}' is not produced by the encoder")]
    UnsupportedFormat {
        /// The requested format.
        format: AudioFormat,
    },

    /// IO error while talking to the process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncoderError {
    /// Creates a process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }
}

impl BackendError for EncoderError {
    fn code(&self) -> &'static str {
        match self {
            EncoderError::NotFound { .. } => "FFMPEG_001",
            EncoderError::SpawnFailed(_) => "FFMPEG_002",
            EncoderError::Timeout { .. } => "FFMPEG_003",
            EncoderError::ProcessFailed { .. } => "FFMPEG_004",
            EncoderError::UnsupportedFormat { .. } => "FFMPEG_005",
            EncoderError::Io(_) => "FFMPEG_006",
        }
    }

    fn category(&self) -> &'static str {
        "ffmpeg"
    }
}
