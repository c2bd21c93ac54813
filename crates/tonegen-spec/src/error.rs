//! Error types for frequency parsing and configuration validation.

use thiserror::Error;

/// Result type for spec-level operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while interpreting caller input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// The frequency string is not a valid non-negative decimal number.
    #[error("invalid frequency '{input}': {reason}")]
    InvalidFrequencyFormat {
        /// The offending input, as supplied.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A tone configuration field is out of range.
    #[error("invalid tone config '{field}': {message}")]
    InvalidToneConfig {
        /// Field name.
        field: &'static str,
        /// Error message.
        message: String,
    },

    /// An output format tag is not recognised.
    #[error("unknown format '{tag}'. Expected one of: wav, flac, opus, mp3")]
    UnknownFormat {
        /// The unrecognised tag.
        tag: String,
    },
}

impl SpecError {
    /// Creates an invalid frequency error.
    pub fn invalid_frequency(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFrequencyFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid tone config error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidToneConfig {
            field,
            message: message.into(),
        }
    }
}

/// Common interface for errors reported by the tonegen backends.
///
/// Codes are stable strings such as `"AUDIO_003"` and are carried into batch
/// reports so failures can be matched programmatically.
pub trait BackendError: std::error::Error {
    /// Stable error code.
    fn code(&self) -> &'static str;

    /// Error category ("spec", "audio", "ffmpeg", ...).
    fn category(&self) -> &'static str;

    /// Human-readable message; defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidFrequencyFormat { .. } => "SPEC_001",
            SpecError::InvalidToneConfig { .. } => "SPEC_002",
            SpecError::UnknownFormat { .. } => "SPEC_003",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}
