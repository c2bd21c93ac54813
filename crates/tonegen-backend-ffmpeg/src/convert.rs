//! Failure-isolated format conversion.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tonegen_spec::{AudioFormat, BackendError};

use crate::encoder::Encoder;
use crate::error::EncoderError;
use crate::params::EncodeParams;

/// Outcome of converting the intermediate into one format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    /// The encoder exited successfully.
    Succeeded {
        /// Target format.
        format: AudioFormat,
        /// Output file.
        path: PathBuf,
    },
    /// The encoder could not be run or exited with an error.
    Failed {
        /// Target format.
        format: AudioFormat,
        /// Intended output file.
        path: PathBuf,
        /// Stable error code, e.g. `FFMPEG_004`.
        code: String,
        /// Error message.
        reason: String,
    },
}

impl ConversionResult {
    fn failed(format: AudioFormat, path: &Path, err: &EncoderError) -> Self {
        ConversionResult::Failed {
            format,
            path: path.to_path_buf(),
            code: err.code().to_string(),
            reason: err.to_string(),
        }
    }

    /// Target format.
    pub fn format(&self) -> AudioFormat {
        match self {
            ConversionResult::Succeeded { format, .. } | ConversionResult::Failed { format, .. } => {
                *format
            }
        }
    }

    /// Output path (produced or intended).
    pub fn path(&self) -> &Path {
        match self {
            ConversionResult::Succeeded { path, .. } | ConversionResult::Failed { path, .. } => path,
        }
    }

    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Succeeded { .. })
    }
}

/// Converts `source` into `format` at `dest`.
///
/// Never fails: every encoder error is captured in the returned
/// [`ConversionResult`] so one format cannot prevent the others.
pub fn convert(
    encoder: &dyn Encoder,
    source: &Path,
    dest: &Path,
    format: AudioFormat,
) -> ConversionResult {
    let Some(params) = EncodeParams::for_format(format) else {
        return ConversionResult::failed(format, dest, &EncoderError::UnsupportedFormat { format });
    };

    match encoder.encode(source, dest, &params) {
        Ok(()) => {
            log::debug!("encoded {} -> {}", source.display(), dest.display());
            ConversionResult::Succeeded {
                format,
                path: dest.to_path_buf(),
            }
        }
        Err(err) => {
            log::warn!("{} conversion of {} failed: {}", format, source.display(), err);
            ConversionResult::failed(format, dest, &err)
        }
    }
}
