//! Loading run configuration and frequency lists.
//!
//! A run can be described by a JSON config file, by CLI flags, or both; the
//! flags win field by field. Frequency strings come from the command line,
//! from a list file (one per line), or from stdin when the path is `-`.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tonegen_spec::{FormatSet, ToneConfig};

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Errors raised while loading inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`GenerateConfig`].
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for `tonegen generate`, as read from a JSON config file.
///
/// ```json
/// {
///   "tone": { "sample_rate": 44100, "duration_seconds": 2.0, "amplitude": 0.25 },
///   "formats": ["wav", "flac"],
///   "out_dir": "tones",
///   "frequencies": ["440", "432.0000000001"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Synthesis parameters.
    pub tone: ToneConfig,
    /// Requested formats.
    pub formats: Option<FormatSet>,
    /// Output directory.
    pub out_dir: Option<PathBuf>,
    /// Keep the WAV intermediate when WAV was not requested.
    pub keep_intermediate: Option<bool>,
    /// Significant digits for frequency parsing.
    pub precision: Option<u64>,
    /// ffmpeg executable.
    pub ffmpeg: Option<PathBuf>,
    /// Per-conversion timeout in seconds.
    pub encoder_timeout_secs: Option<u64>,
    /// Frequencies used when none are given on the command line.
    pub frequencies: Vec<String>,
}

/// Loads a [`GenerateConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<GenerateConfig, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads frequency strings from a list file, or stdin for `-`.
pub fn read_frequency_file(path: &Path) -> Result<Vec<String>, InputError> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new(STDIN_PATH) {
        let stdin = std::io::stdin();
        read_frequencies(stdin.lock()).map_err(read_err)
    } else {
        let file = std::fs::File::open(path).map_err(read_err)?;
        read_frequencies(std::io::BufReader::new(file)).map_err(read_err)
    }
}

/// Collects one frequency per line. Blank lines and `#` comments are ignored.
///
/// Lines are otherwise passed through untouched, so invalid entries still
/// reach the batch and are reported as skipped.
pub fn read_frequencies<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut frequencies = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        frequencies.push(trimmed.to_string());
    }
    Ok(frequencies)
}
