//! Output format tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Audio container/codec produced by a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// Uncompressed PCM WAV. Always written as the conversion source.
    Wav,
    /// FLAC lossless compression.
    Flac,
    /// Opus in an Ogg container.
    Opus,
    /// MPEG-1 Layer III.
    Mp3,
}

impl AudioFormat {
    /// All formats, in canonical order.
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::Opus,
        AudioFormat::Mp3,
    ];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
            AudioFormat::Opus => "opus",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// True for the uncompressed intermediate format.
    pub fn is_intermediate(&self) -> bool {
        matches!(self, AudioFormat::Wav)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(AudioFormat::Wav),
            "flac" => Ok(AudioFormat::Flac),
            "opus" => Ok(AudioFormat::Opus),
            "mp3" => Ok(AudioFormat::Mp3),
            _ => Err(SpecError::UnknownFormat { tag: s.to_string() }),
        }
    }
}

/// Ordered set of requested formats. Duplicates are dropped, first
/// occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<AudioFormat>", into = "Vec<AudioFormat>")]
pub struct FormatSet {
    formats: Vec<AudioFormat>,
}

impl FormatSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a format if not already present.
    pub fn insert(&mut self, format: AudioFormat) {
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
    }

    /// Returns true if `format` was requested.
    pub fn contains(&self, format: AudioFormat) -> bool {
        self.formats.contains(&format)
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Iterates formats in request order.
    pub fn iter(&self) -> impl Iterator<Item = AudioFormat> + '_ {
        self.formats.iter().copied()
    }

    /// Formats that need the external encoder (everything except WAV).
    pub fn encoded(&self) -> impl Iterator<Item = AudioFormat> + '_ {
        self.iter().filter(|f| !f.is_intermediate())
    }

    /// True if any requested format needs the external encoder.
    pub fn needs_encoder(&self) -> bool {
        self.encoded().next().is_some()
    }

    /// Parses a comma-separated list such as `"wav,flac"`.
    pub fn parse_list(list: &str) -> Result<Self, SpecError> {
        let mut set = FormatSet::new();
        for tag in list.split(',').filter(|t| !t.trim().is_empty()) {
            set.insert(tag.parse()?);
        }
        Ok(set)
    }
}

impl FromIterator<AudioFormat> for FormatSet {
    fn from_iter<I: IntoIterator<Item = AudioFormat>>(iter: I) -> Self {
        let mut set = FormatSet::new();
        for format in iter {
            set.insert(format);
        }
        set
    }
}

impl From<Vec<AudioFormat>> for FormatSet {
    fn from(formats: Vec<AudioFormat>) -> Self {
        formats.into_iter().collect()
    }
}

impl From<FormatSet> for Vec<AudioFormat> {
    fn from(set: FormatSet) -> Self {
        set.formats
    }
}

impl fmt::Display for FormatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.formats.iter().map(|f| f.extension()).collect();
        f.write_str(&tags.join(","))
    }
}
