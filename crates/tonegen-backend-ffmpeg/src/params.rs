//! Per-format encoding parameters.

use serde::Serialize;
use tonegen_spec::AudioFormat;

/// FLAC compression level (maximum).
pub const FLAC_COMPRESSION_LEVEL: u8 = 8;
/// Opus bitrate in kbps.
pub const OPUS_BITRATE_KBPS: u32 = 128;
/// MP3 bitrate in kbps.
pub const MP3_BITRATE_KBPS: u32 = 320;

/// Fixed encoder settings for one target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "codec", rename_all = "snake_case")]
pub enum EncodeParams {
    /// FLAC at a given compression level.
    Flac {
        /// 0 (fastest) to 12.
        compression_level: u8,
    },
    /// Opus via libopus.
    Opus {
        /// Target bitrate in kbps.
        bitrate_kbps: u32,
    },
    /// MP3 via libmp3lame.
    Mp3 {
        /// Constant bitrate in kbps.
        bitrate_kbps: u32,
    },
}

impl EncodeParams {
    /// Default parameters for `format`, or `None` for WAV.
    pub fn for_format(format: AudioFormat) -> Option<Self> {
        match format {
            AudioFormat::Wav => None,
            AudioFormat::Flac => Some(EncodeParams::Flac {
                compression_level: FLAC_COMPRESSION_LEVEL,
            }),
            AudioFormat::Opus => Some(EncodeParams::Opus {
                bitrate_kbps: OPUS_BITRATE_KBPS,
            }),
            AudioFormat::Mp3 => Some(EncodeParams::Mp3 {
                bitrate_kbps: MP3_BITRATE_KBPS,
            }),
        }
    }

    /// The format these parameters produce.
    pub fn format(&self) -> AudioFormat {
        match self {
            EncodeParams::Flac { .. } => AudioFormat::Flac,
            EncodeParams::Opus { .. } => AudioFormat::Opus,
            EncodeParams::Mp3 { .. } => AudioFormat::Mp3,
        }
    }

    /// ffmpeg output options selecting the codec and its settings.
    pub fn codec_args(&self) -> Vec<String> {
        match self {
            EncodeParams::Flac { compression_level } => vec![
                "-c:a".into(),
                "flac".into(),
                "-compression_level".into(),
                compression_level.to_string(),
            ],
            EncodeParams::Opus { bitrate_kbps } => vec![
                "-c:a".into(),
                "libopus".into(),
                "-b:a".into(),
                format!("{bitrate_kbps}k"),
            ],
            EncodeParams::Mp3 { bitrate_kbps } => vec![
                "-c:a".into(),
                "libmp3lame".into(),
                "-b:a".into(),
                format!("{bitrate_kbps}k"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wav_has_no_params() {
        assert_eq!(EncodeParams::for_format(AudioFormat::Wav), None);
    }

    #[test]
    fn test_for_format_roundtrips_format() {
        for format in [AudioFormat::Flac, AudioFormat::Opus, AudioFormat::Mp3] {
            assert_eq!(EncodeParams::for_format(format).unwrap().format(), format);
        }
    }

    #[test]
    fn test_fixed_settings() {
        assert_eq!(
            EncodeParams::for_format(AudioFormat::Flac).unwrap().codec_args(),
            vec!["-c:a", "flac", "-compression_level", "8"]
        );
        assert_eq!(
            EncodeParams::for_format(AudioFormat::Opus).unwrap().codec_args(),
            vec!["-c:a", "libopus", "-b:a", "128k"]
        );
        assert_eq!(
            EncodeParams::for_format(AudioFormat::Mp3).unwrap().codec_args(),
            vec!["-c:a", "libmp3lame", "-b:a", "320k"]
        );
    }

    #[test]
    fn test_serializes_with_codec_tag() {
        let json = serde_json::to_value(EncodeParams::for_format(AudioFormat::Mp3).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"codec": "mp3", "bitrate_kbps": 320}));
    }
}
