//! tonegen ffmpeg Backend
//!
//! Converts the lossless WAV intermediate into FLAC, Opus, or MP3 by running
//! ffmpeg as a subprocess.
//!
//! # Architecture
//!
//! - [`Encoder`] is the injectable capability: `encode(source, dest, params)`.
//!   The batch pipeline only sees this trait, so tests can substitute doubles
//!   that succeed or fail without a real ffmpeg.
//! - [`FfmpegEncoder`] runs `ffmpeg -y -i <source> <codec options> <dest>`
//!   synchronously. Exit status 0 is success; anything else, including a
//!   missing executable, is an [`EncoderError`].
//! - [`convert()`] wraps a single conversion and turns every error into a
//!   [`ConversionResult::Failed`], isolating formats from each other.
//!
//! # Encoding parameters
//!
//! | Format | Codec | Setting |
//! |--------|-------|---------|
//! | FLAC | flac | compression level 8 |
//! | Opus | libopus | 128 kbps |
//! | MP3 | libmp3lame | 320 kbps |
//!
//! # ffmpeg discovery
//!
//! 1. [`FfmpegConfig::ffmpeg_path`]
//! 2. `TONEGEN_FFMPEG` environment variable
//! 3. System PATH

pub mod convert;
pub mod encoder;
pub mod error;
pub mod params;

pub use convert::{convert, ConversionResult};
pub use encoder::{ffmpeg_args, Encoder, FfmpegConfig, FfmpegEncoder, FFMPEG_ENV_VAR};
pub use error::{EncoderError, EncoderResult};
pub use params::EncodeParams;
