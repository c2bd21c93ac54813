//! tonegen Audio Backend
//!
//! Renders pure sine tones to 16-bit PCM and writes them as canonical WAV
//! files. The WAV file is the lossless intermediate every other output format
//! is encoded from.
//!
//! # Determinism
//!
//! Synthesis has no state and no randomness: the same frequency and
//! [`ToneConfig`](tonegen_spec::ToneConfig) always yield the same samples, and
//! the WAV writer emits no timestamps, so output files are byte-identical
//! across runs on the same platform.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tonegen_backend_audio::{synthesize, wav};
//! use tonegen_spec::ToneConfig;
//!
//! let buffer = synthesize(440.0, &ToneConfig::new(48_000, 1.0, 0.5))?;
//! assert_eq!(buffer.len(), 48_000);
//! wav::write_wav_file(Path::new("440Hz.wav"), &buffer)?;
//! # Ok::<(), tonegen_backend_audio::AudioError>(())
//! ```

pub mod error;
pub mod synthesis;
pub mod wav;

pub use error::{AudioError, AudioResult};
pub use synthesis::{synthesize, SampleBuffer, SineTone};
