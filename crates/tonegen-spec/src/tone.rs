//! Tone configuration shared by every item of a batch.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
/// Default tone duration in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 5.0;
/// Default amplitude as a fraction of full scale.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;
/// Highest accepted sample rate. The WAV header stores the byte rate of
/// 16-bit mono audio, `2 * sample_rate`, as a `u32`.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / 2;

/// Immutable synthesis parameters for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration of each tone in seconds.
    pub duration_seconds: f64,
    /// Peak amplitude, 0.0 to 1.0 of full scale.
    pub amplitude: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl ToneConfig {
    /// Creates a config from explicit values. Call [`validate`](Self::validate)
    /// before synthesizing.
    pub fn new(sample_rate: u32, duration_seconds: f64, amplitude: f64) -> Self {
        Self {
            sample_rate,
            duration_seconds,
            amplitude,
        }
    }

    /// Checks that every field is in range.
    ///
    /// Amplitude is capped at 1.0 because quantization does not clamp: a louder
    /// tone would overflow the 16-bit sample range.
    pub fn validate(&self) -> SpecResult<()> {
        if self.sample_rate == 0 {
            return Err(SpecError::invalid_config(
                "sample_rate",
                "must be greater than zero",
            ));
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            return Err(SpecError::invalid_config(
                "sample_rate",
                format!("must be at most {MAX_SAMPLE_RATE}, got {}", self.sample_rate),
            ));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(SpecError::invalid_config(
                "duration_seconds",
                format!("must be a positive number, got {}", self.duration_seconds),
            ));
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(SpecError::invalid_config(
                "amplitude",
                format!("must be between 0.0 and 1.0, got {}", self.amplitude),
            ));
        }
        Ok(())
    }

    /// Number of samples in each tone: `floor(sample_rate * duration)`.
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration_seconds).floor() as usize
    }

    /// Highest frequency representable without aliasing.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}
