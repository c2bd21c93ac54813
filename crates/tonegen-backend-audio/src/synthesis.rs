//! Sine tone synthesis.
//!
//! A tone is rendered sample by sample as
//! `amplitude * sin(2π * frequency * i / sample_rate)` and quantized to 16-bit
//! PCM by scaling with 32767 and truncating toward zero. There is no
//! dithering and no clipping stage; [`ToneConfig::validate`] keeps the
//! amplitude within full scale instead.

use std::f64::consts::PI;

use tonegen_spec::ToneConfig;

use crate::error::{AudioError, AudioResult};

/// 2 * PI constant.
pub const TWO_PI: f64 = 2.0 * PI;

/// Full-scale multiplier for 16-bit quantization.
pub const PCM16_SCALE: f64 = 32767.0;

/// Largest sample count whose 16-bit mono data still fits a RIFF size field.
pub const MAX_SAMPLES: usize = ((u32::MAX - 36) / 2) as usize;

/// Quantized mono 16-bit samples with their sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wraps existing samples.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Little-endian PCM bytes, as stored in the WAV data chunk.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        let mut pcm = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        pcm
    }

    /// BLAKE3 hash of the PCM bytes.
    pub fn pcm_hash(&self) -> String {
        blake3::hash(&self.to_pcm_bytes()).to_hex().to_string()
    }
}

/// A pure sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineTone {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude, 0.0 to 1.0.
    pub amplitude: f64,
}

impl SineTone {
    /// Creates a new sine tone.
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    /// Unquantized sample at index `i`.
    pub fn sample_at(&self, i: usize, sample_rate: f64) -> f64 {
        let t = i as f64 / sample_rate;
        self.amplitude * (TWO_PI * self.frequency * t).sin()
    }

    /// Renders `num_samples` unquantized samples.
    pub fn render(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| self.sample_at(i, sample_rate))
            .collect()
    }
}

/// Quantizes a sample to 16 bits, truncating toward zero.
#[inline]
pub fn quantize_pcm16(sample: f64) -> i16 {
    (sample * PCM16_SCALE) as i16
}

/// Synthesizes a sine tone at `frequency_hz` using `config`.
///
/// The output has exactly `config.num_samples()` samples and depends only on
/// the arguments.
pub fn synthesize(frequency_hz: f64, config: &ToneConfig) -> AudioResult<SampleBuffer> {
    config.validate()?;

    if !frequency_hz.is_finite() || frequency_hz < 0.0 {
        return Err(AudioError::InvalidFrequency { freq: frequency_hz });
    }

    let num_samples = config.num_samples();
    if num_samples > MAX_SAMPLES {
        return Err(AudioError::TooLong { num_samples });
    }

    if frequency_hz > config.nyquist() {
        log::warn!(
            "{} Hz is above the Nyquist limit of {} Hz at {} Hz sample rate and will alias",
            frequency_hz,
            config.nyquist(),
            config.sample_rate
        );
    }

    let tone = SineTone::new(frequency_hz, config.amplitude);
    let sample_rate = config.sample_rate as f64;
    let samples = (0..num_samples)
        .map(|i| quantize_pcm16(tone.sample_at(i, sample_rate)))
        .collect();

    log::debug!(
        "synthesized {} samples at {} Hz for {} Hz tone",
        num_samples,
        config.sample_rate,
        frequency_hz
    );

    Ok(SampleBuffer::new(samples, config.sample_rate))
}
