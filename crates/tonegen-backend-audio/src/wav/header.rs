//! The 44-byte header that precedes every tonegen PCM stream.
//!
//! Only one layout is ever written: RIFF/WAVE, a 16-byte `fmt ` chunk for
//! 16-bit mono PCM, then the `data` chunk. The sample rate and the data
//! length are the only fields that vary.

use std::io;

/// Length of the encoded header.
pub const WAV_HEADER_LEN: usize = 44;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;
const FORMAT_PCM: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;
/// RIFF size minus the data length: `WAVE`, the `fmt ` chunk, and the `data`
/// chunk header.
const RIFF_OVERHEAD: u32 = 36;

/// Header for a 16-bit mono PCM stream.
///
/// Construction checks that every size field fits its `u32` slot, so
/// [`to_bytes`](Self::to_bytes) cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    sample_rate: u32,
    byte_rate: u32,
    data_len: u32,
}

impl WavHeader {
    /// Describes `data_len` bytes of PCM at `sample_rate`.
    ///
    /// # Errors
    /// `InvalidInput` if the byte rate or the RIFF size would not fit in 32
    /// bits.
    pub fn new(sample_rate: u32, data_len: usize) -> io::Result<Self> {
        let byte_rate = sample_rate
            .checked_mul(u32::from(BLOCK_ALIGN))
            .ok_or_else(|| invalid(format!("sample rate {sample_rate} Hz is too high for WAV")))?;
        let data_len = u32::try_from(data_len)
            .ok()
            .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some())
            .ok_or_else(|| invalid(format!("{data_len} bytes of PCM do not fit a WAV file")))?;

        Ok(Self {
            sample_rate,
            byte_rate,
            data_len,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bytes of PCM per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    /// Encodes the header, all fields little-endian.
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut out = [0u8; WAV_HEADER_LEN];
        let fields: [&[u8]; 13] = [
            b"RIFF",
            &(RIFF_OVERHEAD + self.data_len).to_le_bytes(),
            b"WAVE",
            b"fmt ",
            &FMT_CHUNK_LEN.to_le_bytes(),
            &FORMAT_PCM.to_le_bytes(),
            &CHANNELS.to_le_bytes(),
            &self.sample_rate.to_le_bytes(),
            &self.byte_rate.to_le_bytes(),
            &BLOCK_ALIGN.to_le_bytes(),
            &BITS_PER_SAMPLE.to_le_bytes(),
            b"data",
            &self.data_len.to_le_bytes(),
        ];
        let mut at = 0;
        for field in fields {
            out[at..at + field.len()].copy_from_slice(field);
            at += field.len();
        }
        out
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
