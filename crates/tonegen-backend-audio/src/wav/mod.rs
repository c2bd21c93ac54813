//! Deterministic WAV file writer.
//!
//! Writes canonical 16-bit mono PCM WAV files: a 44-byte header, one `fmt `
//! chunk, one `data` chunk, and no timestamps or other variable metadata. The
//! same samples always produce the same bytes.

mod header;
mod pcm;
mod writer;

#[cfg(test)]
mod tests;

pub use header::{WavHeader, WAV_HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use writer::{write_wav, write_wav_file, write_wav_to_vec};
