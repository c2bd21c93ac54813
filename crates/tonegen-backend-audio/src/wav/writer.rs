//! Writes sample buffers as WAV bytes or files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::header::{WavHeader, WAV_HEADER_LEN};
use crate::error::{AudioError, AudioResult};
use crate::synthesis::SampleBuffer;

/// Writes the header and `pcm_data` (16-bit little-endian mono samples).
///
/// Nothing is written if the header cannot describe the data.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, pcm_data: &[u8]) -> io::Result<()> {
    let header = WavHeader::new(sample_rate, pcm_data.len())?;
    writer.write_all(&header.to_bytes())?;
    writer.write_all(pcm_data)
}

/// Serializes a sample buffer to WAV bytes.
pub fn write_wav_to_vec(buffer: &SampleBuffer) -> io::Result<Vec<u8>> {
    let pcm = buffer.to_pcm_bytes();
    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    write_wav(&mut out, buffer.sample_rate(), &pcm)?;
    Ok(out)
}

/// Writes a sample buffer to `path`, replacing any existing file.
///
/// The header is checked before the file is created, so a buffer that
/// cannot be written leaves no file behind.
pub fn write_wav_file(path: &Path, buffer: &SampleBuffer) -> AudioResult<()> {
    let pcm = buffer.to_pcm_bytes();
    let header = WavHeader::new(buffer.sample_rate(), pcm.len())
        .map_err(|e| AudioError::write_failed(path, e))?;

    let file = File::create(path).map_err(|e| AudioError::write_failed(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&header.to_bytes())
        .and_then(|()| writer.write_all(&pcm))
        .and_then(|()| writer.flush())
        .map_err(|e| AudioError::write_failed(path, e))?;

    log::debug!("wrote {} samples to {}", buffer.len(), path.display());
    Ok(())
}
