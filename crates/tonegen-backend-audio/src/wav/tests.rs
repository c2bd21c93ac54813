//! Tests for the WAV writer module.

use super::header::{WavHeader, WAV_HEADER_LEN};
use super::pcm::{compute_pcm_hash, extract_pcm_data};
use super::writer::{write_wav, write_wav_file, write_wav_to_vec};
use crate::error::AudioError;
use crate::synthesis::SampleBuffer;

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// =========================================================================
// Header fields
// =========================================================================

#[test]
fn test_header_derives_byte_rate() {
    let header = WavHeader::new(48_000, 960).unwrap();
    assert_eq!(header.sample_rate(), 48_000);
    assert_eq!(header.byte_rate(), 96_000);
    assert_eq!(header.data_len(), 960);
}

#[test]
fn test_header_accepts_highest_representable_rate() {
    let header = WavHeader::new(u32::MAX / 2, 2).unwrap();
    assert_eq!(header.byte_rate(), u32::MAX - 1);
}

#[test]
fn test_header_rejects_rate_whose_byte_rate_overflows() {
    for rate in [u32::MAX / 2 + 1, u32::MAX] {
        let err = WavHeader::new(rate, 2).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}

#[test]
fn test_header_rejects_data_larger_than_riff_allows() {
    let too_long = (u32::MAX - 35) as usize;
    assert!(WavHeader::new(8_000, too_long).is_err());
    assert!(WavHeader::new(8_000, too_long - 1).is_ok());
}

// =========================================================================
// Header layout
// =========================================================================

#[test]
fn test_header_layout() {
    let buffer = SampleBuffer::new(vec![0; 100], 44_100);
    let wav = write_wav_to_vec(&buffer).unwrap();

    assert_eq!(wav.len(), WAV_HEADER_LEN + 200);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(read_u32(&wav, 4), 36 + 200);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(read_u32(&wav, 16), 16);
    assert_eq!(read_u16(&wav, 20), 1); // PCM
    assert_eq!(read_u16(&wav, 22), 1); // mono
    assert_eq!(read_u32(&wav, 24), 44_100);
    assert_eq!(read_u32(&wav, 28), 88_200);
    assert_eq!(read_u16(&wav, 32), 2);
    assert_eq!(read_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(read_u32(&wav, 40), 200);
}

#[test]
fn test_empty_buffer_writes_header_only() {
    let wav = write_wav_to_vec(&SampleBuffer::new(Vec::new(), 8_000)).unwrap();
    assert_eq!(wav.len(), WAV_HEADER_LEN);
    assert_eq!(read_u32(&wav, 40), 0);
}

#[test]
fn test_samples_written_little_endian() {
    let buffer = SampleBuffer::new(vec![i16::MIN, -1, 0, 1, i16::MAX], 8_000);
    let wav = write_wav_to_vec(&buffer).unwrap();
    let pcm = extract_pcm_data(&wav).unwrap();
    let decoded: Vec<i16> = pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(decoded, buffer.samples());
}

#[test]
fn test_write_to_generic_writer() {
    let mut out = Vec::new();
    write_wav(&mut out, 22_050, &[1, 2, 3, 4]).unwrap();
    assert_eq!(out.len(), WAV_HEADER_LEN + 4);
    assert_eq!(&out[WAV_HEADER_LEN..], &[1, 2, 3, 4]);
}

// =========================================================================
// Determinism and hashing
// =========================================================================

#[test]
fn test_output_is_byte_deterministic() {
    let buffer = SampleBuffer::new((0..1000).map(|i| (i * 7) as i16).collect(), 48_000);
    assert_eq!(write_wav_to_vec(&buffer).unwrap(), write_wav_to_vec(&buffer).unwrap());
}

#[test]
fn test_file_hash_matches_buffer_hash() {
    let buffer = SampleBuffer::new(vec![5, -5, 300, -300], 48_000);
    let wav = write_wav_to_vec(&buffer).unwrap();
    assert_eq!(compute_pcm_hash(&wav).unwrap(), buffer.pcm_hash());
}

// =========================================================================
// Chunk parsing
// =========================================================================

#[test]
fn test_extract_skips_unknown_chunks() {
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[9, 9, 9, 0]); // odd chunk plus pad byte
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&2u32.to_le_bytes());
    wav.extend_from_slice(&[7, 8]);

    assert_eq!(extract_pcm_data(&wav), Some(&[7u8, 8][..]));
}

#[test]
fn test_extract_rejects_non_wav() {
    assert!(extract_pcm_data(b"not a wav file at all, definitely").is_none());
    assert!(extract_pcm_data(&[]).is_none());
    assert!(compute_pcm_hash(b"RIFF\0\0\0\0WAVE").is_none());
}

#[test]
fn test_extract_rejects_truncated_data_chunk() {
    let mut wav = write_wav_to_vec(&SampleBuffer::new(vec![1, 2, 3], 8_000)).unwrap();
    wav.truncate(wav.len() - 1);
    assert!(extract_pcm_data(&wav).is_none());
}

// =========================================================================
// File output
// =========================================================================

#[test]
fn test_write_file_overwrites_existing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    std::fs::write(&path, vec![0xAB; 4096]).unwrap();

    let buffer = SampleBuffer::new(vec![1, 2, 3], 8_000);
    write_wav_file(&path, &buffer).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, write_wav_to_vec(&buffer).unwrap());
}

#[test]
fn test_writer_refuses_unrepresentable_rate_without_output() {
    let mut out = Vec::new();
    let err = write_wav(&mut out, u32::MAX, &[0, 0]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(out.is_empty());

    assert!(write_wav_to_vec(&SampleBuffer::new(vec![0], u32::MAX)).is_err());
}

#[test]
fn test_write_file_rejects_unrepresentable_rate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");

    let err = write_wav_file(&path, &SampleBuffer::new(vec![0], u32::MAX)).unwrap_err();
    assert!(matches!(err, AudioError::WriteFailed { .. }));
    assert!(!path.exists());
}

#[test]
fn test_write_file_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-subdir").join("tone.wav");

    let err = write_wav_file(&path, &SampleBuffer::new(vec![0], 8_000)).unwrap_err();
    match err {
        AudioError::WriteFailed { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}
