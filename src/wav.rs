//! WAV file writer utility
//!
//! Writes mono 16-bit PCM audio. The sample rate only goes into the header.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const HEADER_SIZE: u32 = 44;

/// Convert a sample in [-1.0, 1.0] to 16-bit PCM
///
/// Out-of-range values are clamped; -1.0 maps to i16::MIN.
fn to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped >= 0.0 {
        (clamped * i16::MAX as f32) as i16
    } else {
        (clamped * -(i16::MIN as f32)) as i16
    }
}

/// Write a 16-bit PCM mono WAV stream
///
/// # Example
/// ```
/// use rtttl::wav::write_wav_16bit;
///
/// let mut bytes = Vec::new();
/// write_wav_16bit(&mut bytes, &[0.0f32; 100], 8000).unwrap();
/// assert_eq!(bytes.len(), 44 + 200);
/// ```
pub fn write_wav_16bit<W: Write>(mut writer: W, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let bytes_per_sample = bits_per_sample / 8;
    let byte_rate = sample_rate * num_channels as u32 * bytes_per_sample as u32;
    let block_align = num_channels * bytes_per_sample;
    let data_size = samples.len() as u32 * bytes_per_sample as u32;

    // RIFF chunk, size excludes the "RIFF" tag and the size field
    writer.write_all(b"RIFF")?;
    writer.write_all(&(HEADER_SIZE - 8 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&num_channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    for &sample in samples {
        writer.write_all(&to_i16(sample).to_le_bytes())?;
    }

    writer.flush()
}

/// Write a 16-bit PCM mono WAV file
pub fn write_wav_file<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    let file = File::create(path)?;
    write_wav_16bit(BufWriter::new(file), samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[f32], sample_rate: u32) -> Vec<u8> {
        let mut data = Vec::new();
        write_wav_16bit(&mut data, samples, sample_rate).unwrap();
        data
    }

    fn read_u32(data: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    fn read_u16(data: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([data[at], data[at + 1]])
    }

    #[test]
    fn test_header() {
        let data = encode(&[0.0, 0.5, -0.5], 44100);

        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        assert_eq!(&data[12..16], b"fmt ");
        assert_eq!(read_u16(&data, 20), 1); // PCM
        assert_eq!(read_u16(&data, 22), 1); // Mono
        assert_eq!(read_u32(&data, 24), 44100);
        assert_eq!(read_u32(&data, 28), 88200); // Byte rate
        assert_eq!(read_u16(&data, 34), 16);
        assert_eq!(&data[36..40], b"data");
    }

    #[test]
    fn test_sizes() {
        let num_samples = 1000;
        let data = encode(&vec![0.0f32; num_samples], 16000);

        let data_size = read_u32(&data, 40);
        assert_eq!(data_size, (num_samples * 2) as u32);
        assert_eq!(read_u32(&data, 4), 36 + data_size);
        assert_eq!(data.len(), 44 + num_samples * 2);
    }

    #[test]
    fn test_clamping() {
        let data = encode(&[2.0, -2.0, 1.0, -1.0, 0.0], 8000);
        let sample = |i: usize| i16::from_le_bytes([data[44 + i * 2], data[45 + i * 2]]);

        assert_eq!(sample(0), i16::MAX);
        assert_eq!(sample(1), i16::MIN);
        assert_eq!(sample(2), i16::MAX);
        assert_eq!(sample(3), i16::MIN);
        assert_eq!(sample(4), 0);
    }

    #[test]
    fn test_write_file() {
        let path = std::env::temp_dir().join("rtttl_test_write_file.wav");
        write_wav_file(&path, &[0.0f32; 100], 8000).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), 44 + 200);

        std::fs::remove_file(&path).unwrap();
    }
}
