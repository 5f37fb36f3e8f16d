//! 16-bit PCM WAV encoding for generated clips.

use std::path::Path;

use crate::clip::AudioClip;
use crate::error::{GenError, GenResult};

/// Writes a clip as a mono 16-bit PCM WAV file.
///
/// Float samples are clamped to [-1.0, 1.0] and scaled to the i16 range.
/// An empty clip is rejected so a zero-length artifact can never reach
/// durable storage.
pub fn write_clip(clip: &AudioClip, path: &Path) -> GenResult<()> {
    if clip.is_empty() {
        return Err(GenError::EmptyOutput);
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let write = || -> Result<(), hound::Error> {
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &clip.samples {
            writer.write_sample(sample_to_i16(sample))?;
        }
        writer.finalize()
    };

    write().map_err(|source| GenError::WriteWav {
        path: path.to_path_buf(),
        source,
    })
}

fn sample_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_conversion_clamps() {
        assert_eq!(sample_to_i16(0.0), 0);
        assert_eq!(sample_to_i16(1.0), i16::MAX);
        assert_eq!(sample_to_i16(2.0), i16::MAX);
        assert_eq!(sample_to_i16(-2.0), -i16::MAX);
    }

    #[test]
    fn test_write_and_read_back() {
        let clip = AudioClip::new(vec![0.0, 0.5, -0.5, 1.0], 22050);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");

        write_clip(&clip, &path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 22050);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0);
        assert_eq!(samples[3], i16::MAX);
    }

    #[test]
    fn test_empty_clip_rejected() {
        let clip = AudioClip::new(Vec::new(), 22050);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");

        let result = write_clip(&clip, &path);
        assert!(matches!(result, Err(GenError::EmptyOutput)));
        assert!(!path.exists());
    }
}
