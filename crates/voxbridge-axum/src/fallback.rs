//! Placeholder audio served when no real synthesis is available.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Sample rate of the placeholder clip.
pub const SILENCE_SAMPLE_RATE: u32 = 44_100;

/// Number of samples in the placeholder clip.
pub const SILENCE_SAMPLES: u32 = 1024;

/// Encode a short mono 16-bit clip of silence as WAV bytes.
pub fn silence_wav() -> Result<Vec<u8>, hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SILENCE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for _ in 0..SILENCE_SAMPLES {
            writer.write_sample(0i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_silence_is_valid_wav() {
        let bytes = silence_wav().unwrap();
        assert_eq!(&bytes[..4], b"RIFF");

        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), SILENCE_SAMPLES);
    }

    #[test]
    fn test_silence_is_silent() {
        let mut reader = WavReader::new(Cursor::new(silence_wav().unwrap())).unwrap();
        assert!(reader.samples::<i16>().all(|s| s.unwrap() == 0));
    }
}
