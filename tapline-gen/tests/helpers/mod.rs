//! Test fixture helpers
//!
//! Generates WAV files for integration tests: a plain tone for metadata and
//! synthetic-mode tests, and a burst pattern with distinct attacks for
//! onset-mode tests.

use std::path::Path;

const SAMPLE_RATE: u32 = 44100;

/// Write a mono 16-bit WAV containing a continuous 440Hz tone
pub fn write_tone_wav(path: &Path, duration_seconds: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let total_samples = (duration_seconds * SAMPLE_RATE as f64) as usize;

    for i in 0..total_samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let sample = (0.3 * (2.0 * std::f32::consts::PI * 440.0 * t).sin() * i16::MAX as f32) as i16;
        writer.write_sample(sample).unwrap();
    }

    writer.finalize().unwrap();
}

/// Write a mono 16-bit WAV of silence with short tone bursts every half
/// second, giving the onset detector clear attacks to find
pub fn write_burst_wav(path: &Path, duration_seconds: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let total_samples = (duration_seconds * SAMPLE_RATE as f64) as usize;
    let burst_period = SAMPLE_RATE as usize / 2;
    let burst_length = 2048;

    for i in 0..total_samples {
        let position_in_period = i % burst_period;
        let sample = if position_in_period < burst_length {
            let t = position_in_period as f32 / SAMPLE_RATE as f32;
            (0.8 * (2.0 * std::f32::consts::PI * 440.0 * t).sin() * i16::MAX as f32) as i16
        } else {
            0
        };
        writer.write_sample(sample).unwrap();
    }

    writer.finalize().unwrap();
}

/// Write a file with an audio extension that no decoder can read
pub fn write_corrupt_audio(path: &Path) {
    std::fs::write(path, b"definitely not audio data, just bytes").unwrap();
}
