//! Audio waveform decoding
//!
//! Decodes an audio file to mono f32 PCM samples for onset analysis, using
//! symphonia for format-agnostic decoding (MP3, FLAC, WAV, OGG, ...).
//! Multi-channel audio is downmixed by averaging channels.

use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use thiserror::Error;

/// Waveform decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Failed to open the file
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// Container format not recognized or corrupt
    #[error("unsupported or corrupt format: {0}")]
    Probe(String),

    /// No decodable audio track in the container
    #[error("no audio track found")]
    NoAudioTrack,

    /// Track is missing codec parameters needed for decoding
    #[error("missing codec parameter: {0}")]
    MissingParameter(&'static str),

    /// Packet-level decode failure mid-stream
    #[error("decode failure: {0}")]
    Decode(String),
}

/// Decoded audio result
#[derive(Debug)]
pub struct DecodedAudio {
    /// Mono audio samples (f32, range [-1.0, 1.0])
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds, derived from the decoded sample count
    pub duration_seconds: f64,
}

/// Decode an audio file to mono f32 PCM samples.
///
/// Probes the container, decodes every packet of the default audio track,
/// and averages channels to mono.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio, DecodeError> {
    tracing::debug!(path = %path.display(), "Decoding audio file");

    let file = std::fs::File::open(path).map_err(|e| DecodeError::Open {
        path: path.display().to_string(),
        source: e,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Format hint from the file extension
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| DecodeError::Probe(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingParameter("sample rate"))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Decode(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| DecodeError::Decode(e.to_string()))?;
        append_mono(&decoded, &mut samples);
    }

    let duration_seconds = samples.len() as f64 / sample_rate as f64;

    tracing::debug!(
        path = %path.display(),
        total_samples = samples.len(),
        sample_rate = sample_rate,
        duration_s = format!("{:.2}", duration_seconds),
        "Audio decoding complete"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        duration_seconds,
    })
}

/// Downmix one decoded buffer to mono f32 and append it to `out`
fn append_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => downmix(buf, out),
        AudioBufferRef::U16(buf) => downmix(buf, out),
        AudioBufferRef::U24(buf) => downmix(buf, out),
        AudioBufferRef::U32(buf) => downmix(buf, out),
        AudioBufferRef::S8(buf) => downmix(buf, out),
        AudioBufferRef::S16(buf) => downmix(buf, out),
        AudioBufferRef::S24(buf) => downmix(buf, out),
        AudioBufferRef::S32(buf) => downmix(buf, out),
        AudioBufferRef::F32(buf) => downmix(buf, out),
        AudioBufferRef::F64(buf) => downmix(buf, out),
    }
}

/// Average all channels of a typed sample buffer into mono f32
fn downmix<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample,
    f32: FromSample<S>,
{
    let channels = buf.spec().channels.count();
    let frames = buf.frames();
    out.reserve(frames);

    for frame in 0..frames {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += f32::from_sample(buf.chan(ch)[frame]);
        }
        out.push(sum / channels as f32);
    }
}
