//! Waveform analysis for onset-driven note generation

pub mod onset;

pub use onset::OnsetDetector;

use crate::audio::decoder::DecodeError;
use thiserror::Error;

/// Analysis errors surfaced to the generation pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The waveform could not be decoded
    #[error("waveform decode failed: {0}")]
    Decode(#[from] DecodeError),
}
