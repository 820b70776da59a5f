//! Error types for the generation pipeline

use crate::analysis::AnalysisError;
use crate::audio::MetadataError;
use thiserror::Error;

/// Per-file generation error.
///
/// The batch loop catches these at the per-file boundary, logs the offending
/// filename, and skips the file; no variant aborts the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Audio file missing, unreadable, or corrupt at the metadata step
    #[error("failed to read audio metadata: {0}")]
    Read(#[from] MetadataError),

    /// Waveform decode or onset detection failure
    #[error("audio analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Track too short for the synthetic generator's placement window
    #[error("track too short for note placement ({0:.2}s)")]
    DegenerateDuration(f64),

    /// Beatmap file write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Beatmap document serialization failure
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
