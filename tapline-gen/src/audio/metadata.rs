//! Audio metadata extraction
//!
//! Reads total playback duration from a compressed audio file via lofty.
//! A successful read doubles as a readability check: a missing file or a
//! corrupt/unsupported header fails here, before any decoding work starts.

use lofty::prelude::*;
use lofty::probe::Probe;
use std::path::Path;
use thiserror::Error;

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Failed to probe or parse the audio file
    #[error("failed to read file: {0}")]
    ReadError(String),

    /// I/O error (file open/read)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read the total playback duration of an audio file in seconds
pub fn read_duration(path: &Path) -> Result<f64, MetadataError> {
    let tagged_file = Probe::open(path)
        .map_err(|e| MetadataError::ReadError(e.to_string()))?
        .read()
        .map_err(|e| MetadataError::ReadError(e.to_string()))?;

    let duration_seconds = tagged_file.properties().duration().as_secs_f64();

    tracing::debug!(
        file = %path.display(),
        duration_s = format!("{:.2}", duration_seconds),
        "Read audio duration"
    );

    Ok(duration_seconds)
}
