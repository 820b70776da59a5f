//! Onset-driven note generation
//!
//! Decodes the full waveform, detects onset instants, and probabilistically
//! retains a difficulty-controlled fraction of them as notes. This couples
//! note placement to real musical structure; lane assignment stays random.

use super::{random_lane, round_time};
use crate::analysis::{AnalysisError, OnsetDetector};
use crate::audio::decoder::decode_audio_file;
use crate::error::GenerationError;
use rand::Rng;
use std::path::Path;
use tapline_common::Note;

/// Onset-driven note generator for one difficulty profile
pub struct OnsetDrivenGenerator {
    retention_probability: f64,
    detector: OnsetDetector,
}

impl OnsetDrivenGenerator {
    /// Create a generator with the given onset retention probability
    pub fn new(retention_probability: f64) -> Self {
        Self {
            retention_probability,
            detector: OnsetDetector::new(),
        }
    }

    /// Decode the file, detect onsets, and retain a random subsequence.
    ///
    /// Fails with an analysis error when the waveform cannot be decoded; the
    /// batch loop reports that to the caller and skips the file.
    pub fn generate<R: Rng>(
        &self,
        path: &Path,
        rng: &mut R,
    ) -> Result<Vec<Note>, GenerationError> {
        tracing::info!(file = %path.display(), "Analyzing waveform (this can take a while)");

        let decoded = decode_audio_file(path).map_err(AnalysisError::Decode)?;
        let onsets = self.detector.detect(&decoded.samples, decoded.sample_rate);

        let notes = self.retain(&onsets, rng);
        tracing::info!(
            file = %path.display(),
            detected = onsets.len(),
            retained = notes.len(),
            "Onset analysis complete"
        );

        Ok(notes)
    }

    /// Keep each onset with the profile's retention probability.
    ///
    /// Output ordering is inherited from the detector's ascending order and
    /// is never re-sorted.
    pub fn retain<R: Rng>(&self, onset_times: &[f64], rng: &mut R) -> Vec<Note> {
        let mut notes = Vec::new();
        for &time in onset_times {
            if rng.gen::<f64>() < self.retention_probability {
                notes.push(Note::new(round_time(time), random_lane(rng)));
            }
        }
        notes
    }
}
