//! Synthetic note generation
//!
//! Produces a uniformly-random note stream whose density is controlled by the
//! difficulty profile, independent of actual audio content. Fallback strategy
//! for audio where rhythmic analysis is unavailable or undesired, and for
//! fast bulk generation.

use super::{random_lane, round_time};
use crate::error::GenerationError;
use rand::Rng;
use tapline_common::Note;

/// Seconds at the start of the track kept free of notes (reaction buffer)
pub const PLAYABLE_LEAD_IN: f64 = 1.5;

/// Seconds at the end of the track kept free of notes
pub const PLAYABLE_TAIL: f64 = 2.0;

/// Synthetic note generator for one difficulty profile
pub struct SyntheticGenerator {
    notes_per_second: f64,
}

impl SyntheticGenerator {
    /// Create a generator with the given note density
    pub fn new(notes_per_second: f64) -> Self {
        Self { notes_per_second }
    }

    /// Generate `floor(duration * notes_per_second)` notes, each with a time
    /// drawn uniformly from the open window `(1.5, duration - 2.0)` and a
    /// uniformly random lane, sorted ascending by time.
    ///
    /// The sort is stable, so notes that land on the same instant keep their
    /// generation order; lane collisions at equal times are left to the
    /// client to render.
    pub fn generate<R: Rng>(
        &self,
        duration_seconds: f64,
        rng: &mut R,
    ) -> Result<Vec<Note>, GenerationError> {
        let window_end = duration_seconds - PLAYABLE_TAIL;
        if window_end <= PLAYABLE_LEAD_IN {
            return Err(GenerationError::DegenerateDuration(duration_seconds));
        }

        let count = (duration_seconds * self.notes_per_second).floor() as usize;
        let mut notes = Vec::with_capacity(count);

        for _ in 0..count {
            let raw = rng.gen_range(PLAYABLE_LEAD_IN..window_end);
            let mut time = round_time(raw);
            if time <= PLAYABLE_LEAD_IN || time >= window_end {
                // Rounding pushed the draw onto a window edge; keep the raw value
                time = raw;
            }
            notes.push(Note::new(time, random_lane(rng)));
        }

        notes.sort_by(|a, b| a.time.total_cmp(&b.time));

        Ok(notes)
    }
}
