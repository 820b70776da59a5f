//! Beatmap document model
//!
//! The beatmap JSON file is the sole contract between the generation tool,
//! the web server's song listing, and the game client. Top-level keys are
//! camelCase: `songName`, `artist`, `duration`, `bpm`, `notes`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single playable note event.
///
/// `lane` is one of four discrete positions (1..=4). Within a beatmap the
/// note sequence is ordered non-decreasingly by `time`; the game client
/// plays notes in temporal order and does not re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Time of the note in seconds from track start
    pub time: f64,
    /// Lane index in 1..=4
    pub lane: u8,
}

impl Note {
    /// Create a new note
    pub fn new(time: f64, lane: u8) -> Self {
        Self { time, lane }
    }
}

/// A complete beatmap document.
///
/// Created once per audio file by the generation pipeline and persisted as
/// an immutable file keyed by the audio file's base name. Regeneration
/// overwrites the whole document; there are no in-place mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beatmap {
    /// Display name of the song
    pub song_name: String,
    /// Display name of the artist ("Unknown Artist" when not inferable)
    pub artist: String,
    /// Track length rendered as "M:SS"
    pub duration: String,
    /// Fixed placeholder tempo (always 120; never derived from analysis)
    pub bpm: u32,
    /// Note sequence, ascending by time
    pub notes: Vec<Note>,
}

impl Beatmap {
    /// Load a beatmap document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let beatmap = serde_json::from_str(&content)?;
        Ok(beatmap)
    }

    /// Persist the document as pretty-printed JSON.
    ///
    /// The document is serialized to a string first so that a serialization
    /// failure never leaves a partial file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check the ordering invariant on the note sequence
    pub fn notes_are_ordered(&self) -> bool {
        self.notes.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

impl std::fmt::Display for Beatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({}, {} notes)",
            self.artist,
            self.song_name,
            self.duration,
            self.notes.len()
        )
    }
}
