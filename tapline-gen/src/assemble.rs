//! Beatmap document assembly
//!
//! Combines a generated note sequence with metadata inferred from the audio
//! file's base name into the persisted document. Ordering of the note
//! sequence is the generator's contract obligation and is not re-validated
//! here.

use tapline_common::time::format_track_duration;
use tapline_common::{Beatmap, Note};

/// Fixed placeholder tempo. Not derived from analysis, including in the
/// onset-driven path; a documented limitation of the format.
pub const PLACEHOLDER_BPM: u32 = 120;

/// Artist used when the base name carries no separator
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Assemble the beatmap document for one track
pub fn assemble(base_name: &str, notes: Vec<Note>, duration_seconds: f64) -> Beatmap {
    let (artist, song_name) = infer_song_identity(base_name);

    Beatmap {
        song_name,
        artist,
        duration: format_track_duration(duration_seconds),
        bpm: PLACEHOLDER_BPM,
        notes,
    }
}

/// Infer `(artist, song name)` from a file base name.
///
/// A literal `" - "` splits on its first occurrence into artist and song,
/// each trimmed. Without the separator the artist is unknown and the song
/// name is the base name with underscores as spaces, title-cased.
fn infer_song_identity(base_name: &str) -> (String, String) {
    if let Some((artist, song)) = base_name.split_once(" - ") {
        (artist.trim().to_string(), song.trim().to_string())
    } else {
        let song = title_case(&base_name.replace('_', " "));
        (UNKNOWN_ARTIST.to_string(), song)
    }
}

/// Uppercase the first letter of each whitespace-separated word
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
