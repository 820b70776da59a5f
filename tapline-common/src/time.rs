//! Track time formatting utilities

/// Format a track length in seconds as `"M:SS"`.
///
/// Both minutes and seconds use floor semantics, matching what the game
/// client displays: `125.7` renders as `"2:05"`, `59.9` as `"0:59"`.
/// Negative inputs are clamped to zero.
pub fn format_track_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let minutes = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", minutes, secs)
}
