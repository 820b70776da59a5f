//! Batch orchestration
//!
//! One run: discover the missing-beatmap set, apply an immutable run
//! configuration to every missing file, and report. Each file is processed
//! independently; a failure is logged and counted as a skip, never aborting
//! the run or touching already-written files.

use crate::assemble::assemble;
use crate::audio::metadata::read_duration;
use crate::error::GenerationError;
use crate::generate::{OnsetDrivenGenerator, SyntheticGenerator};
use crate::profile::{DifficultyProfile, GenerationMode, Tier};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tapline_common::Beatmap;
use thiserror::Error;
use walkdir::WalkDir;

/// File extensions treated as audio tracks
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a"];

/// Extension of persisted beatmap documents
pub const BEATMAP_EXTENSION: &str = "json";

/// Directory discovery errors (fatal at run start, unlike per-file errors)
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// Specified path does not exist
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Immutable configuration for one batch run.
///
/// Constructed once by the configuration step and applied unchanged to every
/// missing file; there is no per-file configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: GenerationMode,
    pub tier: Tier,
}

impl RunConfig {
    /// Resolve the difficulty profile for this run
    pub fn profile(&self) -> DifficultyProfile {
        DifficultyProfile::for_run(self.mode, self.tier)
    }
}

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Base names successfully generated and written
    pub generated: Vec<String>,
    /// Base names skipped, with the per-file error
    pub skipped: Vec<(String, GenerationError)>,
}

impl RunReport {
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Compute the missing-beatmap set.
///
/// Lists base names with an audio extension in `audio_dir` and base names
/// with the beatmap extension in `beatmaps_dir`; returns audio entries with
/// no matching beatmap, keyed by base name (sorted, so processing order is
/// reproducible). When two audio files share a base name the first extension
/// found wins.
pub fn discover_missing(
    audio_dir: &Path,
    beatmaps_dir: &Path,
) -> Result<BTreeMap<String, PathBuf>, DiscoverError> {
    let audio_files = list_by_extensions(audio_dir, AUDIO_EXTENSIONS)?;
    let beatmaps = list_by_extensions(beatmaps_dir, &[BEATMAP_EXTENSION])?;

    let missing: BTreeMap<String, PathBuf> = audio_files
        .into_iter()
        .filter(|(base, _)| !beatmaps.contains_key(base))
        .collect();

    tracing::debug!(
        audio_dir = %audio_dir.display(),
        missing = missing.len(),
        "Discovery complete"
    );

    Ok(missing)
}

/// List files directly inside `dir` whose extension matches, keyed by base name
fn list_by_extensions(
    dir: &Path,
    extensions: &[&str],
) -> Result<BTreeMap<String, PathBuf>, DiscoverError> {
    if !dir.exists() {
        return Err(DiscoverError::PathNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DiscoverError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = BTreeMap::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error accessing entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        if let Some(base) = path.file_stem().and_then(|s| s.to_str()) {
            entries
                .entry(base.to_string())
                .or_insert_with(|| path.to_path_buf());
        }
    }

    Ok(entries)
}

/// Process every missing file under one run configuration.
///
/// Per-file failures are logged with the offending filename and converted
/// into skips. A beatmap file is written only after the whole document
/// serialized successfully; there are no partial writes.
pub fn process_run(
    config: &RunConfig,
    beatmaps_dir: &Path,
    missing: &BTreeMap<String, PathBuf>,
) -> RunReport {
    let mut rng = rand::thread_rng();
    let mut report = RunReport::default();

    for (base_name, audio_path) in missing {
        match generate_one(config, audio_path, base_name, &mut rng) {
            Ok(beatmap) => {
                let out_path = beatmaps_dir.join(format!("{}.{}", base_name, BEATMAP_EXTENSION));
                match beatmap.save(&out_path) {
                    Ok(()) => {
                        tracing::info!(file = %audio_path.display(), notes = beatmap.notes.len(), "Beatmap created");
                        report.generated.push(base_name.clone());
                    }
                    Err(e) => {
                        tracing::error!(file = %audio_path.display(), error = %e, "Failed to write beatmap, skipping");
                        report
                            .skipped
                            .push((base_name.clone(), to_generation_error(e)));
                    }
                }
            }
            Err(e) => {
                tracing::error!(file = %audio_path.display(), error = %e, "Generation failed, skipping");
                report.skipped.push((base_name.clone(), e));
            }
        }
    }

    report
}

/// Run the full per-file pipeline: metadata -> notes -> document
fn generate_one<R: rand::Rng>(
    config: &RunConfig,
    audio_path: &Path,
    base_name: &str,
    rng: &mut R,
) -> Result<Beatmap, GenerationError> {
    let duration_seconds = read_duration(audio_path)?;

    let notes = match config.profile() {
        DifficultyProfile::Synthetic {
            notes_per_second, ..
        } => SyntheticGenerator::new(notes_per_second).generate(duration_seconds, rng)?,
        DifficultyProfile::OnsetDriven {
            retention_probability,
            ..
        } => OnsetDrivenGenerator::new(retention_probability).generate(audio_path, rng)?,
    };

    Ok(assemble(base_name, notes, duration_seconds))
}

/// Map a document save failure onto the per-file error kind
fn to_generation_error(error: tapline_common::Error) -> GenerationError {
    match error {
        tapline_common::Error::Io(e) => GenerationError::Io(e),
        tapline_common::Error::Json(e) => GenerationError::Serialize(e),
        other => GenerationError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_nonexistent_audio_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_missing(Path::new("/nonexistent/audio"), dir.path());
        assert!(matches!(result, Err(DiscoverError::PathNotFound(_))));
    }

    #[test]
    fn test_discover_file_as_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();

        let result = discover_missing(&file, dir.path());
        assert!(matches!(result, Err(DiscoverError::NotADirectory(_))));
    }

    #[test]
    fn test_discover_ignores_unrelated_extensions() {
        let audio = tempfile::tempdir().unwrap();
        let maps = tempfile::tempdir().unwrap();
        std::fs::write(audio.path().join("track.mp3"), b"").unwrap();
        std::fs::write(audio.path().join("notes.txt"), b"").unwrap();
        std::fs::write(audio.path().join("cover.jpg"), b"").unwrap();

        let missing = discover_missing(audio.path(), maps.path()).unwrap();
        assert_eq!(missing.len(), 1);
        assert!(missing.contains_key("track"));
    }

    #[test]
    fn test_discover_subtracts_existing_beatmaps() {
        let audio = tempfile::tempdir().unwrap();
        let maps = tempfile::tempdir().unwrap();
        std::fs::write(audio.path().join("a.mp3"), b"").unwrap();
        std::fs::write(audio.path().join("b.mp3"), b"").unwrap();
        std::fs::write(maps.path().join("a.json"), b"{}").unwrap();

        let missing = discover_missing(audio.path(), maps.path()).unwrap();
        assert_eq!(missing.len(), 1);
        assert!(missing.contains_key("b"));
    }

    #[test]
    fn test_discover_extension_case_insensitive() {
        let audio = tempfile::tempdir().unwrap();
        let maps = tempfile::tempdir().unwrap();
        std::fs::write(audio.path().join("loud.MP3"), b"").unwrap();

        let missing = discover_missing(audio.path(), maps.path()).unwrap();
        assert!(missing.contains_key("loud"));
    }

    #[test]
    fn test_run_config_resolves_profile() {
        let config = RunConfig {
            mode: GenerationMode::Synthetic,
            tier: Tier::Hard,
        };
        assert_eq!(
            config.profile(),
            DifficultyProfile::Synthetic {
                label: "Hard",
                notes_per_second: 4.0
            }
        );
    }
}
