//! tapline-gen - batch beatmap generation tool
//!
//! Scans the audio directory against the beatmap directory, asks once for a
//! generation mode and difficulty, then generates a beatmap for every audio
//! file that does not have one yet. Rerunning naturally retries files that
//! were skipped due to errors, since they remain missing.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tapline_gen::{batch, prompt};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tapline-gen", about = "Batch beatmap generator for tapline")]
struct Cli {
    /// Directory containing audio tracks
    #[arg(long, env = "TAPLINE_AUDIO_DIR", default_value = "static/audio")]
    audio_dir: PathBuf,

    /// Directory where beatmap JSON files are written
    #[arg(long, env = "TAPLINE_BEATMAPS_DIR", default_value = "static/beatmaps")]
    beatmaps_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tapline-gen v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let missing = batch::discover_missing(&cli.audio_dir, &cli.beatmaps_dir)?;
    if missing.is_empty() {
        info!("Every audio file already has a beatmap, nothing to do");
        return Ok(());
    }

    println!("Found {} track(s) without a beatmap:", missing.len());
    for (base_name, path) in &missing {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| base_name.clone());
        println!("  - {}", file_name);
    }
    println!();

    // One configuration per run; every missing file is processed under it
    let config = prompt::collect_run_config()?;
    info!(
        mode = config.mode.label(),
        difficulty = config.tier.label(),
        "Starting batch processing"
    );

    let report = batch::process_run(&config, &cli.beatmaps_dir, &missing);

    for (base_name, error) in &report.skipped {
        warn!(track = %base_name, error = %error, "Skipped");
    }
    info!(
        generated = report.generated_count(),
        skipped = report.skipped_count(),
        "Batch processing finished"
    );

    Ok(())
}
