//! Configuration loading for the web server
//!
//! Resolution priority for each field:
//! 1. Environment variable (highest)
//! 2. TOML config file (`$TAPLINE_CONFIG`, else `~/.config/tapline/tapline.toml`)
//! 3. Compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Web server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaplineConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory containing beatmap JSON files
    #[serde(default = "default_beatmaps_dir")]
    pub beatmaps_dir: PathBuf,

    /// Directory containing the static game client assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_bind_address() -> String {
    "127.0.0.1:5780".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("scores.db")
}

fn default_beatmaps_dir() -> PathBuf {
    PathBuf::from("static/beatmaps")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for TaplineConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_path: default_database_path(),
            beatmaps_dir: default_beatmaps_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl TaplineConfig {
    /// Load configuration with ENV -> TOML -> default resolution
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::from_toml_file(&path)?
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Apply environment variable overrides (highest priority)
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("TAPLINE_BIND") {
            self.bind_address = value;
        }
        if let Ok(value) = std::env::var("TAPLINE_DB") {
            self.database_path = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("TAPLINE_BEATMAPS_DIR") {
            self.beatmaps_dir = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("TAPLINE_STATIC_DIR") {
            self.static_dir = PathBuf::from(value);
        }
    }
}

/// Resolve the config file location.
///
/// `$TAPLINE_CONFIG` wins; otherwise the platform config directory
/// (`~/.config/tapline/tapline.toml` on Linux).
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TAPLINE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("tapline").join("tapline.toml"))
}
