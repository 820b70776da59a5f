//! # Tapline Common Library
//!
//! Shared code for the tapline rhythm-game backend and tools:
//! - Beatmap document model (the JSON contract with the game client)
//! - Configuration loading
//! - Common error types
//! - Time formatting utilities

pub mod beatmap;
pub mod config;
pub mod error;
pub mod time;

pub use beatmap::{Beatmap, Note};
pub use error::{Error, Result};
