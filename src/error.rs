//! Configuration error types.
//!
//! Gameplay conditions (collisions, bounds exits, range expiry) are plain state
//! flags and never surface here. Only invalid configuration fails, and it fails
//! at construction time.

use std::io;

/// Errors raised while loading or validating game configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Life counter needs a positive maximum, got {0}")]
    InvalidLives(u32),

    #[error("Level {level}: target score must be positive")]
    InvalidTargetScore { level: usize },

    #[error("Level {level}: gap range {min}..{max} cannot hold a {gap} px gap on a {height} px screen")]
    InvalidGapRange {
        level: usize,
        min: u32,
        max: u32,
        gap: f32,
        height: f32,
    },

    #[error("No levels configured")]
    NoLevels,

    #[error("Item spawn probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Maximum spawn attempts must be positive")]
    ZeroSpawnAttempts,

    #[error("Failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
