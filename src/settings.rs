//! Game settings and level catalogue
//!
//! Loaded from an optional JSON file; every field falls back to the standard
//! two-level game when omitted.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How a level picks the vertical start of each obstacle gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GapRange {
    /// Gap start drawn from a fixed set of positions
    Choices { starts: Vec<u32> },
    /// Gap start drawn uniformly strictly between `min` and `max`
    Uniform { min: u32, max: u32 },
}

impl GapRange {
    /// Smallest and largest gap start this range can produce
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            GapRange::Choices { starts } => {
                let min = starts.iter().copied().min().unwrap_or(0);
                let max = starts.iter().copied().max().unwrap_or(0);
                (min as f32, max as f32)
            }
            GapRange::Uniform { min, max } => (*min as f32, *max as f32),
        }
    }

    /// Draw a gap start for a new obstacle
    pub fn sample_gap_start<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            GapRange::Choices { starts } => starts.choose(rng).copied().unwrap_or(0) as f32,
            GapRange::Uniform { min, max } => rng.random_range(min + 1..*max) as f32,
        }
    }

    /// Draw a continuous vertical position inside the range (item spawns)
    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (min, max) = self.bounds();
        min + rng.random::<f32>() * (max - min)
    }

    fn validate(&self, level: usize) -> Result<(), ConfigError> {
        let (min, max, empty) = match self {
            GapRange::Choices { starts } => (
                starts.iter().copied().min().unwrap_or(0),
                starts.iter().copied().max().unwrap_or(0),
                starts.is_empty(),
            ),
            GapRange::Uniform { min, max } => (*min, *max, min.saturating_add(1) >= *max),
        };
        if empty || max as f32 + OBSTACLE_GAP > SCREEN_HEIGHT {
            return Err(ConfigError::InvalidGapRange {
                level,
                min,
                max,
                gap: OBSTACLE_GAP,
                height: SCREEN_HEIGHT,
            });
        }
        Ok(())
    }
}

/// Which obstacle variants a level spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObstacleMix {
    PlainOnly,
    Mixed { resistant_probability: f64 },
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Lives the character starts the level with
    pub start_lives: u32,
    /// Score that completes the level
    pub target_score: u32,
    pub gaps: GapRange,
    pub obstacles: ObstacleMix,
    /// Whether rocks and bombs are offered
    pub items: bool,
    /// Extra line shown on the start screen
    #[serde(default)]
    pub intro_message: Option<String>,
}

impl LevelConfig {
    /// Opening level: plain pipes at three fixed heights, no weapons
    pub fn training() -> Self {
        Self {
            start_lives: 3,
            target_score: 10,
            gaps: GapRange::Choices {
                starts: vec![100, 300, 500],
            },
            obstacles: ObstacleMix::PlainOnly,
            items: false,
            intro_message: None,
        }
    }

    /// Second level: steel pipes with flames, rocks and bombs to shoot
    pub fn armed() -> Self {
        Self {
            start_lives: 6,
            target_score: 30,
            gaps: GapRange::Uniform { min: 100, max: 500 },
            obstacles: ObstacleMix::Mixed {
                resistant_probability: 0.5,
            },
            items: true,
            intro_message: Some("PRESS 'S' TO SHOOT".to_string()),
        }
    }

    /// The standard two-level game, in play order
    pub fn standard() -> Vec<Self> {
        vec![Self::training(), Self::armed()]
    }

    /// Check this level's invariants; `level` is its position in play order
    pub fn validate(&self, level: usize) -> Result<(), ConfigError> {
        if self.start_lives == 0 {
            return Err(ConfigError::InvalidLives(self.start_lives));
        }
        if self.target_score == 0 {
            return Err(ConfigError::InvalidTargetScore { level });
        }
        if let ObstacleMix::Mixed {
            resistant_probability,
        } = self.obstacles
        {
            if !(0.0..=1.0).contains(&resistant_probability) {
                return Err(ConfigError::InvalidProbability(resistant_probability));
            }
        }
        self.gaps.validate(level)
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Frames the level-up message is held between levels
    pub transition_frames: u32,
    /// Chance an item is offered at the spawn phase
    pub item_spawn_probability: f64,
    /// Rejection-sampling retries before an item spawn is skipped
    pub max_spawn_attempts: u32,
    /// Wait for Start before each new level instead of resuming directly
    pub confirm_next_level: bool,
    /// Levels in play order
    pub levels: Vec<LevelConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            transition_frames: TRANSITION_FRAMES,
            item_spawn_probability: DEFAULT_ITEM_PROBABILITY,
            max_spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
            confirm_next_level: false,
            levels: LevelConfig::standard(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use validated defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                let settings = Self::default();
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if !(0.0..=1.0).contains(&self.item_spawn_probability) {
            return Err(ConfigError::InvalidProbability(self.item_spawn_probability));
        }
        if self.max_spawn_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        for (index, level) in self.levels.iter().enumerate() {
            level.validate(index)?;
        }
        Ok(())
    }

    /// Configured seed, or a fresh random one
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
