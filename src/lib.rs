//! Shadow Flap - A side-scrolling flap-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (motion, collisions, levels, game state)
//! - `renderer`: Draw-call boundary the simulation issues each frame
//! - `platform`: Input abstraction (edge-triggered controls)
//! - `settings`: Data-driven configuration and level catalogue

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{GapRange, LevelConfig, ObstacleMix, Settings};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// TimeScale bounds
    pub const TIMESCALE_MIN: u8 = 1;
    pub const TIMESCALE_MAX: u8 = 5;
    /// Speed factor applied per TimeScale step (geometric)
    pub const TIMESCALE_MULTIPLIER: f32 = 1.5;

    /// Character sprite size
    pub const CHARACTER_WIDTH: f32 = 65.0;
    pub const CHARACTER_HEIGHT: f32 = 45.0;
    /// Character spawn point (centre)
    pub const CHARACTER_CENTRE_X: f32 = 200.0;
    pub const CHARACTER_SPAWN_CENTRE_Y: f32 = 350.0;
    /// Downward acceleration per frame while falling
    pub const CHARACTER_ACCELERATION: f32 = 0.4;
    /// Maximum fall speed (pixels/frame)
    pub const MAX_FALL_VELOCITY: f32 = 10.0;
    /// Jump impulse - overrides the current velocity
    pub const JUMP_VELOCITY: f32 = -6.0;
    /// Frames between wing-up sprites
    pub const WING_FLAP_FRAMES: u32 = 10;
    /// Damage per obstacle hit or bounds exit
    pub const CHARACTER_DAMAGE: u32 = 1;

    /// Obstacle (pipe pair) geometry
    pub const OBSTACLE_WIDTH: f32 = 65.0;
    pub const OBSTACLE_GAP: f32 = 168.0;
    pub const OBSTACLE_BASE_VELOCITY: f32 = 3.0;
    /// Frames between obstacle spawns at TimeScale 1
    pub const BASE_SPAWN_INTERVAL: f32 = 100.0;

    /// Resistant obstacle hazard (flame) zones
    pub const HAZARD_WIDTH: f32 = 65.0;
    pub const HAZARD_HEIGHT: f32 = 30.0;
    /// Length of the hazard animation cycle in frames
    pub const HAZARD_CYCLE_FRAMES: u32 = 20;
    /// Trailing frames of each cycle during which hazards are live
    pub const HAZARD_ACTIVE_FRAMES: u32 = 3;

    /// Item drift and launch speeds (pixels/frame)
    pub const ITEM_BASE_VELOCITY: f32 = 3.0;
    pub const ITEM_FIRED_VELOCITY: f32 = 5.0;
    /// Fraction of the spawn interval at which items are offered
    pub const ITEM_SPAWN_PHASE: f32 = 0.5;

    /// Level flow defaults
    pub const TRANSITION_FRAMES: u32 = 20;
    pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 32;
    pub const DEFAULT_ITEM_PROBABILITY: f64 = 0.7;
}
