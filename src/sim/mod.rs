//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed frame step only
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the draw-call trait

pub mod character;
pub mod collision;
pub mod geometry;
pub mod item;
pub mod level;
pub mod obstacle;
pub mod state;
pub mod tick;
pub mod timescale;

pub use character::{Character, LifeBar, LifeStatus};
pub use collision::{ProjectileHit, resolve_bounds, resolve_obstacle_contact, resolve_projectile};
pub use geometry::{Rect, intersects};
pub use item::{Item, ItemKind};
pub use level::{Level, item_spawn_frame, spawn_interval};
pub use obstacle::{Obstacle, ObstacleKind};
pub use state::{Background, GameEvent, GamePhase, GameState, World};
pub use tick::{Flow, TickInput, tick};
pub use timescale::{TimeScale, speed_multiplier};
