//! Game state and core simulation types
//!
//! The state machine lives in [`GamePhase`]; entity collections live in a
//! per-level [`World`] that is rebuilt whenever a new level starts.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::geometry::Rect;
use super::item::{Item, ItemKind};
use super::level::Level;
use super::obstacle::{Obstacle, ObstacleKind};
use super::timescale::TimeScale;
use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::{Renderer, TextPlacement};
use crate::settings::Settings;

pub const START_MESSAGE: &str = "PRESS SPACE TO START";
pub const LEVEL_UP_MESSAGE: &str = "LEVEL-UP!";
pub const WIN_MESSAGE: &str = "CONGRATULATIONS!";
pub const GAME_LOST_MESSAGE: &str = "GAME OVER";
pub const FINAL_SCORE_MESSAGE: &str = "FINAL SCORE:";
pub const SCORE_MESSAGE: &str = "SCORE:";

/// Vertical offset of the intro line below the start prompt
const INTRO_MESSAGE_OFFSET: f32 = 68.0;
/// Vertical offset of the final score below the game-over line
const FINAL_SCORE_OFFSET: f32 = 75.0;
/// Where the running score is drawn
const SCORE_POSITION: (f32, f32) = (100.0, 100.0);

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start prompt shown, waiting for Start
    AwaitingStart,
    /// Active level
    Playing,
    /// Target score reached on the latest update
    LevelComplete,
    /// Level-up message held between levels
    Transitioning { elapsed: u32 },
    /// Run ended
    GameOver { won: bool },
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: usize },
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstaclePassed { id: u32 },
    ObstacleDestroyed { id: u32, by: ItemKind },
    /// A fired item struck an obstacle that resisted it
    ItemDeflected { id: u32, obstacle: u32 },
    CharacterHit { obstacle: u32, lives: u32 },
    OutOfBounds { lives: u32 },
    ItemSpawned { id: u32, kind: ItemKind },
    ItemPickedUp { id: u32, kind: ItemKind },
    /// A carried item dropped in favour of a new pickup
    ItemDiscarded { id: u32 },
    ItemFired { id: u32, kind: ItemKind },
    ItemExpired { id: u32 },
    LevelComplete { level: usize, score: u32 },
    GameOver { won: bool, score: u32 },
}

/// Play area backdrop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    /// Level whose artwork is shown
    pub level: usize,
    bounds: Rect,
}

impl Background {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            bounds: Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    /// The character takes damage once it stops overlapping this box
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Everything that moves during a level
#[derive(Debug, Clone)]
pub struct World {
    pub character: Character,
    /// Newest at the front; the back is the nearest to the character
    pub obstacles: VecDeque<Obstacle>,
    /// Newest at the front
    pub items: VecDeque<Item>,
    pub background: Background,
    pub timescale: TimeScale,
    next_id: u32,
}

impl World {
    /// A fresh world for `level`: new character, empty collections, TimeScale at minimum
    pub fn new(level: &Level) -> Self {
        Self {
            character: level.create_character(),
            obstacles: VecDeque::new(),
            items: VecDeque::new(),
            background: Background::new(level.index()),
            timescale: TimeScale::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: u32) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Level being played (or the last one played once the game ends)
    pub level: Level,
    /// Remaining levels, next on top
    pub upcoming: Vec<Level>,
    pub world: World,
    pub phase: GamePhase,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub frame: u64,
}

impl GameState {
    /// Validate `settings` and build the game at its first level
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed_or_random();

        let mut levels = settings
            .levels
            .iter()
            .enumerate()
            .map(|(index, config)| Level::new(index, config.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        levels.reverse();
        let level = levels.pop().ok_or(ConfigError::NoLevels)?;
        let world = World::new(&level);

        log::info!(
            "New game: {} level(s), seed {}",
            settings.levels.len(),
            seed
        );

        Ok(Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level,
            upcoming: levels,
            world,
            phase: GamePhase::AwaitingStart,
            events: Vec::new(),
            frame: 0,
        })
    }

    /// Score of the current level
    pub fn score(&self) -> u32 {
        self.level.score()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::GameOver { won: true }
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move to the next level, or end the run when none is left
    pub(crate) fn advance_level(&mut self) {
        let Some(next) = self.upcoming.pop() else {
            let score = self.score();
            log::info!("All levels cleared, final score {}", score);
            self.phase = GamePhase::GameOver { won: true };
            self.events.push(GameEvent::GameOver { won: true, score });
            return;
        };

        self.level = next;
        self.world = World::new(&self.level);
        log::info!("Level {} ready", self.level.index());

        if self.settings.confirm_next_level {
            self.phase = GamePhase::AwaitingStart;
        } else {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::LevelStarted {
                level: self.level.index(),
            });
        }
    }

    /// Issue this frame's draw calls
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_background(&self.world.background);

        match self.phase {
            GamePhase::AwaitingStart => {
                renderer.draw_text(START_MESSAGE, TextPlacement::centred());
                if let Some(intro) = self.level.intro_message() {
                    renderer.draw_text(intro, TextPlacement::below_centre(INTRO_MESSAGE_OFFSET));
                }
            }
            GamePhase::Playing | GamePhase::LevelComplete => {
                for obstacle in self.world.obstacles.iter().filter(|o| o.exists) {
                    renderer.draw_obstacle(obstacle);
                }
                for item in self.world.items.iter().filter(|i| i.exists) {
                    renderer.draw_item(item);
                }
                renderer.draw_character(&self.world.character);
                renderer.draw_life_bar(&self.world.character.life);
                renderer.draw_text(
                    &format!("{} {}", SCORE_MESSAGE, self.score()),
                    TextPlacement::at(SCORE_POSITION.0, SCORE_POSITION.1),
                );
            }
            GamePhase::Transitioning { .. } => {
                renderer.draw_text(LEVEL_UP_MESSAGE, TextPlacement::centred());
            }
            GamePhase::GameOver { won: true } => {
                renderer.draw_text(WIN_MESSAGE, TextPlacement::centred());
            }
            GamePhase::GameOver { won: false } => {
                renderer.draw_text(GAME_LOST_MESSAGE, TextPlacement::centred());
                renderer.draw_text(
                    &format!("{} {}", FINAL_SCORE_MESSAGE, self.score()),
                    TextPlacement::below_centre(FINAL_SCORE_OFFSET),
                );
            }
        }
    }
}
