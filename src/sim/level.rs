//! Per-level update
//!
//! A level owns its score, completion flags and obstacle spawn timing. One
//! call to [`Level::update`] is one frame of play, run in a fixed order:
//! TimeScale, obstacles, items, character collisions, then character motion
//! and scoring.

use rand::Rng;

use super::character::{Character, LifeBar};
use super::collision::{self, ProjectileHit};
use super::geometry::Rect;
use super::item::{Item, ItemKind};
use super::obstacle::{Obstacle, ObstacleKind};
use super::state::{GameEvent, World};
use super::tick::TickInput;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::{LevelConfig, ObstacleMix, Settings};

/// Obstacle spawn interval at a given multiplier, in frames
#[inline]
pub fn spawn_interval(multiplier: f32) -> f32 {
    BASE_SPAWN_INTERVAL / multiplier
}

/// Frame of the spawn cycle at which an item may be offered
#[inline]
pub fn item_spawn_frame(interval: f32) -> u32 {
    (interval * ITEM_SPAWN_PHASE) as u32
}

/// One level of play
#[derive(Debug, Clone)]
pub struct Level {
    index: usize,
    config: LevelConfig,
    life: LifeBar,
    score: u32,
    game_over: bool,
    complete: bool,
    /// Frames since the last obstacle spawn
    frame_count: u32,
    interval: f32,
    started: bool,
}

impl Level {
    /// Build a level, rejecting invalid configuration
    pub fn new(index: usize, config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate(index)?;
        let life = LifeBar::new(config.start_lives)?;
        Ok(Self {
            index,
            config,
            life,
            score: 0,
            game_over: false,
            complete: false,
            frame_count: 0,
            interval: BASE_SPAWN_INTERVAL,
            started: false,
        })
    }

    /// Start from a carried-over score instead of zero
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn intro_message(&self) -> Option<&str> {
        self.config.intro_message.as_deref()
    }

    /// A full-health character at the spawn point
    pub fn create_character(&self) -> Character {
        Character::new(self.life.clone())
    }

    /// One frame of play
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        input: &TickInput,
        rng: &mut R,
        settings: &Settings,
        events: &mut Vec<GameEvent>,
    ) {
        if self.game_over || self.complete {
            return;
        }

        world.timescale.apply(input.speed_up, input.speed_down);
        self.update_obstacles(world, rng, events);
        if self.config.items {
            self.update_items(world, events);
            self.spawn_item(world, rng, settings, events);
        }

        if let Some((obstacle, _)) =
            collision::resolve_obstacle_contact(&mut world.character, &mut world.obstacles)
        {
            events.push(GameEvent::CharacterHit {
                obstacle,
                lives: world.character.life.lives(),
            });
        }
        let bounds = world.background.bounds();
        if collision::resolve_bounds(&mut world.character, &bounds).is_some() {
            events.push(GameEvent::OutOfBounds {
                lives: world.character.life.lives(),
            });
        }

        if world.character.is_alive() {
            self.update_character(world, input, events);
        } else {
            log::info!("Level {}: character died at score {}", self.index, self.score);
            self.game_over = true;
        }
    }

    fn update_obstacles<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let multiplier = world.timescale.multiplier();

        if self.started {
            self.frame_count += 1;
            world.obstacles.retain(|o| o.exists);
            for obstacle in world.obstacles.iter_mut() {
                obstacle.advance(multiplier);
            }
            if self.frame_count >= self.interval.round() as u32 {
                self.frame_count = 0;
                self.spawn_obstacle(world, rng, events);
            }
        } else {
            self.started = true;
            self.frame_count = 0;
            self.spawn_obstacle(world, rng, events);
        }

        if world.obstacles.back().is_some_and(Obstacle::is_off_screen) {
            world.obstacles.pop_back();
        }

        let nearest = world
            .obstacles
            .back()
            .map_or(multiplier, |o| o.multiplier);
        self.interval = spawn_interval(nearest);
    }

    fn spawn_obstacle<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let gap_start = self.config.gaps.sample_gap_start(rng);
        let kind = match self.config.obstacles {
            ObstacleMix::PlainOnly => ObstacleKind::Plain,
            ObstacleMix::Mixed {
                resistant_probability,
            } => {
                if rng.random_bool(resistant_probability) {
                    ObstacleKind::Resistant
                } else {
                    ObstacleKind::Plain
                }
            }
        };

        let id = world.next_entity_id();
        let multiplier = world.timescale.multiplier();
        world
            .obstacles
            .push_front(Obstacle::new(id, kind, gap_start, multiplier));
        log::debug!("Spawned {:?} obstacle {} with gap at {}", kind, id, gap_start);
        events.push(GameEvent::ObstacleSpawned { id, kind });
    }

    fn update_items(&mut self, world: &mut World, events: &mut Vec<GameEvent>) {
        let multiplier = world.timescale.multiplier();
        let character = world.character.hitbox();
        let carried = world.character.carried;
        let mut pickups = Vec::new();

        for item in world.items.iter_mut() {
            if item.fired {
                if item.range_exhausted() {
                    item.exists = false;
                    log::debug!("{:?} {} ran out of range", item.kind, item.id);
                    events.push(GameEvent::ItemExpired { id: item.id });
                    continue;
                }
                match collision::resolve_projectile(item, &mut world.obstacles) {
                    ProjectileHit::Destroyed { obstacle } => {
                        self.score += 1;
                        events.push(GameEvent::ObstacleDestroyed {
                            id: obstacle,
                            by: item.kind,
                        });
                        continue;
                    }
                    ProjectileHit::Deflected { obstacle } => {
                        events.push(GameEvent::ItemDeflected {
                            id: item.id,
                            obstacle,
                        });
                        continue;
                    }
                    ProjectileHit::Miss => {}
                }
            }

            item.advance(multiplier);

            if !item.carried
                && !item.fired
                && carried != Some(item.id)
                && item.hitbox().intersects(&character)
            {
                pickups.push(item.id);
            }
        }

        for id in pickups {
            self.pick_up(world, id, events);
        }

        // Carried items ride with the character and are never swept
        world
            .items
            .retain(|i| i.exists && (i.carried || !i.is_off_screen()));
    }

    /// Carry `id`, discarding whatever was carried before
    fn pick_up(&self, world: &mut World, id: u32, events: &mut Vec<GameEvent>) {
        if let Some(previous) = world.character.carried.take() {
            if let Some(item) = world.item_mut(previous) {
                item.exists = false;
            }
            events.push(GameEvent::ItemDiscarded { id: previous });
        }

        if let Some(item) = world.item_mut(id) {
            item.pick_up();
            let kind = item.kind;
            world.character.carried = Some(id);
            log::debug!("Picked up {:?} {}", kind, id);
            events.push(GameEvent::ItemPickedUp { id, kind });
        }
    }

    /// Offer an item at the spawn phase, retrying placements that would
    /// overlap the most recent item
    fn spawn_item<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        rng: &mut R,
        settings: &Settings,
        events: &mut Vec<GameEvent>,
    ) {
        if self.frame_count != item_spawn_frame(self.interval)
            || !rng.random_bool(settings.item_spawn_probability)
        {
            return;
        }

        let latest = world.items.iter().find(|i| i.exists).map(Item::hitbox);
        for _ in 0..settings.max_spawn_attempts {
            let y = self.config.gaps.sample_position(rng);
            let kind = if rng.random_bool(0.5) {
                ItemKind::Rock
            } else {
                ItemKind::Bomb
            };
            let size = kind.size();
            let candidate = Rect::new(SCREEN_WIDTH, y, size.x, size.y);
            if latest.is_some_and(|latest| latest.intersects(&candidate)) {
                continue;
            }

            let id = world.next_entity_id();
            world
                .items
                .push_front(Item::new(id, kind, y, world.timescale.multiplier()));
            log::debug!("Spawned {:?} {} at y {:.1}", kind, id, y);
            events.push(GameEvent::ItemSpawned { id, kind });
            return;
        }

        log::debug!(
            "Item spawn skipped after {} overlapping placements",
            settings.max_spawn_attempts
        );
    }

    fn update_character(&mut self, world: &mut World, input: &TickInput, events: &mut Vec<GameEvent>) {
        world.character.advance(input.jump);

        let carrier = world.character.hitbox();
        if let Some(id) = world.character.carried {
            if let Some(item) = world.item_mut(id) {
                item.attach_to(&carrier);
            }
        }

        if input.fire {
            if let Some(id) = world.character.carried.take() {
                if let Some(item) = world.item_mut(id) {
                    if item.fire() {
                        log::debug!("Fired {:?} {}", item.kind, id);
                        events.push(GameEvent::ItemFired { id, kind: item.kind });
                    }
                }
            }
        }

        let centre_x = world.character.centre().x;
        if let Some(nearest) = world.obstacles.back_mut().filter(|o| o.exists) {
            if nearest.mark_passed(centre_x) {
                self.score += 1;
                events.push(GameEvent::ObstaclePassed { id: nearest.id });
            }
        }

        if self.score >= self.config.target_score {
            self.complete = true;
            log::info!("Level {} complete with score {}", self.index, self.score);
            events.push(GameEvent::LevelComplete {
                level: self.index,
                score: self.score,
            });
        }
    }
}
