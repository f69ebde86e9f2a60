//! Pipe-pair obstacles
//!
//! Each obstacle is an upper and lower pipe sharing one x position, with a
//! fixed gap between them. Resistant (steel) pipes also carry flame hazards
//! that are only live for a short window of every animation cycle.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::item::ItemKind;
use crate::consts::*;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Destroyed by any fired item
    #[default]
    Plain,
    /// Only bombs destroy it; cycles flame hazards
    Resistant,
}

impl ObstacleKind {
    /// Resistance rule: does a hit from `item` destroy this kind?
    pub fn destroyed_by(&self, item: ItemKind) -> bool {
        match self {
            ObstacleKind::Plain => true,
            ObstacleKind::Resistant => item == ItemKind::Bomb,
        }
    }

    pub fn has_hazards(&self) -> bool {
        matches!(self, ObstacleKind::Resistant)
    }
}

/// A pipe pair scrolling right to left
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Shared left edge of both pipes
    pub x: f32,
    /// Height of the upper pipe; the gap starts here
    pub gap_start: f32,
    /// Set once the character's centre crosses the right edge
    pub passed: bool,
    /// Cleared when destroyed; removed on the next obstacle update
    pub exists: bool,
    /// TimeScale multiplier used for the latest movement
    pub multiplier: f32,
    /// Position in the hazard cycle (1..=HAZARD_CYCLE_FRAMES once moving)
    pub hazard_frame: u32,
}

impl Obstacle {
    /// Spawn at the right screen edge
    pub fn new(id: u32, kind: ObstacleKind, gap_start: f32, multiplier: f32) -> Self {
        Self {
            id,
            kind,
            x: SCREEN_WIDTH,
            gap_start,
            passed: false,
            exists: true,
            multiplier,
            hazard_frame: 0,
        }
    }

    #[inline]
    pub fn upper_height(&self) -> f32 {
        self.gap_start
    }

    #[inline]
    pub fn lower_height(&self) -> f32 {
        SCREEN_HEIGHT - (self.gap_start + OBSTACLE_GAP)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    pub fn upper(&self) -> Rect {
        Rect::new(self.x, 0.0, OBSTACLE_WIDTH, self.upper_height())
    }

    pub fn lower(&self) -> Rect {
        Rect::new(
            self.x,
            self.gap_start + OBSTACLE_GAP,
            OBSTACLE_WIDTH,
            self.lower_height(),
        )
    }

    /// Horizontal speed (pixels/frame) at the latest multiplier
    pub fn velocity(&self) -> f32 {
        OBSTACLE_BASE_VELOCITY * self.multiplier
    }

    /// Move left one frame and step the hazard cycle
    pub fn advance(&mut self, multiplier: f32) {
        self.multiplier = multiplier;
        self.x -= self.velocity();

        if self.kind.has_hazards() {
            if self.hazard_frame == HAZARD_CYCLE_FRAMES {
                self.hazard_frame = 0;
            }
            self.hazard_frame += 1;
        }
    }

    /// Flame hitboxes, flush against the inner ends of both pipes
    pub fn hazards(&self) -> Option<[Rect; 2]> {
        if !self.kind.has_hazards() {
            return None;
        }
        let top = Rect::new(self.x, self.gap_start, HAZARD_WIDTH, HAZARD_HEIGHT);
        let bottom = Rect::new(
            self.x,
            self.gap_start + OBSTACLE_GAP - HAZARD_HEIGHT,
            HAZARD_WIDTH,
            HAZARD_HEIGHT,
        );
        Some([top, bottom])
    }

    /// Hazards are collidable only in the trailing frames of each cycle
    pub fn hazard_active(&self) -> bool {
        self.kind.has_hazards()
            && self.hazard_frame > HAZARD_CYCLE_FRAMES - HAZARD_ACTIVE_FRAMES
            && self.hazard_frame <= HAZARD_CYCLE_FRAMES
    }

    /// Character contact: either pipe, or a live hazard
    pub fn hits_character(&self, hitbox: &Rect) -> bool {
        if self.upper().intersects(hitbox) || self.lower().intersects(hitbox) {
            return true;
        }
        match self.hazards() {
            Some(hazards) if self.hazard_active() => hazards.iter().any(|h| h.intersects(hitbox)),
            _ => false,
        }
    }

    /// Projectile contact: main pipes only
    pub fn struck_by(&self, hitbox: &Rect) -> bool {
        self.upper().intersects(hitbox) || self.lower().intersects(hitbox)
    }

    /// Apply a hit from a fired item. Returns whether the obstacle survives.
    pub fn take_damage(&mut self, item: ItemKind) -> bool {
        if self.kind.destroyed_by(item) {
            self.exists = false;
            false
        } else {
            true
        }
    }

    /// Right edge has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Record the character passing; true only on the first crossing
    pub fn mark_passed(&mut self, character_centre_x: f32) -> bool {
        if !self.passed && character_centre_x > self.right() {
            self.passed = true;
            return true;
        }
        false
    }
}
