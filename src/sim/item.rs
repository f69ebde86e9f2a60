//! Collectible weapons (rocks and bombs)
//!
//! Items drift in from the right like obstacles. Once picked up they ride
//! alongside the character; once fired they fly right at a fixed speed until
//! they hit a pipe or run out of range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Item variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Rock,
    Bomb,
}

impl ItemKind {
    /// Sprite/hitbox size
    pub fn size(&self) -> Vec2 {
        match self {
            ItemKind::Rock => Vec2::new(32.0, 32.0),
            ItemKind::Bomb => Vec2::new(36.0, 36.0),
        }
    }

    /// Frames a fired item survives without hitting anything
    pub fn max_range_frames(&self) -> u32 {
        match self {
            ItemKind::Rock => 25,
            ItemKind::Bomb => 50,
        }
    }
}

/// A weapon in the world
#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Riding alongside the character
    pub carried: bool,
    /// Launched; flies at a fixed speed
    pub fired: bool,
    pub frames_since_fired: u32,
    /// Cleared when consumed, expired or discarded
    pub exists: bool,
    /// Speed applied on the latest movement (pixels/frame)
    pub velocity: f32,
}

impl Item {
    /// Spawn at the right screen edge
    pub fn new(id: u32, kind: ItemKind, y: f32, multiplier: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(SCREEN_WIDTH, y),
            carried: false,
            fired: false,
            frames_since_fired: 0,
            exists: true,
            velocity: ITEM_BASE_VELOCITY * multiplier,
        }
    }

    pub fn hitbox(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    /// One frame of free or fired flight. Carried items are moved by
    /// [`Item::attach_to`] instead.
    pub fn advance(&mut self, multiplier: f32) {
        if self.carried {
            return;
        }
        if self.fired {
            self.frames_since_fired += 1;
            self.pos.x += self.velocity;
        } else {
            self.velocity = ITEM_BASE_VELOCITY * multiplier;
            self.pos.x -= self.velocity;
        }
    }

    /// Snap to the right edge of the carrier, vertically centred
    pub fn attach_to(&mut self, carrier: &Rect) {
        let size = self.kind.size();
        self.pos = Vec2::new(carrier.right(), carrier.centre().y - size.y / 2.0);
    }

    pub fn pick_up(&mut self) {
        self.carried = true;
    }

    /// Launch a carried item. Returns false if it was not being carried.
    pub fn fire(&mut self) -> bool {
        if !self.carried {
            return false;
        }
        self.carried = false;
        self.fired = true;
        self.frames_since_fired = 0;
        self.velocity = ITEM_FIRED_VELOCITY;
        true
    }

    /// Fired for at least the kind's maximum range
    pub fn range_exhausted(&self) -> bool {
        self.fired && self.frames_since_fired >= self.kind.max_range_frames()
    }

    pub fn is_off_screen(&self) -> bool {
        let hitbox = self.hitbox();
        hitbox.right() < 0.0 || hitbox.left() > SCREEN_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_item_drifts_with_timescale() {
        let mut item = Item::new(1, ItemKind::Rock, 200.0, 1.0);
        item.advance(1.0);
        assert_eq!(item.pos.x, SCREEN_WIDTH - 3.0);
        item.advance(1.5);
        assert_eq!(item.pos.x, SCREEN_WIDTH - 3.0 - 4.5);
    }

    #[test]
    fn test_carried_item_ignores_velocity() {
        let mut item = Item::new(1, ItemKind::Bomb, 200.0, 1.0);
        item.pick_up();
        let before = item.pos;
        item.advance(5.0);
        assert_eq!(item.pos, before);

        let carrier = Rect::new(100.0, 100.0, 60.0, 40.0);
        item.attach_to(&carrier);
        assert_eq!(item.pos, Vec2::new(160.0, 120.0 - 18.0));
    }

    #[test]
    fn test_fired_speed_ignores_timescale() {
        let mut item = Item::new(1, ItemKind::Rock, 200.0, 1.0);
        item.pick_up();
        assert!(item.fire());
        let x = item.pos.x;
        item.advance(5.0625);
        assert_eq!(item.pos.x, x + ITEM_FIRED_VELOCITY);
        assert_eq!(item.frames_since_fired, 1);
    }

    #[test]
    fn test_fire_requires_carrying() {
        let mut item = Item::new(1, ItemKind::Rock, 200.0, 1.0);
        assert!(!item.fire());
        assert!(!item.fired);
    }

    #[test]
    fn test_range_by_kind() {
        for (kind, frames) in [(ItemKind::Rock, 25), (ItemKind::Bomb, 50)] {
            let mut item = Item::new(1, kind, 200.0, 1.0);
            item.pos.x = 0.0;
            item.pick_up();
            item.fire();
            for _ in 0..frames - 1 {
                item.advance(1.0);
            }
            assert!(!item.range_exhausted());
            item.advance(1.0);
            assert!(item.range_exhausted());
        }
    }

    #[test]
    fn test_off_screen_both_sides() {
        let mut item = Item::new(1, ItemKind::Rock, 200.0, 1.0);
        assert!(!item.is_off_screen());
        item.pos.x = SCREEN_WIDTH + 1.0;
        assert!(item.is_off_screen());
        item.pos.x = -40.0;
        assert!(item.is_off_screen());
    }
}
