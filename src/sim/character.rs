//! The controllable flyer and its life counter

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::error::ConfigError;

/// Outcome of applying damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStatus {
    Alive,
    Dead,
}

/// Bounded life counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeBar {
    max: u32,
    lives: u32,
}

impl LifeBar {
    /// A full life bar. A zero maximum is a configuration error.
    pub fn new(max: u32) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::InvalidLives(max));
        }
        Ok(Self { max, lives: max })
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Remove `amount` lives, clamping at zero. A depleted bar is left untouched.
    pub fn decrease(&mut self, amount: u32) -> LifeStatus {
        if self.lives == 0 {
            log::warn!("Damage ({}) applied to a depleted life bar", amount);
            return LifeStatus::Dead;
        }
        if amount >= self.lives {
            self.lives = 0;
            LifeStatus::Dead
        } else {
            self.lives -= amount;
            LifeStatus::Alive
        }
    }

    /// Heart slots for the HUD, full hearts first
    pub fn hearts(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.max).map(|slot| slot < self.lives)
    }
}

/// The player's flyer
#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity, positive = downward
    pub velocity: f32,
    pub life: LifeBar,
    /// Id of the item currently riding alongside
    pub carried: Option<u32>,
    wing_counter: u32,
    wing_up: bool,
}

impl Character {
    pub fn size() -> Vec2 {
        Vec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT)
    }

    /// Spawn at the standard spawn point with a full life bar
    pub fn new(life: LifeBar) -> Self {
        let spawn = Vec2::new(CHARACTER_CENTRE_X, CHARACTER_SPAWN_CENTRE_Y);
        Self {
            pos: spawn - Self::size() / 2.0,
            velocity: 0.0,
            life,
            carried: None,
            wing_counter: 0,
            wing_up: false,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CHARACTER_WIDTH, CHARACTER_HEIGHT)
    }

    pub fn centre(&self) -> Vec2 {
        self.pos + Self::size() / 2.0
    }

    /// Place the character's centre at `y` (keeps x)
    pub fn set_centre_y(&mut self, y: f32) {
        self.pos.y = y - CHARACTER_HEIGHT / 2.0;
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    /// Whether this frame shows the wing-up sprite
    pub fn wing_up(&self) -> bool {
        self.wing_up
    }

    /// Jump impulse: replaces any accumulated fall speed
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
    }

    /// Gravity, capped at the maximum fall speed
    pub fn fall(&mut self) {
        if self.velocity < MAX_FALL_VELOCITY {
            self.velocity = (self.velocity + CHARACTER_ACCELERATION).min(MAX_FALL_VELOCITY);
        }
    }

    /// One frame of vertical motion
    pub fn advance(&mut self, jump: bool) {
        if jump {
            self.jump();
        } else {
            self.fall();
        }
        self.pos.y += self.velocity;

        if self.wing_counter == WING_FLAP_FRAMES {
            self.wing_counter = 0;
            self.wing_up = true;
        } else {
            self.wing_counter += 1;
            self.wing_up = false;
        }
    }

    pub fn take_damage(&mut self, amount: u32) -> LifeStatus {
        let status = self.life.decrease(amount);
        log::debug!(
            "Character took {} damage, {} of {} lives left",
            amount,
            self.life.lives(),
            self.life.max()
        );
        status
    }

    /// Back to the spawn height, at rest. Lives are not restored.
    pub fn respawn(&mut self) {
        self.set_centre_y(CHARACTER_SPAWN_CENTRE_Y);
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(lives: u32) -> Character {
        Character::new(LifeBar::new(lives).unwrap())
    }

    #[test]
    fn test_zero_lives_is_config_error() {
        assert!(matches!(LifeBar::new(0), Err(ConfigError::InvalidLives(0))));
    }

    #[test]
    fn test_damage_below_lives_keeps_alive() {
        let mut bar = LifeBar::new(3).unwrap();
        assert_eq!(bar.decrease(1), LifeStatus::Alive);
        assert_eq!(bar.lives(), 2);
        assert!(bar.is_alive());
    }

    #[test]
    fn test_lethal_damage_clamps_to_zero() {
        let mut bar = LifeBar::new(3).unwrap();
        assert_eq!(bar.decrease(5), LifeStatus::Dead);
        assert_eq!(bar.lives(), 0);
        assert!(!bar.is_alive());
    }

    #[test]
    fn test_dead_bar_is_idempotent() {
        let mut bar = LifeBar::new(1).unwrap();
        assert_eq!(bar.decrease(1), LifeStatus::Dead);
        assert_eq!(bar.decrease(1), LifeStatus::Dead);
        assert_eq!(bar.lives(), 0);
    }

    #[test]
    fn test_hearts() {
        let mut bar = LifeBar::new(3).unwrap();
        bar.decrease(1);
        let hearts: Vec<bool> = bar.hearts().collect();
        assert_eq!(hearts, vec![true, true, false]);
    }

    #[test]
    fn test_spawn_position() {
        let c = character(3);
        assert_eq!(c.centre(), Vec2::new(CHARACTER_CENTRE_X, CHARACTER_SPAWN_CENTRE_Y));
        assert_eq!(c.velocity, 0.0);
    }

    #[test]
    fn test_fall_accelerates_and_caps() {
        let mut c = character(3);
        c.advance(false);
        assert!((c.velocity - CHARACTER_ACCELERATION).abs() < 1e-6);
        for _ in 0..100 {
            c.advance(false);
        }
        assert_eq!(c.velocity, MAX_FALL_VELOCITY);
    }

    #[test]
    fn test_jump_overrides_fall_speed() {
        let mut c = character(3);
        for _ in 0..30 {
            c.advance(false);
        }
        let y = c.pos.y;
        c.advance(true);
        assert_eq!(c.velocity, JUMP_VELOCITY);
        assert_eq!(c.pos.y, y + JUMP_VELOCITY);
    }

    #[test]
    fn test_respawn_keeps_damage() {
        let mut c = character(3);
        for _ in 0..10 {
            c.advance(false);
        }
        c.take_damage(1);
        c.respawn();
        assert_eq!(c.centre().y, CHARACTER_SPAWN_CENTRE_Y);
        assert_eq!(c.velocity, 0.0);
        assert_eq!(c.life.lives(), 2);
    }

    #[test]
    fn test_wing_flaps_every_eleventh_frame() {
        let mut c = character(3);
        let ups: Vec<usize> = (1..=25)
            .filter(|_| {
                c.advance(false);
                c.wing_up()
            })
            .collect();
        assert_eq!(ups, vec![11, 22]);
    }
}
