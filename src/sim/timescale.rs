//! Global time dilation
//!
//! A discrete speed level shared by every scrolling entity. Velocities scale
//! geometrically with the level, not linearly.

use serde::{Deserialize, Serialize};

use crate::consts::{TIMESCALE_MAX, TIMESCALE_MIN, TIMESCALE_MULTIPLIER};

/// Speed multiplier for a given TimeScale level
#[inline]
pub fn speed_multiplier(level: u8) -> f32 {
    TIMESCALE_MULTIPLIER.powi(i32::from(level) - 1)
}

/// Current TimeScale level, always within `[TIMESCALE_MIN, TIMESCALE_MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeScale {
    level: u8,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            level: TIMESCALE_MIN,
        }
    }
}

impl TimeScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Effective velocity multiplier for the current level
    pub fn multiplier(&self) -> f32 {
        speed_multiplier(self.level)
    }

    /// Step up one level; returns false when already at the maximum
    pub fn speed_up(&mut self) -> bool {
        if self.level < TIMESCALE_MAX {
            self.level += 1;
            true
        } else {
            false
        }
    }

    /// Step down one level; returns false when already at the minimum
    pub fn slow_down(&mut self) -> bool {
        if self.level > TIMESCALE_MIN {
            self.level -= 1;
            true
        } else {
            false
        }
    }

    /// Apply this frame's speed controls (speed-up wins if both are pressed)
    pub fn apply(&mut self, speed_up: bool, slow_down: bool) {
        let changed = if speed_up {
            self.speed_up()
        } else if slow_down {
            self.slow_down()
        } else {
            false
        };
        if changed {
            log::debug!("TimeScale -> {} (x{:.3})", self.level, self.multiplier());
        }
    }

    pub fn reset(&mut self) {
        self.level = TIMESCALE_MIN;
    }
}
