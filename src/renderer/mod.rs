//! Rendering boundary
//!
//! The simulation issues draw calls through [`Renderer`] once per frame after
//! updating; image and font handling belong to the implementor.

pub mod capture;

use glam::Vec2;

use crate::sim::{Background, Character, Item, LifeBar, Obstacle};

pub use capture::{DrawCall, FrameCapture};

/// Where a line of text goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextPlacement {
    /// Top-left anchored at a screen position
    At(Vec2),
    /// Horizontally centred, shifted down from the screen centre
    Centred { offset_y: f32 },
}

impl TextPlacement {
    pub fn at(x: f32, y: f32) -> Self {
        TextPlacement::At(Vec2::new(x, y))
    }

    pub fn centred() -> Self {
        TextPlacement::Centred { offset_y: 0.0 }
    }

    pub fn below_centre(offset_y: f32) -> Self {
        TextPlacement::Centred { offset_y }
    }
}

/// Draw calls issued by the game each frame
pub trait Renderer {
    fn draw_background(&mut self, background: &Background);
    /// Both pipes, plus flames while they are live
    fn draw_obstacle(&mut self, obstacle: &Obstacle);
    fn draw_item(&mut self, item: &Item);
    /// Uses [`Character::wing_up`] to pick the sprite
    fn draw_character(&mut self, character: &Character);
    fn draw_life_bar(&mut self, life: &LifeBar);
    fn draw_text(&mut self, text: &str, placement: TextPlacement);
}
