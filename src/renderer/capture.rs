//! Headless renderer that records draw calls

use glam::Vec2;

use super::{Renderer, TextPlacement};
use crate::sim::{Background, Character, Item, ItemKind, LifeBar, Obstacle, ObstacleKind};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background { level: usize },
    Obstacle {
        id: u32,
        kind: ObstacleKind,
        x: f32,
        gap_start: f32,
        flames: bool,
    },
    Item { id: u32, kind: ItemKind, pos: Vec2 },
    Character { pos: Vec2, wing_up: bool },
    LifeBar { hearts: Vec<bool> },
    Text { text: String, placement: TextPlacement },
}

/// Collects the calls of a frame for inspection (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct FrameCapture {
    pub calls: Vec<DrawCall>,
}

impl FrameCapture {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Text lines in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for FrameCapture {
    fn draw_background(&mut self, background: &Background) {
        self.calls.push(DrawCall::Background {
            level: background.level,
        });
    }

    fn draw_obstacle(&mut self, obstacle: &Obstacle) {
        self.calls.push(DrawCall::Obstacle {
            id: obstacle.id,
            kind: obstacle.kind,
            x: obstacle.x,
            gap_start: obstacle.gap_start,
            flames: obstacle.hazard_active(),
        });
    }

    fn draw_item(&mut self, item: &Item) {
        self.calls.push(DrawCall::Item {
            id: item.id,
            kind: item.kind,
            pos: item.pos,
        });
    }

    fn draw_character(&mut self, character: &Character) {
        self.calls.push(DrawCall::Character {
            pos: character.pos,
            wing_up: character.wing_up(),
        });
    }

    fn draw_life_bar(&mut self, life: &LifeBar) {
        self.calls.push(DrawCall::LifeBar {
            hearts: life.hearts().collect(),
        });
    }

    fn draw_text(&mut self, text: &str, placement: TextPlacement) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            placement,
        });
    }
}
