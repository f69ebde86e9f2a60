//! Platform abstraction layer
//!
//! The simulation only asks "was this control pressed this frame". Key
//! events from whatever window layer is in use are folded into a
//! [`KeyboardState`] and read back once per tick.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Jump,
    Fire,
    SpeedUp,
    SpeedDown,
    Start,
    Quit,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Jump,
        Control::Fire,
        Control::SpeedUp,
        Control::SpeedDown,
        Control::Start,
        Control::Quit,
    ];

    /// Controls bound to a key, named the way `KeyboardEvent.key` reports them
    pub fn for_key(key: &str) -> &'static [Control] {
        match key {
            // Space both starts the game and flaps
            " " | "Space" => &[Control::Start, Control::Jump],
            "s" | "S" => &[Control::Fire],
            "l" | "L" => &[Control::SpeedUp],
            "k" | "K" => &[Control::SpeedDown],
            "Escape" => &[Control::Quit],
            _ => &[],
        }
    }
}

/// Per-frame, edge-triggered control query
pub trait InputSource {
    fn was_pressed(&self, control: Control) -> bool;
}

/// Controls pressed since the last frame boundary
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<Control>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event
    pub fn key_down(&mut self, key: &str) {
        let controls = Control::for_key(key);
        if controls.is_empty() {
            log::trace!("Unbound key {:?}", key);
        }
        self.pressed.extend(controls.iter().copied());
    }

    pub fn press(&mut self, control: Control) {
        self.pressed.insert(control);
    }

    /// Forget this frame's presses
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn was_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }
}

impl TickInput {
    /// Collect this frame's controls from an input source
    pub fn poll<S: InputSource + ?Sized>(source: &S, idle_mode: bool) -> Self {
        Self {
            jump: source.was_pressed(Control::Jump),
            fire: source.was_pressed(Control::Fire),
            speed_up: source.was_pressed(Control::SpeedUp),
            speed_down: source.was_pressed(Control::SpeedDown),
            start: source.was_pressed(Control::Start),
            quit: source.was_pressed(Control::Quit),
            idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_starts_and_jumps() {
        let mut keys = KeyboardState::new();
        keys.key_down(" ");
        let input = TickInput::poll(&keys, false);
        assert!(input.start);
        assert!(input.jump);
        assert!(!input.fire);
    }

    #[test]
    fn test_key_bindings() {
        let mut keys = KeyboardState::new();
        for key in ["s", "L", "k", "Escape", "x"] {
            keys.key_down(key);
        }
        let input = TickInput::poll(&keys, true);
        assert!(input.fire && input.speed_up && input.speed_down && input.quit);
        assert!(!input.jump);
        assert!(input.idle_mode);
    }

    #[test]
    fn test_presses_are_edge_triggered() {
        let mut keys = KeyboardState::new();
        keys.press(Control::Fire);
        assert!(keys.was_pressed(Control::Fire));
        keys.end_frame();
        assert!(Control::ALL.iter().all(|c| !keys.was_pressed(*c)));
    }
}
