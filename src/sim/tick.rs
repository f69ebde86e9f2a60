//! Fixed timestep simulation tick
//!
//! Drives the top-level state machine: start prompt, per-level play, the
//! level-up hold between levels and the final outcome.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick. Every field is edge-triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump impulse
    pub jump: bool,
    /// Launch the carried item
    pub fire: bool,
    /// Raise the TimeScale one step
    pub speed_up: bool,
    /// Lower the TimeScale one step
    pub speed_down: bool,
    /// Leave the start prompt
    pub start: bool,
    /// Exit the game
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Quit was requested; terminate with success
    Exit,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Flow {
    if input.quit {
        log::info!("Quit requested at frame {}", state.frame);
        return Flow::Exit;
    }
    state.frame += 1;

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::AwaitingStart => {
            if input.start {
                log::info!("Level {} started", state.level.index());
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::LevelStarted {
                    level: state.level.index(),
                });
                update_level(state, &input);
            }
        }
        GamePhase::Playing => update_level(state, &input),
        GamePhase::LevelComplete => hold_transition(state, 0),
        GamePhase::Transitioning { elapsed } => hold_transition(state, elapsed),
        GamePhase::GameOver { .. } => {}
    }

    Flow::Continue
}

fn update_level(state: &mut GameState, input: &TickInput) {
    let GameState {
        level,
        world,
        rng,
        settings,
        events,
        ..
    } = state;
    level.update(world, input, rng, settings, events);

    if state.level.is_game_over() {
        let score = state.score();
        log::info!("Game over, final score {}", score);
        state.phase = GamePhase::GameOver { won: false };
        state.events.push(GameEvent::GameOver { won: false, score });
    } else if state.level.is_complete() {
        state.phase = GamePhase::LevelComplete;
    }
}

/// Count one more frame of the level-up message
fn hold_transition(state: &mut GameState, elapsed: u32) {
    let elapsed = elapsed + 1;
    if elapsed >= state.settings.transition_frames {
        state.advance_level();
    } else {
        state.phase = GamePhase::Transitioning { elapsed };
    }
}

/// Demo input: start immediately, steer toward the next gap and fire at
/// whatever is ahead
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    match state.phase {
        GamePhase::AwaitingStart => input.start = true,
        GamePhase::Playing => {
            let character = &state.world.character;
            let centre = character.centre();

            let target = state
                .world
                .obstacles
                .iter()
                .rev()
                .find(|o| o.exists && o.right() > character.pos.x)
                .map_or(CHARACTER_SPAWN_CENTRE_Y, |o| o.gap_start + OBSTACLE_GAP / 2.0);

            // Jump once the predicted position sinks below the target
            let predicted = centre.y + character.velocity * 4.0;
            input.jump = character.velocity >= 0.0 && predicted > target + 10.0;

            input.fire = character.carried.is_some()
                && state
                    .world
                    .obstacles
                    .iter()
                    .any(|o| o.exists && o.x > centre.x);
        }
        _ => {}
    }

    input
}
