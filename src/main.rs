//! Shadow Flap - headless entry point
//!
//! Runs the game in demo mode (autopilot input) against a recording renderer
//! until the run ends, then quits. An optional first argument names a JSON
//! settings file.

use std::path::PathBuf;
use std::process::ExitCode;

use shadow_flap::Settings;
use shadow_flap::platform::KeyboardState;
use shadow_flap::renderer::FrameCapture;
use shadow_flap::sim::{Flow, GamePhase, GameState, TickInput, tick};

/// Frames before a demo run is cut short (ten minutes at 60 Hz)
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Shadow Flap (headless demo) starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to build game: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut keys = KeyboardState::new();
    let mut frame = FrameCapture::default();
    loop {
        if state.is_over() || state.frame >= MAX_DEMO_FRAMES {
            keys.key_down("Escape");
        }
        let input = TickInput::poll(&keys, true);
        keys.end_frame();

        if tick(&mut state, &input) == Flow::Exit {
            break;
        }

        frame.clear();
        state.draw(&mut frame);
        for event in state.drain_events() {
            log::debug!("[{}] {:?}", state.frame, event);
        }
    }

    match state.phase {
        GamePhase::GameOver { won } => log::info!(
            "{} after {} frames: {}",
            if won { "Won" } else { "Lost" },
            state.frame,
            frame.texts().join(" / ")
        ),
        phase => log::info!(
            "Stopped after {} frames in {:?} (level {}, score {})",
            state.frame,
            phase,
            state.level.index(),
            state.score()
        ),
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on the web
}
