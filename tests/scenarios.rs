//! End-to-end game scenarios driven through the public tick API

use shadow_flap::consts::*;
use shadow_flap::renderer::FrameCapture;
use shadow_flap::sim::{Flow, GameEvent, GamePhase, GameState, ObstacleKind, TickInput, tick};
use shadow_flap::{GapRange, LevelConfig, ObstacleMix, Settings};

fn single_level(start_lives: u32, target_score: u32) -> Settings {
    Settings {
        seed: Some(2021),
        levels: vec![LevelConfig {
            start_lives,
            target_score,
            gaps: GapRange::Choices { starts: vec![100] },
            obstacles: ObstacleMix::PlainOnly,
            items: false,
            intro_message: None,
        }],
        ..Default::default()
    }
}

fn start(state: &mut GameState) {
    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(state, &input);
    assert_eq!(state.phase, GamePhase::Playing);
}

/// Keep the character level with the middle of a gap starting at 100
fn hold_in_gap(state: &mut GameState) {
    state.world.character.set_centre_y(184.0);
    state.world.character.velocity = 0.0;
}

#[test]
fn test_flying_through_a_gap_scores_once() {
    let mut state = GameState::new(single_level(3, 10)).unwrap();
    start(&mut state);
    state.world.obstacles[0].x = 150.0;

    for _ in 0..60 {
        hold_in_gap(&mut state);
        tick(&mut state, &TickInput::default());
    }

    assert_eq!(state.score(), 1);
    assert_eq!(state.world.character.life.lives(), 3);
    assert_eq!(state.phase, GamePhase::Playing);
    let passed = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
        .count();
    assert_eq!(passed, 1);
}

#[test]
fn test_last_life_lost_ends_game() {
    let mut state = GameState::new(single_level(1, 10)).unwrap();
    start(&mut state);

    state.world.character.take_damage(1);
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver { won: false });
    assert!(state.drain_events().contains(&GameEvent::GameOver {
        won: false,
        score: 0
    }));

    let mut frame = FrameCapture::default();
    state.draw(&mut frame);
    assert_eq!(frame.texts(), vec!["GAME OVER", "FINAL SCORE: 0"]);
}

#[test]
fn test_timescale_three_moves_obstacles_faster() {
    let mut state = GameState::new(single_level(3, 10)).unwrap();
    state.world.timescale.speed_up();
    state.world.timescale.speed_up();
    start(&mut state);

    let obstacle = &state.world.obstacles[0];
    assert_eq!(obstacle.x, SCREEN_WIDTH);
    assert_eq!(obstacle.velocity(), 2.25 * OBSTACLE_BASE_VELOCITY);

    tick(&mut state, &TickInput::default());
    assert_eq!(state.world.obstacles[0].x, SCREEN_WIDTH - 6.75);
}

#[test]
fn test_target_reached_on_passing_frame() {
    let mut state = GameState::new(single_level(3, 10)).unwrap();
    start(&mut state);
    state.level = state.level.clone().with_score(9);
    state.world.obstacles[0].x = 136.0;
    hold_in_gap(&mut state);

    tick(&mut state, &TickInput::default());
    assert_eq!(state.score(), 10);
    assert_eq!(state.phase, GamePhase::LevelComplete);
}

#[test]
fn test_full_run_to_victory() {
    let mut state = GameState::new(Settings {
        seed: Some(7),
        ..Default::default()
    })
    .unwrap();

    // Level 0: one pass short of the target
    start(&mut state);
    state.level = state.level.clone().with_score(9);
    state.world.obstacles[0].gap_start = 100.0;
    state.world.obstacles[0].x = 136.0;
    hold_in_gap(&mut state);
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::LevelComplete);

    for _ in 0..TRANSITION_FRAMES {
        let mut frame = FrameCapture::default();
        tick(&mut state, &TickInput::default());
        state.draw(&mut frame);
        if state.phase != GamePhase::Playing {
            assert_eq!(frame.texts(), vec!["LEVEL-UP!"]);
        }
    }

    // Level 1: fresh world
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.level.index(), 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.world.character.life.lives(), 6);
    assert!(state.world.obstacles.is_empty());

    tick(&mut state, &TickInput::default());
    state.level = state.level.clone().with_score(29);
    state.world.obstacles[0].kind = ObstacleKind::Plain;
    state.world.obstacles[0].gap_start = 100.0;
    state.world.obstacles[0].x = 136.0;
    hold_in_gap(&mut state);
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::LevelComplete);

    for _ in 0..TRANSITION_FRAMES {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::GameOver { won: true });
    assert_eq!(state.score(), 30);

    let mut frame = FrameCapture::default();
    state.draw(&mut frame);
    assert_eq!(frame.texts(), vec!["CONGRATULATIONS!"]);
}

#[test]
fn test_no_input_falls_to_game_over() {
    let mut state = GameState::new(single_level(3, 10)).unwrap();
    start(&mut state);

    for _ in 0..5_000 {
        if state.is_over() {
            break;
        }
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::GameOver { won: false });
    assert_eq!(state.world.character.life.lives(), 0);
}

#[test]
fn test_quit_requests_exit_in_any_phase() {
    let quit = TickInput {
        quit: true,
        ..Default::default()
    };

    let mut state = GameState::new(single_level(3, 10)).unwrap();
    assert_eq!(tick(&mut state, &quit), Flow::Exit);

    start(&mut state);
    assert_eq!(tick(&mut state, &quit), Flow::Exit);

    state.phase = GamePhase::GameOver { won: false };
    assert_eq!(tick(&mut state, &quit), Flow::Exit);
}

#[test]
fn test_settings_file_drives_the_game() {
    let json = r#"{
        "seed": 5,
        "transition_frames": 3,
        "levels": [
            { "start_lives": 2, "target_score": 1,
              "gaps": { "type": "choices", "starts": [100] },
              "obstacles": { "type": "plain_only" }, "items": false }
        ]
    }"#;
    let settings = Settings::from_json(json).unwrap();
    let mut state = GameState::new(settings).unwrap();
    start(&mut state);
    assert_eq!(state.world.character.life.lives(), 2);

    state.world.obstacles[0].x = 136.0;
    hold_in_gap(&mut state);
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::LevelComplete);

    for _ in 0..3 {
        tick(&mut state, &TickInput::default());
    }
    assert!(state.is_won());
}
