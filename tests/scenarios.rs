//! End-to-end shooting scenarios.
//!
//! These drive the public tick API the same way a presenter would and check
//! the session bookkeeping that results.

use glam::Vec3;
use hoop_shot::consts::*;
use hoop_shot::sim::{Action, Ball, GameState, MissKind, ShotPhase, SimEvent, TickInput, tick};

fn run(state: &mut GameState, action: Option<Action>) {
    tick(state, &TickInput { action }, SIM_DT);
}

/// Tick until the ball settles, returning every event seen on the way
fn run_until_settled(state: &mut GameState, max_frames: usize) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        if !state.ball.in_flight {
            break;
        }
        run(state, None);
        events.extend_from_slice(&state.events);
    }
    events
}

fn place_under_hoop(state: &mut GameState) {
    state.ball.pos = Vec3::new(HOOP_X, BALL_REST_HEIGHT, 0.0);
}

#[test]
fn straight_up_shot_under_the_hoop_scores() {
    let mut state = GameState::new(11);
    place_under_hoop(&mut state);
    state.adjust_power(100.0);

    run(&mut state, Some(Action::Shoot));
    assert!(state.ball.in_flight);
    assert_eq!(state.ball.vel.x, 0.0);

    let mut apex = state.ball.pos.y;
    let mut events = state.events.clone();
    for _ in 0..1200 {
        if !state.ball.in_flight {
            break;
        }
        run(&mut state, None);
        apex = apex.max(state.ball.pos.y);
        events.extend_from_slice(&state.events);
    }

    assert!(apex >= RIM_HEIGHT, "apex {apex}");
    assert!(events.contains(&SimEvent::Scored { hoop: 1 }));
    assert_eq!(state.session.made, 1);
    assert_eq!(state.session.score, POINTS_PER_BASKET);
    assert_eq!(state.shot.phase, ShotPhase::Scored);
    assert!(!state.ball.in_flight);
}

#[test]
fn descending_through_the_opening_scores_once() {
    let mut state = GameState::new(5);
    run(&mut state, Some(Action::Shoot));
    state.ball.pos = Vec3::new(HOOP_X + 0.3 * RIM_RADIUS, RIM_HEIGHT, 0.0);
    state.ball.vel = Vec3::new(0.0, -3.0, 0.0);

    state.check_for_score();
    assert_eq!(state.session.made, 1);
    assert_eq!(state.session.score, 2);
    assert_eq!(state.shot.phase, ShotPhase::Scored);

    // Still inside the window next frame: no second make
    state.ball.pos.y -= 0.05;
    state.check_for_score();
    assert_eq!(state.session.made, 1);
    assert_eq!(state.session.score, 2);
}

#[test]
fn reset_game_after_scoring_clears_the_session() {
    let mut state = GameState::new(21);
    for _ in 0..3 {
        place_under_hoop(&mut state);
        run(&mut state, Some(Action::Shoot));
        run_until_settled(&mut state, 1200);
    }
    assert_eq!(state.session.attempts, 3);
    assert!(state.session.score > 0);

    run(&mut state, Some(Action::ResetGame));
    assert_eq!(state.session.score, 0);
    assert_eq!(state.session.attempts, 0);
    assert_eq!(state.session.made, 0);
    assert_eq!(state.session.accuracy_label(), "0.0");
    assert_eq!(state.ball.pos, Ball::center_rest_position());
    assert!(!state.ball.in_flight);
    assert_eq!(state.shot.phase, ShotPhase::Resting);
}

#[test]
fn out_of_bounds_ball_returns_after_delay() {
    let mut state = GameState::new(3);
    run(&mut state, Some(Action::Shoot));
    state.ball.pos = Vec3::new(COURT_HALF_LENGTH + OUT_OF_BOUNDS_BUFFER - 0.05, 3.0, 0.0);
    state.ball.vel = Vec3::new(6.0, 0.0, 0.0);

    run(&mut state, None);
    assert!(state.ball.out_of_bounds);
    assert!(!state.ball.in_flight);
    assert_eq!(state.shot.phase, ShotPhase::Missed(MissKind::OutOfBounds));
    let frozen_at = state.ball.pos;

    // One second in: still waiting
    for _ in 0..60 {
        run(&mut state, None);
    }
    assert_eq!(state.ball.pos, frozen_at);
    assert!(state.pending_reset.is_some());

    let mut auto_reset = false;
    for _ in 0..40 {
        run(&mut state, None);
        auto_reset |= state.events.contains(&SimEvent::AutoReset);
    }
    assert!(auto_reset);
    assert_eq!(state.ball.pos, Ball::center_rest_position());
    assert!(!state.ball.out_of_bounds);
    assert!(state.pending_reset.is_none());
    // Counters survive the automatic reset
    assert_eq!(state.session.attempts, 1);
}

#[test]
fn manual_reset_cancels_pending_auto_reset() {
    let mut state = GameState::new(3);
    run(&mut state, Some(Action::Shoot));
    state.ball.pos = Vec3::new(0.0, 4.0, COURT_HALF_WIDTH + OUT_OF_BOUNDS_BUFFER + 0.5);
    run(&mut state, None);
    assert!(state.pending_reset.is_some());

    run(&mut state, Some(Action::ResetBall));
    assert!(state.pending_reset.is_none());

    for _ in 0..30 {
        run(
            &mut state,
            Some(Action::Move {
                direction: Vec3::X,
                magnitude: 1.0,
            }),
        );
    }
    let parked = state.ball.pos;
    for _ in 0..200 {
        run(&mut state, None);
        assert!(!state.events.contains(&SimEvent::AutoReset));
    }
    assert_eq!(state.ball.pos, parked);
}

#[test]
fn new_game_cancels_pending_auto_reset_and_settles_hoops() {
    let mut state = GameState::new(4);
    run(&mut state, Some(Action::Shoot));
    state.ball.pos = Vec3::new(0.0, 4.0, COURT_HALF_WIDTH + OUT_OF_BOUNDS_BUFFER + 0.5);
    run(&mut state, None);
    assert!(state.pending_reset.is_some());

    let tuning = state.tuning.clone();
    state.hoop_anims[1].react(&SimEvent::RimHit { hoop: 1 }, &tuning);
    assert!(state.hoop_anims[1].is_active());

    run(&mut state, Some(Action::ResetGame));
    assert!(state.pending_reset.is_none());
    assert!(state.events.contains(&SimEvent::GameReset));
    assert!(state.hoop_anims.iter().all(|anim| !anim.is_active()));
    assert_eq!(state.session.attempts, 0);

    let frames = (tuning.auto_reset_delay / SIM_DT) as usize + 30;
    for _ in 0..frames {
        run(&mut state, None);
        assert!(!state.events.contains(&SimEvent::AutoReset));
    }
    assert!(state.pending_reset.is_none());
    assert!(state.hoop_anims.iter().all(|anim| !anim.is_active()));
    assert_eq!(state.ball.pos, Ball::center_rest_position());
}

#[test]
fn reset_ball_is_idempotent() {
    let play = |state: &mut GameState| {
        run(state, Some(Action::AdjustPower(20.0)));
        run(state, Some(Action::Shoot));
        for _ in 0..30 {
            run(state, None);
        }
    };

    let mut once = GameState::new(77);
    let mut twice = GameState::new(77);
    play(&mut once);
    play(&mut twice);

    once.reset_ball();
    twice.reset_ball();
    twice.reset_ball();

    assert_eq!(once.snapshot(), twice.snapshot());
    assert_eq!(once.ball, twice.ball);
    assert_eq!(once.pending_reset, twice.pending_reset);
    assert_eq!(twice.session.shot_power(), 50.0);
}

#[test]
fn shooting_counts_attempts_only_from_rest() {
    let mut state = GameState::new(9);
    run(&mut state, Some(Action::Shoot));
    assert_eq!(state.session.attempts, 1);

    for _ in 0..5 {
        run(&mut state, Some(Action::Shoot));
        assert_eq!(state.session.attempts, 1);
    }

    run_until_settled(&mut state, 3000);
    while state.pending_reset.is_some() {
        run(&mut state, None);
    }
    run(&mut state, Some(Action::Shoot));
    assert_eq!(state.session.attempts, 2);
    assert!(state.session.made <= state.session.attempts);
}
