//! Per-frame simulation tick
//!
//! Fixed order each frame: message countdown, discrete action, delayed reset
//! timer, flight integration, contacts (ground, rim, backboard),
//! out-of-bounds, scoring, hoop animations.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{
    BoardSide, RimPass, classify_rim_pass, is_out_of_bounds, resolve_backboard, resolve_ground, resolve_rim,
};
use super::physics::integrate;
use super::shot::nearest_hoop;
use super::state::{GameState, MissKind, NetPassage, PendingReset, ShotPhase, SimEvent};
use crate::consts::*;

/// Discrete control event for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Shoot,
    ResetBall,
    ResetGame,
    /// Slide the resting ball along `direction` (y ignored)
    Move { direction: Vec3, magnitude: f32 },
    /// Change shot power by this many percent
    AdjustPower(f32),
}

impl Action {
    /// Map a DOM-style key code to an action (arrows move, W/S power,
    /// Space shoots, R resets the ball, N starts a new game)
    pub fn from_key(code: &str) -> Option<Action> {
        let step = |x: f32, z: f32| Action::Move {
            direction: Vec3::new(x, 0.0, z),
            magnitude: 1.0,
        };
        match code {
            "ArrowLeft" => Some(step(-1.0, 0.0)),
            "ArrowRight" => Some(step(1.0, 0.0)),
            "ArrowUp" => Some(step(0.0, -1.0)),
            "ArrowDown" => Some(step(0.0, 1.0)),
            "KeyW" => Some(Action::AdjustPower(1.0)),
            "KeyS" => Some(Action::AdjustPower(-1.0)),
            "Space" => Some(Action::Shoot),
            "KeyR" => Some(Action::ResetBall),
            "KeyN" => Some(Action::ResetGame),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub action: Option<Action>,
}

impl TickInput {
    pub fn new(action: Action) -> Self {
        Self { action: Some(action) }
    }
}

/// Turns presentation timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first frame (no previous
    /// timestamp) reports the nominal `SIM_DT`; later frames are capped.
    pub fn delta(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) => sanitize_dt((now_secs - last) as f32),
            None => SIM_DT,
        };
        if now_secs.is_finite() {
            self.last = Some(now_secs);
        }
        dt
    }
}

/// Clamp a frame delta to [0, MAX_FRAME_DT]; garbage becomes 0
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt.min(MAX_FRAME_DT) } else { 0.0 }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);
    state.events.clear();
    state.time_ticks += 1;
    // Messages posted during this frame keep their full frame count
    state.session.tick_message();

    if let Some(action) = input.action {
        state.apply_action(action);
    }

    state.update_pending_reset(dt);

    integrate(&mut state.ball, &state.hoops, &state.tuning, dt);
    state.resolve_contacts();
    state.check_out_of_bounds();
    state.check_for_score();

    for anim in &mut state.hoop_anims {
        anim.update(dt);
    }
}

impl GameState {
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::Shoot => {
                self.shoot();
            }
            Action::ResetBall => self.reset_ball(),
            Action::ResetGame => self.reset_game(),
            Action::Move { direction, magnitude } => self.move_ball(direction, magnitude),
            Action::AdjustPower(delta) => self.adjust_power(delta),
        }
    }

    /// Ground, rim and backboard responses for a flying ball
    pub fn resolve_contacts(&mut self) {
        if !self.ball.in_flight {
            return;
        }

        if let Some(contact) = resolve_ground(&mut self.ball, &self.tuning, &mut self.rng) {
            self.emit(SimEvent::GroundBounce {
                impact_speed: contact.impact_speed,
            });
            if contact.stopped {
                log::debug!("Ball stopped at {:?}", self.ball.pos);
                self.emit(SimEvent::BallStopped);
                if !self.ball.out_of_bounds {
                    self.resolve_shot(ShotPhase::Missed(MissKind::Stopped));
                }
                return;
            }
        }

        if !self.shot.rim_hit {
            for i in 0..self.hoops.len() {
                if resolve_rim(&mut self.ball, &self.hoops[i], &self.tuning, &mut self.rng) {
                    log::debug!("Rim hit on hoop {} at {:?}", i, self.ball.pos);
                    self.shot.rim_hit = true;
                    self.emit(SimEvent::RimHit { hoop: i });
                    break;
                }
            }
        }

        for i in 0..self.hoops.len() {
            match resolve_backboard(&mut self.ball, &self.hoops[i], &self.tuning, &mut self.rng) {
                Some(BoardSide::Front) => {
                    log::debug!("Backboard hit on hoop {} at {:?}", i, self.ball.pos);
                    self.emit(SimEvent::BackboardHit { hoop: i });
                }
                Some(BoardSide::Back) => log::trace!("Ball behind backboard {}", i),
                None => {}
            }
        }
    }

    /// Freeze a ball that left the court and schedule its return
    pub fn check_out_of_bounds(&mut self) {
        if !self.ball.in_flight || self.ball.out_of_bounds || !is_out_of_bounds(self.ball.pos) {
            return;
        }
        log::info!("Ball out of bounds at {:?}", self.ball.pos);
        self.ball.freeze();
        self.ball.out_of_bounds = true;
        self.emit(SimEvent::OutOfBounds);
        self.resolve_shot(ShotPhase::Missed(MissKind::OutOfBounds));
        self.pending_reset = Some(PendingReset {
            shot_id: self.shot.id,
            remaining: self.tuning.auto_reset_delay,
        });
    }

    /// Decide make or miss as the ball comes down past the nearest rim
    pub fn check_for_score(&mut self) {
        if !self.ball.in_flight || self.shot.phase != ShotPhase::Flying {
            return;
        }
        let Some(index) = nearest_hoop(self.ball.pos, &self.hoops) else {
            return;
        };
        let hoop = self.hoops[index];

        match classify_rim_pass(self.ball.pos, self.ball.vel, &hoop) {
            Some(RimPass::Through) => {
                if self.resolve_shot(ShotPhase::Scored) {
                    self.ball.net_passage = Some(NetPassage {
                        hoop: index,
                        elapsed: 0.0,
                    });
                    self.emit(SimEvent::Scored { hoop: index });
                }
            }
            // Misses are only final once the ball has dropped through the rim plane
            Some(pass) if self.ball.pos.y <= hoop.rim_y => {
                let kind = if pass == RimPass::RimBrush {
                    MissKind::RimBrush
                } else {
                    MissKind::Clean
                };
                self.resolve_shot(ShotPhase::Missed(kind));
            }
            _ => {}
        }
    }

    /// Count down the delayed reset; fire it only for the shot that scheduled it
    pub fn update_pending_reset(&mut self, dt: f32) {
        let Some(mut pending) = self.pending_reset else {
            return;
        };
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            self.pending_reset = Some(pending);
            return;
        }

        self.pending_reset = None;
        if pending.shot_id != self.shot.id {
            log::debug!("Dropping stale reset for shot {} (current {})", pending.shot_id, self.shot.id);
            return;
        }
        self.put_ball_at_center();
        self.session.set_message("Ball reset to center", RESET_MESSAGE_FRAMES);
        self.emit(SimEvent::AutoReset);
        log::info!("Ball returned to center after out of bounds");
    }
}
