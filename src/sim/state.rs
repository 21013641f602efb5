//! Game state and core simulation types
//!
//! One `GameState` owns the ball, both hoops and their reaction animators, the
//! shot session and the per-shot outcome tracker. Nothing else holds game state.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::HoopAnim;
use super::geometry::HoopSpec;
use crate::consts::*;
use crate::session::ShotSession;
use crate::tuning::Tuning;

/// Made shot still travelling through the net
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetPassage {
    /// Index of the hoop the ball went through
    pub hoop: usize,
    /// Seconds since the make
    pub elapsed: f32,
}

/// The basketball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Cosmetic orientation (never feeds back into translation)
    pub orientation: Quat,
    pub in_flight: bool,
    pub out_of_bounds: bool,
    pub net_passage: Option<NetPassage>,
}

impl Default for Ball {
    fn default() -> Self {
        Self::at_center()
    }
}

impl Ball {
    /// Resting ball at center court
    pub fn at_center() -> Self {
        Self {
            pos: Self::center_rest_position(),
            vel: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            in_flight: false,
            out_of_bounds: false,
            net_passage: None,
        }
    }

    pub fn center_rest_position() -> Vec3 {
        Vec3::new(0.0, BALL_REST_HEIGHT, 0.0)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        BALL_RADIUS
    }

    /// Stop all motion where the ball is
    pub fn freeze(&mut self) {
        self.in_flight = false;
        self.vel = Vec3::ZERO;
        self.net_passage = None;
    }

    /// Spin the ball about `axis` by `angle` radians (cosmetic)
    pub fn spin(&mut self, axis: Vec3, angle: f32) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || !angle.is_finite() {
            return;
        }
        self.orientation = (Quat::from_axis_angle(axis, angle) * self.orientation).normalize();
    }
}

/// Why a shot missed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissKind {
    /// Came down through the rim ring but outside the opening
    RimBrush,
    /// Came down past the rim plane outside the ring
    Clean,
    /// Came to rest without ever reaching the rim plane
    Stopped,
    /// Left the court
    OutOfBounds,
}

impl MissKind {
    pub fn message(&self) -> &'static str {
        match self {
            MissKind::RimBrush => "MISSED SHOT - off the rim",
            MissKind::Clean => "MISSED SHOT",
            MissKind::Stopped => "MISSED SHOT",
            MissKind::OutOfBounds => "MISSED - OUT OF BOUNDS",
        }
    }
}

/// Per-shot outcome state machine
///
/// `Resting -> Flying` on a shot; `Flying -> Scored | Missed(_)` exactly once.
/// Resolved states stay put until the next shot or a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotPhase {
    /// No shot since the last reset
    #[default]
    Resting,
    /// Shot in the air, outcome not decided
    Flying,
    Scored,
    Missed(MissKind),
}

impl ShotPhase {
    /// Whether this shot already produced its outcome
    pub fn is_resolved(&self) -> bool {
        matches!(self, ShotPhase::Scored | ShotPhase::Missed(_))
    }
}

/// Book-keeping for the current shot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotTracker {
    /// Monotonic shot identity (0 = no shot yet)
    pub id: u64,
    pub phase: ShotPhase,
    /// Rim contact already happened on this shot
    pub rim_hit: bool,
    /// Hoop the shot was aimed at
    pub target_hoop: Option<usize>,
}

/// Delayed ball reset scheduled after an out-of-bounds shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingReset {
    /// Shot that scheduled the reset; stale if it no longer matches
    pub shot_id: u64,
    /// Seconds left
    pub remaining: f32,
}

/// Events emitted during a tick, for presenters and the hoop animator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    ShotTaken { shot_id: u64, hoop: usize },
    GroundBounce { impact_speed: f32 },
    RimHit { hoop: usize },
    BackboardHit { hoop: usize },
    Scored { hoop: usize },
    Missed { kind: MissKind },
    BallStopped,
    OutOfBounds,
    AutoReset,
    BallReset,
    GameReset,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub ball: Ball,
    pub hoops: [HoopSpec; 2],
    pub hoop_anims: [HoopAnim; 2],
    pub session: ShotSession,
    pub shot: ShotTracker,
    pub pending_reset: Option<PendingReset>,
    /// Events produced by the most recent tick
    pub events: Vec<SimEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let session = ShotSession::new(tuning.default_power);
        Self {
            seed,
            tuning,
            ball: Ball::at_center(),
            hoops: HoopSpec::standard_pair(),
            hoop_anims: [HoopAnim::default(), HoopAnim::default()],
            session,
            shot: ShotTracker::default(),
            pending_reset: None,
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub(crate) fn emit(&mut self, event: SimEvent) {
        self.hoop_anims_react(&event);
        self.events.push(event);
    }

    fn hoop_anims_react(&mut self, event: &SimEvent) {
        let tuning = &self.tuning;
        match *event {
            SimEvent::RimHit { hoop } | SimEvent::Scored { hoop } => {
                if let Some(anim) = self.hoop_anims.get_mut(hoop) {
                    anim.react(event, tuning);
                }
            }
            _ => {}
        }
    }

    /// Move the current shot from `Flying` to a resolved phase.
    ///
    /// Returns false (and does nothing) if the shot is not in flight or
    /// already has an outcome.
    pub(crate) fn resolve_shot(&mut self, phase: ShotPhase) -> bool {
        if self.shot.phase != ShotPhase::Flying || !phase.is_resolved() {
            return false;
        }
        self.shot.phase = phase;
        match phase {
            ShotPhase::Scored => {
                self.session.record_make();
                self.session.set_message("SHOT MADE! +2 points", MESSAGE_DISPLAY_FRAMES);
                log::info!(
                    "Shot {} scored ({}/{}, score {})",
                    self.shot.id,
                    self.session.made,
                    self.session.attempts,
                    self.session.score
                );
            }
            ShotPhase::Missed(kind) => {
                self.session.set_message(kind.message(), MESSAGE_DISPLAY_FRAMES);
                self.emit(SimEvent::Missed { kind });
                log::info!("Shot {} missed: {:?}", self.shot.id, kind);
            }
            _ => {}
        }
        true
    }

    /// Return the ball to center court and clear all per-shot state.
    /// Session counters are untouched; shot power goes back to the default.
    pub fn reset_ball(&mut self) {
        self.put_ball_at_center();
        self.session.set_power(self.tuning.default_power);
        self.session.set_message("Ball reset to center", RESET_MESSAGE_FRAMES);
        self.emit(SimEvent::BallReset);
        log::info!("Ball reset to center");
    }

    /// Reset the ball and zero the session counters
    pub fn reset_game(&mut self) {
        self.put_ball_at_center();
        self.session.set_power(self.tuning.default_power);
        self.session.reset_counters();
        for anim in &mut self.hoop_anims {
            anim.clear();
        }
        self.session.set_message("New game", RESET_MESSAGE_FRAMES);
        self.emit(SimEvent::GameReset);
        log::info!("Game reset");
    }

    pub(crate) fn put_ball_at_center(&mut self) {
        self.ball = Ball::at_center();
        self.shot.phase = ShotPhase::Resting;
        self.shot.rim_hit = false;
        self.shot.target_hoop = None;
        self.pending_reset = None;
    }

    /// Slide the resting ball along `direction` (y ignored), clamped to the court.
    /// Ignored while the ball is in flight or for a zero-length direction.
    pub fn move_ball(&mut self, direction: Vec3, speed: f32) {
        if self.ball.in_flight || !speed.is_finite() {
            return;
        }
        let dir = crate::horizontal(direction).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let step = speed * MOVE_STEP;
        let pos = self.ball.pos + dir * step;
        self.ball.pos = Vec3::new(
            pos.x.clamp(-MOVE_BOUND_X, MOVE_BOUND_X),
            BALL_REST_HEIGHT,
            pos.z.clamp(-MOVE_BOUND_Z, MOVE_BOUND_Z),
        );
        // Roll the ball the way it is being pushed
        self.ball.spin(Vec3::new(-dir.z, 0.0, dir.x), step * 2.0);
    }

    pub fn adjust_power(&mut self, delta: f32) {
        self.session.adjust_power(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_rest() {
        let state = GameState::new(1);
        assert!(!state.ball.in_flight);
        assert_eq!(state.ball.pos, Ball::center_rest_position());
        assert_eq!(state.shot.phase, ShotPhase::Resting);
        assert_eq!(state.session.shot_power(), 50.0);
    }

    #[test]
    fn test_resolve_shot_only_once() {
        let mut state = GameState::new(1);
        state.shot.phase = ShotPhase::Flying;
        assert!(state.resolve_shot(ShotPhase::Missed(MissKind::Clean)));
        assert!(!state.resolve_shot(ShotPhase::Scored));
        assert!(!state.resolve_shot(ShotPhase::Missed(MissKind::Stopped)));
        assert_eq!(state.session.made, 0);
        let misses = state
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::Missed { .. }))
            .count();
        assert_eq!(misses, 1);
    }

    #[test]
    fn test_resolve_requires_flight() {
        let mut state = GameState::new(1);
        assert!(!state.resolve_shot(ShotPhase::Scored));
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_move_ball_clamps_to_court() {
        let mut state = GameState::new(1);
        for _ in 0..500 {
            state.move_ball(Vec3::X, 1.0);
        }
        assert!((state.ball.pos.x - MOVE_BOUND_X).abs() < 1e-5);
        assert_eq!(state.ball.pos.y, BALL_REST_HEIGHT);
        for _ in 0..500 {
            state.move_ball(Vec3::new(0.0, 0.0, -1.0), 1.0);
        }
        assert!((state.ball.pos.z + MOVE_BOUND_Z).abs() < 1e-5);
    }

    #[test]
    fn test_move_ball_zero_direction_is_noop() {
        let mut state = GameState::new(1);
        state.move_ball(Vec3::ZERO, 1.0);
        state.move_ball(Vec3::Y, 1.0);
        assert_eq!(state.ball, Ball::at_center());
    }

    #[test]
    fn test_move_ball_ignored_in_flight() {
        let mut state = GameState::new(1);
        state.ball.in_flight = true;
        state.move_ball(Vec3::X, 1.0);
        assert_eq!(state.ball.pos, Ball::center_rest_position());
    }

    #[test]
    fn test_move_ball_normalizes_direction() {
        let mut state = GameState::new(1);
        state.move_ball(Vec3::new(10.0, 0.0, 0.0), 1.0);
        assert!((state.ball.pos.x - MOVE_STEP).abs() < 1e-6);
        assert!(state.ball.orientation.is_normalized());
    }
}
