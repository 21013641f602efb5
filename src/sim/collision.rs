//! Collision detection and response
//!
//! Each resolver looks at the ball and one piece of static geometry, mutates
//! the ball's velocity/position when they touch, and reports what happened.
//! Per-shot guards and outcome bookkeeping live in `tick`, not here.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, HoopSpec};
use super::state::Ball;
use crate::consts::*;
use crate::tuning::Tuning;

/// Minimum horizontal friction factor for a floor bounce
const GROUND_FRICTION_FLOOR: f32 = 0.85;
/// Horizontal friction lost per unit of impact speed
const GROUND_FRICTION_PER_SPEED: f32 = 0.02;
/// Gap left between ball and backboard after a push-out
const BOARD_SEPARATION: f32 = 1e-3;

/// Result of a floor contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Vertical speed at impact
    pub impact_speed: f32,
    /// The bounce was too weak and the ball came to rest
    pub stopped: bool,
}

/// Which face of the backboard the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSide {
    /// Shooter's side: the ball bounces off
    Front,
    /// Behind the board: no response
    Back,
}

/// Where a descending ball crosses the rim window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RimPass {
    /// Inside the opening - a make
    Through,
    /// Between the opening and the rim
    RimBrush,
    /// Outside the rim
    Outside,
}

/// Symmetric random value in [-bound, bound]; zero for a non-positive bound
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound.is_finite() && bound > 0.0 {
        rng.random_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Bounce the ball off the court surface
pub fn resolve_ground<R: Rng + ?Sized>(ball: &mut Ball, tuning: &Tuning, rng: &mut R) -> Option<GroundContact> {
    if ball.pos.y > BALL_REST_HEIGHT {
        return None;
    }
    // Already leaving the floor (e.g. the frame a shot is launched)
    if ball.vel.y > 0.0 {
        ball.pos.y = BALL_REST_HEIGHT;
        return None;
    }

    let impact_speed = ball.vel.y.abs();
    ball.pos.y = BALL_REST_HEIGHT;
    ball.vel.y = -ball.vel.y * tuning.bounce_damping;

    // Harder impacts scrub more horizontal speed
    let friction = (1.0 - impact_speed * GROUND_FRICTION_PER_SPEED).max(GROUND_FRICTION_FLOOR);
    ball.vel.x *= friction;
    ball.vel.z *= friction;

    let spread = impact_speed * tuning.ground_jitter;
    ball.vel.x += jitter(rng, spread);
    ball.vel.z += jitter(rng, spread);

    let stopped = ball.vel.y.abs() < tuning.stop_velocity_y && ball.vel.length() < tuning.stop_velocity_total;
    if stopped {
        ball.freeze();
    }

    Some(GroundContact { impact_speed, stopped })
}

/// Whether the ball is touching the rim tube
pub fn rim_contact(pos: Vec3, hoop: &HoopSpec, tuning: &Tuning) -> bool {
    let dist = hoop.horizontal_distance(pos);
    (pos.y - hoop.rim_y).abs() < tuning.rim_contact_height && (dist - hoop.rim_radius).abs() < tuning.rim_contact_width
}

/// Bounce the ball off the rim. Returns true on contact.
pub fn resolve_rim<R: Rng + ?Sized>(ball: &mut Ball, hoop: &HoopSpec, tuning: &Tuning, rng: &mut R) -> bool {
    if !rim_contact(ball.pos, hoop, tuning) {
        return false;
    }

    ball.vel.y *= -tuning.rim_bounce_damping;
    ball.vel.x = ball.vel.x * tuning.rim_friction + jitter(rng, tuning.rim_jitter);
    ball.vel.z = ball.vel.z * tuning.rim_friction + jitter(rng, tuning.rim_jitter);
    true
}

/// Bounce the ball off the front face of the backboard.
///
/// Contact from behind is reported but leaves the ball alone.
pub fn resolve_backboard<R: Rng + ?Sized>(
    ball: &mut Ball,
    hoop: &HoopSpec,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<BoardSide> {
    let board = hoop.backboard();
    if !Aabb::around_sphere(ball.pos, ball.radius()).overlaps(&board) {
        return None;
    }

    let in_front = (ball.pos.x - board.center().x) * hoop.facing < 0.0;
    if !in_front {
        return Some(BoardSide::Back);
    }

    // Only flip x if still heading into the board
    if ball.vel.x * hoop.facing > 0.0 {
        ball.vel.x = -ball.vel.x * tuning.backboard_bounce_damping;
    }
    ball.vel.y = ball.vel.y * tuning.backboard_friction + jitter(rng, tuning.backboard_jitter);
    ball.vel.z = ball.vel.z * tuning.backboard_friction + jitter(rng, tuning.backboard_jitter);

    // Push out of the board so it cannot stick inside
    ball.pos.x = hoop.backboard_front_x() - hoop.facing * (ball.radius() + BOARD_SEPARATION);

    Some(BoardSide::Front)
}

/// Outside the court (plus buffer) or above the ceiling
pub fn is_out_of_bounds(pos: Vec3) -> bool {
    pos.x.abs() > COURT_HALF_LENGTH + OUT_OF_BOUNDS_BUFFER
        || pos.z.abs() > COURT_HALF_WIDTH + OUT_OF_BOUNDS_BUFFER
        || pos.y > OUT_OF_BOUNDS_CEILING
}

/// Classify a ball coming down near rim height. `None` if it is rising or
/// outside the vertical window.
pub fn classify_rim_pass(pos: Vec3, vel: Vec3, hoop: &HoopSpec) -> Option<RimPass> {
    if vel.y >= 0.0 || (pos.y - hoop.rim_y).abs() >= SCORE_WINDOW {
        return None;
    }
    let dist = hoop.horizontal_distance(pos);
    Some(if dist < hoop.opening_radius() {
        RimPass::Through
    } else if dist < hoop.rim_radius {
        RimPass::RimBrush
    } else {
        RimPass::Outside
    })
}
