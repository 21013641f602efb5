//! Shot planning
//!
//! Picks the nearest hoop and turns the power dial into a launch velocity.
//! The launch angle comes from fixed distance bands; the vertical component is
//! then raised until the ball's apex clears the rim under the same per-frame
//! gravity and drag the integrator applies.

use glam::{Quat, Vec3};
use rand::Rng;

use super::collision::jitter;
use super::geometry::HoopSpec;
use super::state::{GameState, ShotPhase, SimEvent};
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal speed cap per meter of distance (keeps short shots from overshooting)
const MAX_HORIZONTAL_SPEED_PER_METER: f32 = 3.0;
/// Below this distance the shot goes straight up
const MIN_AIM_DISTANCE: f32 = 1e-3;
/// Frame cap for apex prediction
const MAX_APEX_FRAMES: usize = 10_000;
const BISECTION_STEPS: usize = 40;

/// Launch parameters for one shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    /// Index of the target hoop
    pub hoop: usize,
    pub velocity: Vec3,
    /// Horizontal distance to the rim center at launch
    pub distance: f32,
    /// Launch angle from the distance band (radians)
    pub launch_angle: f32,
}

/// Hoop whose rim center is closest to `pos` (first one wins ties)
pub fn nearest_hoop(pos: Vec3, hoops: &[HoopSpec]) -> Option<usize> {
    hoops
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.rim_center()
                .distance(pos)
                .partial_cmp(&b.rim_center().distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Launch angle for a horizontal distance: steep up close, flatter from range
pub fn launch_angle(distance: f32) -> f32 {
    let degrees: f32 = if distance < 3.0 {
        62.0
    } else if distance < 6.0 {
        55.0
    } else if distance < 10.0 {
        50.0
    } else {
        45.0
    };
    degrees.to_radians()
}

/// Drag-free vertical speed needed to climb `height` (v = sqrt(2|g|h))
pub fn min_vertical_speed(height: f32, gravity: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    (2.0 * gravity.abs() * height).sqrt()
}

/// Height gained before the apex when launched at `vy`, stepping exactly like
/// the integrator does at a fixed `dt`
pub fn apex_gain(vy: f32, tuning: &Tuning, dt: f32) -> f32 {
    let mut vy = vy;
    let mut height = 0.0;
    for _ in 0..MAX_APEX_FRAMES {
        vy = (vy + tuning.gravity * dt) * tuning.friction;
        if vy <= 0.0 {
            break;
        }
        height += vy * dt;
    }
    height
}

/// Smallest vertical speed (up to `max_speed`) whose apex climbs `height`
pub fn required_vertical_speed(height: f32, tuning: &Tuning, dt: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let mut lo = min_vertical_speed(height, tuning.gravity).min(tuning.max_speed);
    let mut hi = tuning.max_speed;
    if apex_gain(hi, tuning, dt) < height {
        return hi;
    }
    if apex_gain(lo, tuning, dt) >= height {
        return lo;
    }
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if apex_gain(mid, tuning, dt) >= height {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Largest aim error (radians) at `distance`: zero under the rim, growing
/// toward `aim_noise` for long shots
pub fn aim_error_bound(distance: f32, tuning: &Tuning) -> f32 {
    let distance = distance.max(0.0);
    tuning.aim_noise * distance / (distance + tuning.aim_noise_falloff)
}

/// Work out the launch velocity for a ball at `pos`
pub fn plan_shot<R: Rng + ?Sized>(
    pos: Vec3,
    hoops: &[HoopSpec],
    power: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<ShotPlan> {
    let hoop_index = nearest_hoop(pos, hoops)?;
    let hoop = &hoops[hoop_index];

    let to_hoop = crate::horizontal(hoop.rim_center() - pos);
    let distance = to_hoop.length();
    let direction = if distance > MIN_AIM_DISTANCE {
        let error = jitter(rng, aim_error_bound(distance, tuning));
        Quat::from_rotation_y(error) * (to_hoop / distance)
    } else {
        Vec3::ZERO
    };

    let power = if power.is_finite() { power.clamp(MIN_POWER, MAX_POWER) } else { MIN_POWER };
    let base_speed = tuning.shot_base_velocity * power / 100.0;
    let angle = launch_angle(distance);

    let height_needed = hoop.rim_y + tuning.apex_clearance - pos.y;
    let vertical = (base_speed * angle.sin()).max(required_vertical_speed(height_needed, tuning, SIM_DT));
    let horizontal = (base_speed * angle.cos()).min(distance * MAX_HORIZONTAL_SPEED_PER_METER);

    let mut velocity = (direction * horizontal + Vec3::Y * vertical).clamp_length_max(tuning.max_speed);
    if !velocity.is_finite() {
        log::warn!("Non-finite launch velocity from {:?}, shooting straight up", pos);
        velocity = Vec3::Y * vertical.min(tuning.max_speed);
    }

    Some(ShotPlan {
        hoop: hoop_index,
        velocity,
        distance,
        launch_angle: angle,
    })
}

impl GameState {
    /// Launch the ball at the nearest hoop. Returns false while the ball is
    /// already in flight or is parked off the court waiting for its reset.
    pub fn shoot(&mut self) -> bool {
        if self.ball.in_flight || self.ball.out_of_bounds {
            return false;
        }
        let Some(plan) = plan_shot(
            self.ball.pos,
            &self.hoops,
            self.session.shot_power(),
            &self.tuning,
            &mut self.rng,
        ) else {
            return false;
        };

        self.session.record_attempt();
        self.shot.id += 1;
        self.shot.phase = ShotPhase::Flying;
        self.shot.rim_hit = false;
        self.shot.target_hoop = Some(plan.hoop);
        self.pending_reset = None;

        self.ball.vel = plan.velocity;
        self.ball.in_flight = true;
        self.ball.out_of_bounds = false;
        self.ball.net_passage = None;

        self.session.set_message("SHOT TAKEN!", SHOT_MESSAGE_FRAMES);
        self.emit(SimEvent::ShotTaken {
            shot_id: self.shot.id,
            hoop: plan.hoop,
        });
        log::info!(
            "Shot {} at hoop {}: distance {:.2}, power {:.0}%, angle {:.0} deg, velocity {:?}",
            self.shot.id,
            plan.hoop,
            plan.distance,
            self.session.shot_power(),
            plan.launch_angle.to_degrees(),
            plan.velocity
        );
        true
    }
}
