//! Ball flight integration
//!
//! Semi-implicit Euler with a per-frame drag multiplier. The drag is applied
//! once per call regardless of `dt`, so flight paths depend on frame rate.

use glam::Vec3;

use super::geometry::HoopSpec;
use super::state::Ball;
use crate::tuning::Tuning;

/// Spin rate per unit of speed (rad/s per m/s)
const SPIN_PER_SPEED: f32 = 3.0;
/// Below this spin rate the ball is not rotated
const MIN_SPIN_RATE: f32 = 0.1;

/// Advance a flying ball by `dt`. No-op while the ball rests.
pub fn integrate(ball: &mut Ball, hoops: &[HoopSpec], tuning: &Tuning, dt: f32) {
    if !ball.in_flight {
        return;
    }

    ball.vel.y += tuning.gravity * dt;
    ball.vel *= tuning.friction;

    apply_net_drag(ball, hoops, tuning, dt);

    ball.vel = ball.vel.clamp_length_max(tuning.max_speed);
    ball.pos += ball.vel * dt;

    apply_spin(ball, dt);
    sanitize(ball);
}

/// Slow a made shot while it falls through the net
fn apply_net_drag(ball: &mut Ball, hoops: &[HoopSpec], tuning: &Tuning, dt: f32) {
    let Some(mut passage) = ball.net_passage else {
        return;
    };
    passage.elapsed += dt;

    if passage.elapsed >= tuning.net_passage_duration {
        ball.net_passage = None;
        return;
    }
    ball.net_passage = Some(passage);

    let Some(hoop) = hoops.get(passage.hoop) else {
        return;
    };
    if !hoop.in_net_funnel(ball.pos) {
        return;
    }

    ball.vel *= tuning.net_slowdown;
    let speed = ball.vel.length();
    if speed < tuning.net_min_speed {
        // Keep the ball moving; straight down if it had stalled completely
        let dir = if speed > f32::EPSILON { ball.vel / speed } else { Vec3::NEG_Y };
        ball.vel = dir * tuning.net_min_speed;
    }
}

/// Roll the ball about the axis perpendicular to its travel
fn apply_spin(ball: &mut Ball, dt: f32) {
    let speed = ball.vel.length();
    let rate = speed * SPIN_PER_SPEED;
    if rate <= MIN_SPIN_RATE {
        return;
    }
    let dir = ball.vel / speed;
    let axis = if dir.y.abs() < 0.9 {
        Vec3::new(-dir.z, 0.0, dir.x)
    } else {
        Vec3::X
    };
    ball.spin(axis, rate * dt);
}

/// Recover from non-finite values instead of propagating NaN
fn sanitize(ball: &mut Ball) {
    if !ball.vel.is_finite() {
        log::warn!("Non-finite ball velocity {:?}, stopping ball", ball.vel);
        ball.vel = Vec3::ZERO;
    }
    if !ball.pos.is_finite() {
        log::warn!("Non-finite ball position {:?}, returning to center", ball.pos);
        ball.pos = Ball::center_rest_position();
        ball.freeze();
    }
    if !ball.orientation.is_finite() {
        ball.orientation = glam::Quat::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::NetPassage;

    fn flying(pos: Vec3, vel: Vec3) -> Ball {
        Ball {
            pos,
            vel,
            in_flight: true,
            ..Ball::at_center()
        }
    }

    #[test]
    fn test_resting_ball_untouched() {
        let tuning = Tuning::default();
        let mut ball = Ball::at_center();
        integrate(&mut ball, &HoopSpec::standard_pair(), &tuning, SIM_DT);
        assert_eq!(ball, Ball::at_center());
    }

    #[test]
    fn test_gravity_then_drag() {
        let tuning = Tuning::default();
        let mut ball = flying(Vec3::new(0.0, 5.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        integrate(&mut ball, &[], &tuning, SIM_DT);
        let expected_vy = tuning.gravity * SIM_DT * tuning.friction;
        assert!((ball.vel.y - expected_vy).abs() < 1e-6);
        assert!((ball.vel.x - 2.0 * tuning.friction).abs() < 1e-6);
        assert!((ball.pos.y - (5.0 + expected_vy * SIM_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_net_slows_but_never_freezes() {
        let tuning = Tuning::default();
        let hoops = HoopSpec::standard_pair();
        let mut ball = flying(Vec3::new(15.0, 9.8, 0.0), Vec3::new(0.0, -0.2, 0.0));
        ball.net_passage = Some(NetPassage { hoop: 1, elapsed: 0.0 });

        integrate(&mut ball, &hoops, &tuning, SIM_DT);
        assert!((ball.vel.length() - tuning.net_min_speed).abs() < 1e-4);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_net_passage_expires() {
        let tuning = Tuning::default();
        let hoops = HoopSpec::standard_pair();
        let mut ball = flying(Vec3::new(15.0, 9.8, 0.0), Vec3::new(0.0, -3.0, 0.0));
        ball.net_passage = Some(NetPassage { hoop: 1, elapsed: 0.0 });

        let frames = (tuning.net_passage_duration / SIM_DT) as usize + 2;
        for _ in 0..frames {
            integrate(&mut ball, &hoops, &tuning, SIM_DT);
        }
        assert!(ball.net_passage.is_none());
    }

    #[test]
    fn test_speed_clamped() {
        let tuning = Tuning::default();
        let mut ball = flying(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1000.0, 0.0, 0.0));
        integrate(&mut ball, &[], &tuning, SIM_DT);
        assert!(ball.vel.length() <= tuning.max_speed + 1e-3);
    }

    #[test]
    fn test_nan_velocity_recovered() {
        let tuning = Tuning::default();
        let mut ball = flying(Vec3::new(0.0, 5.0, 0.0), Vec3::new(f32::NAN, 0.0, 0.0));
        integrate(&mut ball, &[], &tuning, SIM_DT);
        assert!(ball.vel.is_finite());
        assert!(ball.pos.is_finite());
    }

    #[test]
    fn test_spin_stays_normalized() {
        let tuning = Tuning::default();
        let mut ball = flying(Vec3::new(0.0, 5.0, 0.0), Vec3::new(4.0, 8.0, 1.0));
        for _ in 0..60 {
            integrate(&mut ball, &[], &tuning, SIM_DT);
        }
        assert!(ball.orientation.is_normalized());
        assert_ne!(ball.orientation, glam::Quat::IDENTITY);
    }
}
