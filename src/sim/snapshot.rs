//! Read-only view of the game for presenters

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::state::{GameState, ShotPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub in_flight: bool,
    pub out_of_bounds: bool,
}

/// Rim and net pose for one hoop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoopPose {
    pub rim_center: Vec3,
    /// Vertical rim displacement from the bump animation
    pub rim_offset: f32,
    pub net_sway: f32,
    /// Radial displacement per net segment
    pub net_offsets: Vec<Vec3>,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub ball: BallPose,
    pub hoops: Vec<HoopPose>,
    pub shot_power: f32,
    pub score: u32,
    pub attempts: u32,
    pub made: u32,
    /// Accuracy percentage with one decimal
    pub accuracy: String,
    pub phase: ShotPhase,
    pub message: Option<String>,
    pub message_frames: u32,
    pub scoreboard: String,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let hoops = self
            .hoops
            .iter()
            .zip(&self.hoop_anims)
            .map(|(hoop, anim)| HoopPose {
                rim_center: hoop.rim_center(),
                rim_offset: anim.rim_offset,
                net_sway: anim.net_sway,
                net_offsets: anim.net_segment_offsets(hoop).to_vec(),
            })
            .collect();

        let message = self.session.message();
        Snapshot {
            tick: self.time_ticks,
            ball: BallPose {
                position: self.ball.pos,
                orientation: self.ball.orientation,
                velocity: self.ball.vel,
                in_flight: self.ball.in_flight,
                out_of_bounds: self.ball.out_of_bounds,
            },
            hoops,
            shot_power: self.session.shot_power(),
            score: self.session.score,
            attempts: self.session.attempts,
            made: self.session.made,
            accuracy: self.session.accuracy_label(),
            phase: self.shot.phase,
            message: message.map(|m| m.text.clone()),
            message_frames: message.map_or(0, |m| m.frames_left),
            scoreboard: self.session.scoreboard_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_REST_HEIGHT, NET_SEGMENTS};

    #[test]
    fn test_fresh_snapshot() {
        let snap = GameState::new(8).snapshot();
        assert_eq!(snap.ball.position, Vec3::new(0.0, BALL_REST_HEIGHT, 0.0));
        assert_eq!(snap.hoops.len(), 2);
        assert!(snap.hoops.iter().all(|h| h.net_offsets.len() == NET_SEGMENTS));
        assert_eq!(snap.shot_power, 50.0);
        assert_eq!(snap.accuracy, "0.0");
        assert_eq!(snap.message, None);
        assert_eq!(snap.phase, ShotPhase::Resting);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(8);
        state.shoot();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.attempts, 1);
        assert_eq!(back.message.as_deref(), Some("SHOT TAKEN!"));
        assert_eq!(back.phase, ShotPhase::Flying);
    }
}
