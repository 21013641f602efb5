//! Shot session bookkeeping
//!
//! Attempt/make counters, cumulative score, the shot power dial and the
//! transient banner message shown by the presenter.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_POWER, MIN_POWER, POINTS_PER_BASKET};

/// A banner message with a frame countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// Frames left on screen
    pub frames_left: u32,
}

/// Cumulative session state for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotSession {
    pub attempts: u32,
    pub made: u32,
    pub score: u32,
    /// Shot power in percent, always within [0, 100]
    shot_power: f32,
    message: Option<Message>,
}

impl ShotSession {
    /// Fresh session with the given starting power
    pub fn new(power: f32) -> Self {
        let mut session = Self {
            attempts: 0,
            made: 0,
            score: 0,
            shot_power: MIN_POWER,
            message: None,
        };
        session.set_power(power);
        session
    }

    pub fn shot_power(&self) -> f32 {
        self.shot_power
    }

    /// Set power, clamped to [0, 100]. Non-finite values are ignored.
    pub fn set_power(&mut self, power: f32) {
        if power.is_finite() {
            self.shot_power = power.clamp(MIN_POWER, MAX_POWER);
        }
    }

    /// Nudge power by `delta`, clamped to [0, 100]
    pub fn adjust_power(&mut self, delta: f32) {
        self.set_power(self.shot_power + delta);
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_make(&mut self) {
        self.made += 1;
        self.score += POINTS_PER_BASKET;
    }

    /// Zero attempts, makes and score
    pub fn reset_counters(&mut self) {
        self.attempts = 0;
        self.made = 0;
        self.score = 0;
    }

    /// Made / attempts as a percentage (0 with no attempts)
    pub fn accuracy(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32 * 100.0
        }
    }

    /// Accuracy formatted with one decimal ("0.0" with no attempts)
    pub fn accuracy_label(&self) -> String {
        format!("{:.1}", self.accuracy())
    }

    /// Show a message for `frames` frames, replacing any current one
    pub fn set_message(&mut self, text: impl Into<String>, frames: u32) {
        self.message = Some(Message {
            text: text.into(),
            frames_left: frames,
        });
    }

    /// The active message, if it still has frames left
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref().filter(|m| m.frames_left > 0)
    }

    /// Count the active message down by one frame
    pub fn tick_message(&mut self) {
        if let Some(message) = &mut self.message {
            message.frames_left = message.frames_left.saturating_sub(1);
            if message.frames_left == 0 {
                self.message = None;
            }
        }
    }

    /// One-line scoreboard for simple presenters
    pub fn scoreboard_text(&self) -> String {
        format!(
            "SCORE {}  |  {}/{} made  |  {}%  |  POWER {:.0}%",
            self.score,
            self.made,
            self.attempts,
            self.accuracy_label(),
            self.shot_power
        )
    }
}
