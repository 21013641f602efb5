//! Physics tuning
//!
//! Every coefficient the simulation reads lives here so a presenter can ship a
//! JSON file that overrides a handful of them. Missing fields fall back to the
//! defaults below.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable physics coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Flight ===
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Per-frame velocity multiplier (frame-rate dependent)
    pub friction: f32,
    /// Hard cap on ball speed
    pub max_speed: f32,

    // === Ground ===
    /// Fraction of vertical speed kept after a floor bounce
    pub bounce_damping: f32,
    /// Ball stops when |vy| and |v| drop below these
    pub stop_velocity_y: f32,
    pub stop_velocity_total: f32,
    /// Horizontal jitter per unit of impact speed
    pub ground_jitter: f32,

    // === Rim ===
    pub rim_bounce_damping: f32,
    pub rim_friction: f32,
    /// Contact band around the rim tube (height, radial)
    pub rim_contact_height: f32,
    pub rim_contact_width: f32,
    pub rim_jitter: f32,

    // === Backboard ===
    pub backboard_bounce_damping: f32,
    pub backboard_friction: f32,
    pub backboard_jitter: f32,

    // === Net ===
    /// Per-frame velocity multiplier inside the net funnel
    pub net_slowdown: f32,
    /// Speed floor inside the net so the ball never hangs
    pub net_min_speed: f32,
    /// Seconds the net keeps acting on a made shot
    pub net_passage_duration: f32,

    // === Shooting ===
    /// Launch speed at 100% power
    pub shot_base_velocity: f32,
    /// Maximum aim perturbation (radians) for long shots
    pub aim_noise: f32,
    /// Distance at which aim perturbation reaches half of `aim_noise`
    pub aim_noise_falloff: f32,
    /// Extra height above the rim the planner aims the apex at
    pub apex_clearance: f32,
    /// Power restored by a ball reset
    pub default_power: f32,

    // === Timers ===
    /// Seconds before an out-of-bounds ball returns to center
    pub auto_reset_delay: f32,

    // === Hoop reactions (cosmetic) ===
    pub rim_bump_amplitude: f32,
    pub rim_bump_duration: f32,
    pub net_sway_amplitude: f32,
    pub net_sway_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            friction: 0.98,
            max_speed: 60.0,

            bounce_damping: 0.7,
            stop_velocity_y: 0.5,
            stop_velocity_total: 1.0,
            ground_jitter: 0.05,

            rim_bounce_damping: 0.6,
            rim_friction: 0.8,
            rim_contact_height: 0.2,
            rim_contact_width: 0.15,
            rim_jitter: 0.5,

            backboard_bounce_damping: 0.6,
            backboard_friction: 0.85,
            backboard_jitter: 0.3,

            net_slowdown: 0.92,
            net_min_speed: 1.0,
            net_passage_duration: 0.6,

            shot_base_velocity: 25.0,
            aim_noise: 0.05,
            aim_noise_falloff: 8.0,
            apex_clearance: 0.3,
            default_power: 50.0,

            auto_reset_delay: 1.5,

            rim_bump_amplitude: 0.06,
            rim_bump_duration: 0.3,
            net_sway_amplitude: 0.12,
            net_sway_duration: 1.2,
        }
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning json: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let tuning = std::fs::read_to_string(path)
            .map_err(TuningError::from)
            .and_then(|json| Self::from_json_str(&json))
            .inspect_err(|e| log::warn!("Rejected tuning file {}: {}", path.display(), e))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active values)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the simulation blow up
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("max_speed", self.max_speed),
            ("bounce_damping", self.bounce_damping),
            ("stop_velocity_y", self.stop_velocity_y),
            ("stop_velocity_total", self.stop_velocity_total),
            ("ground_jitter", self.ground_jitter),
            ("rim_bounce_damping", self.rim_bounce_damping),
            ("rim_friction", self.rim_friction),
            ("rim_contact_height", self.rim_contact_height),
            ("rim_contact_width", self.rim_contact_width),
            ("rim_jitter", self.rim_jitter),
            ("backboard_bounce_damping", self.backboard_bounce_damping),
            ("backboard_friction", self.backboard_friction),
            ("backboard_jitter", self.backboard_jitter),
            ("net_slowdown", self.net_slowdown),
            ("net_min_speed", self.net_min_speed),
            ("net_passage_duration", self.net_passage_duration),
            ("shot_base_velocity", self.shot_base_velocity),
            ("aim_noise", self.aim_noise),
            ("aim_noise_falloff", self.aim_noise_falloff),
            ("apex_clearance", self.apex_clearance),
            ("default_power", self.default_power),
            ("auto_reset_delay", self.auto_reset_delay),
            ("rim_bump_amplitude", self.rim_bump_amplitude),
            ("rim_bump_duration", self.rim_bump_duration),
            ("net_sway_amplitude", self.net_sway_amplitude),
            ("net_sway_duration", self.net_sway_duration),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, reason: "must be finite" });
            }
        }

        if self.gravity >= 0.0 {
            return Err(TuningError::Invalid { field: "gravity", reason: "must be negative" });
        }
        if self.max_speed <= 0.0 {
            return Err(TuningError::Invalid { field: "max_speed", reason: "must be positive" });
        }

        let unit_fields = [
            ("friction", self.friction),
            ("bounce_damping", self.bounce_damping),
            ("rim_bounce_damping", self.rim_bounce_damping),
            ("rim_friction", self.rim_friction),
            ("backboard_bounce_damping", self.backboard_bounce_damping),
            ("backboard_friction", self.backboard_friction),
            ("net_slowdown", self.net_slowdown),
        ];
        for (field, value) in unit_fields {
            if value <= 0.0 || value > 1.0 {
                return Err(TuningError::Invalid { field, reason: "must be in (0, 1]" });
            }
        }

        let non_negative = [
            ("stop_velocity_y", self.stop_velocity_y),
            ("stop_velocity_total", self.stop_velocity_total),
            ("ground_jitter", self.ground_jitter),
            ("rim_contact_height", self.rim_contact_height),
            ("rim_contact_width", self.rim_contact_width),
            ("rim_jitter", self.rim_jitter),
            ("backboard_jitter", self.backboard_jitter),
            ("net_min_speed", self.net_min_speed),
            ("net_passage_duration", self.net_passage_duration),
            ("shot_base_velocity", self.shot_base_velocity),
            ("aim_noise", self.aim_noise),
            ("apex_clearance", self.apex_clearance),
            ("auto_reset_delay", self.auto_reset_delay),
            ("rim_bump_duration", self.rim_bump_duration),
            ("net_sway_duration", self.net_sway_duration),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(TuningError::Invalid { field, reason: "must not be negative" });
            }
        }

        if self.aim_noise_falloff <= 0.0 {
            return Err(TuningError::Invalid { field: "aim_noise_falloff", reason: "must be positive" });
        }
        if !(crate::consts::MIN_POWER..=crate::consts::MAX_POWER).contains(&self.default_power) {
            return Err(TuningError::Invalid { field: "default_power", reason: "must be within 0..=100" });
        }

        Ok(())
    }
}
