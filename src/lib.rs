//! Hoop Shot - basketball shooting simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball flight, collisions, scoring, hoop reactions)
//! - `session`: Attempt/score bookkeeping and transient messages
//! - `tuning`: Data-driven physics coefficients
//!
//! Rendering, input polling and UI layout live outside this crate. A presenter
//! feeds [`sim::TickInput`]s into [`sim::tick`] and reads back a [`sim::Snapshot`].

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::ShotSession;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Court geometry and timing constants
pub mod consts {
    /// Nominal frame timestep (60 fps)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted by a tick (prevents tunneling after long pauses)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.25;

    /// Court slab: 30 x 15 with the playing surface at y = COURT_HEIGHT / 2
    pub const COURT_HEIGHT: f32 = 0.2;
    pub const COURT_SURFACE_Y: f32 = COURT_HEIGHT / 2.0;
    pub const COURT_HALF_LENGTH: f32 = 15.0;
    pub const COURT_HALF_WIDTH: f32 = 7.5;
    /// Center height of a ball sitting on the court
    pub const BALL_REST_HEIGHT: f32 = BALL_RADIUS + COURT_SURFACE_Y;

    /// Limits for dribbling the resting ball around
    pub const MOVE_BOUND_X: f32 = 14.0;
    pub const MOVE_BOUND_Z: f32 = 7.0;
    /// Distance units moved per unit of move magnitude
    pub const MOVE_STEP: f32 = 0.1;

    /// Out-of-bounds: court half extents plus this buffer, or above the ceiling
    pub const OUT_OF_BOUNDS_BUFFER: f32 = 2.0;
    pub const OUT_OF_BOUNDS_CEILING: f32 = 30.0;

    /// Hoops sit on the long axis at x = +/-HOOP_X
    pub const HOOP_X: f32 = 15.0;
    pub const RIM_HEIGHT: f32 = 10.0;
    pub const RIM_RADIUS: f32 = 0.45;
    /// Inner fraction of the rim that counts as a clean make
    pub const RIM_OPENING_FRACTION: f32 = 0.7;
    /// Vertical window around the rim in which makes/misses are evaluated
    pub const SCORE_WINDOW: f32 = 0.5;
    pub const POINTS_PER_BASKET: u32 = 2;

    /// Net hangs NET_HEIGHT below the rim and tapers to NET_TAPER of the rim radius
    pub const NET_HEIGHT: f32 = 2.0;
    pub const NET_TAPER: f32 = 0.7;
    pub const NET_SEGMENTS: usize = 16;
    /// Horizontal funnel radius (fraction of rim radius) in which the net slows the ball
    pub const NET_FUNNEL_FRACTION: f32 = 0.8;

    /// Backboard box (depth along the approach axis, height, width)
    pub const BACKBOARD_OFFSET: f32 = 0.6;
    pub const BACKBOARD_DEPTH: f32 = 0.1;
    pub const BACKBOARD_HEIGHT: f32 = 1.2;
    pub const BACKBOARD_WIDTH: f32 = 2.1;
    pub const BACKBOARD_CENTER_Y: f32 = RIM_HEIGHT + 0.5;

    /// Shot power range
    pub const MIN_POWER: f32 = 0.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Message display durations (frames)
    pub const MESSAGE_DISPLAY_FRAMES: u32 = 120;
    pub const SHOT_MESSAGE_FRAMES: u32 = 60;
    pub const RESET_MESSAGE_FRAMES: u32 = 60;
}

/// Project a vector onto the court plane (y = 0)
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a - b).length()
}
