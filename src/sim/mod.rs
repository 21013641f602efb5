//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (aim error and bounce jitter)
//! - Fixed contact order each tick
//! - No rendering, input or platform dependencies

pub mod anim;
pub mod collision;
pub mod geometry;
pub mod physics;
pub mod shot;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use anim::{HoopAnim, Pulse};
pub use collision::{BoardSide, GroundContact, RimPass, classify_rim_pass, is_out_of_bounds};
pub use geometry::{Aabb, HoopSpec};
pub use physics::integrate;
pub use shot::{ShotPlan, launch_angle, nearest_hoop, plan_shot};
pub use snapshot::{BallPose, HoopPose, Snapshot};
pub use state::{Ball, GameState, MissKind, NetPassage, PendingReset, ShotPhase, ShotTracker, SimEvent};
pub use tick::{Action, FrameClock, TickInput, sanitize_dt, tick};
