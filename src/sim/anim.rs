//! Hoop reaction animator
//!
//! Rim bumps and net sway triggered by rim hits and made shots. Purely
//! cosmetic: the physics never reads these offsets.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::HoopSpec;
use super::state::SimEvent;
use crate::consts::NET_SEGMENTS;
use crate::tuning::Tuning;

/// A single armed, decaying effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub amplitude: f32,
    pub duration: f32,
    pub remaining: f32,
}

impl Pulse {
    fn new(amplitude: f32, duration: f32) -> Option<Self> {
        (duration > 0.0).then_some(Self {
            amplitude,
            duration,
            remaining: duration,
        })
    }

    /// 0 when armed, 1 when finished
    #[inline]
    pub fn progress(&self) -> f32 {
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

/// Transient animation state for one hoop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoopAnim {
    rim: Option<Pulse>,
    net: Option<Pulse>,
    /// Current vertical rim displacement (negative = pushed down)
    pub rim_offset: f32,
    /// Current net sway amplitude
    pub net_sway: f32,
}

impl HoopAnim {
    /// Arm effects for a rim hit or a make
    pub fn react(&mut self, event: &SimEvent, tuning: &Tuning) {
        match event {
            SimEvent::RimHit { .. } => {
                self.rim = Pulse::new(tuning.rim_bump_amplitude, tuning.rim_bump_duration);
                self.net = Pulse::new(tuning.net_sway_amplitude * 0.5, tuning.net_sway_duration);
            }
            SimEvent::Scored { .. } => {
                self.net = Pulse::new(tuning.net_sway_amplitude, tuning.net_sway_duration);
            }
            _ => {}
        }
    }

    /// Advance timers by `dt` seconds and recompute offsets
    pub fn update(&mut self, dt: f32) {
        self.rim_offset = 0.0;
        if let Some(rim) = &mut self.rim {
            rim.remaining -= dt;
            if rim.remaining <= 0.0 {
                self.rim = None;
            } else {
                // Single dip
                self.rim_offset = -rim.amplitude * (rim.progress() * PI).sin();
            }
        }

        self.net_sway = 0.0;
        if let Some(net) = &mut self.net {
            net.remaining -= dt;
            if net.remaining <= 0.0 {
                self.net = None;
            } else {
                // Damped swing
                let p = net.progress();
                self.net_sway = net.amplitude * (p * TAU).sin() * (-2.0 * p).exp();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.rim.is_some() || self.net.is_some()
    }

    /// Drop all effects and return to the neutral pose
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Radial offset of each net segment for the current sway
    pub fn net_segment_offsets(&self, hoop: &HoopSpec) -> [Vec3; NET_SEGMENTS] {
        let mut offsets = [Vec3::ZERO; NET_SEGMENTS];
        if self.net_sway == 0.0 {
            return offsets;
        }
        for (i, offset) in offsets.iter_mut().enumerate() {
            let (top, _) = hoop.net_segment(i);
            let radial = crate::horizontal(top - hoop.rim_center()).normalize_or_zero();
            *offset = radial * self.net_sway;
        }
        offsets
    }
}
