//! Static hoop geometry
//!
//! A hoop is a rim circle at a fixed height, a net funnel hanging below it and
//! a backboard box set back along the court's long axis. `facing` is +1 for
//! the hoop on the +x end (backboard further out at +x) and -1 for the other.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box around a sphere
    pub fn around_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_half_extents(center, Vec3::splat(radius))
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap test (touching faces do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Immutable description of one hoop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopSpec {
    pub center_x: f32,
    pub center_z: f32,
    pub rim_y: f32,
    pub rim_radius: f32,
    /// +1.0 or -1.0 along x; the backboard sits on this side of the rim
    pub facing: f32,
}

impl HoopSpec {
    pub fn new(center_x: f32, center_z: f32, facing: f32) -> Self {
        Self {
            center_x,
            center_z,
            rim_y: RIM_HEIGHT,
            rim_radius: RIM_RADIUS,
            facing: if facing < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// The two hoops of a standard court, -x end first
    pub fn standard_pair() -> [HoopSpec; 2] {
        [HoopSpec::new(-HOOP_X, 0.0, -1.0), HoopSpec::new(HOOP_X, 0.0, 1.0)]
    }

    /// Center of the rim circle
    #[inline]
    pub fn rim_center(&self) -> Vec3 {
        Vec3::new(self.center_x, self.rim_y, self.center_z)
    }

    /// Radius inside which a ball passing the rim plane is a make
    #[inline]
    pub fn opening_radius(&self) -> f32 {
        self.rim_radius * RIM_OPENING_FRACTION
    }

    /// Horizontal distance from `pos` to the rim center
    #[inline]
    pub fn horizontal_distance(&self, pos: Vec3) -> f32 {
        crate::horizontal_distance(pos, self.rim_center())
    }

    /// Whether `pos` is inside the net funnel below the rim
    pub fn in_net_funnel(&self, pos: Vec3) -> bool {
        self.horizontal_distance(pos) < self.rim_radius * NET_FUNNEL_FRACTION
            && pos.y <= self.rim_y
            && pos.y >= self.rim_y - NET_HEIGHT
    }

    /// Backboard box
    pub fn backboard(&self) -> Aabb {
        let center = Vec3::new(
            self.center_x + self.facing * BACKBOARD_OFFSET,
            BACKBOARD_CENTER_Y,
            self.center_z,
        );
        let half = Vec3::new(BACKBOARD_DEPTH, BACKBOARD_HEIGHT, BACKBOARD_WIDTH) * 0.5;
        Aabb::from_center_half_extents(center, half)
    }

    /// X coordinate of the backboard face that looks at the shooter
    #[inline]
    pub fn backboard_front_x(&self) -> f32 {
        self.center_x + self.facing * (BACKBOARD_OFFSET - BACKBOARD_DEPTH * 0.5)
    }

    /// Top and bottom anchor points of net segment `index`
    pub fn net_segment(&self, index: usize) -> (Vec3, Vec3) {
        let angle = index as f32 / NET_SEGMENTS as f32 * std::f32::consts::TAU;
        let radial = Vec3::new(angle.cos(), 0.0, angle.sin());
        let top = self.rim_center() + radial * self.rim_radius;
        let bottom = self.rim_center() + radial * self.rim_radius * NET_TAPER - Vec3::Y * NET_HEIGHT;
        (top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backboard_behind_rim() {
        for hoop in HoopSpec::standard_pair() {
            let board = hoop.backboard();
            // Board sits further from center court than the rim
            assert!(board.center().x.abs() > hoop.center_x.abs());
            assert!((board.center().x - hoop.center_x - hoop.facing * 0.6).abs() < 1e-5);
            assert!((hoop.backboard_front_x() - (board.center().x - hoop.facing * 0.05)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::around_sphere(Vec3::new(1.5, 0.0, 0.0), 0.75);
        let c = Aabb::around_sphere(Vec3::new(3.0, 0.0, 0.0), 0.5);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_net_funnel() {
        let hoop = HoopSpec::new(15.0, 0.0, 1.0);
        assert!(hoop.in_net_funnel(Vec3::new(15.1, 9.5, 0.0)));
        assert!(!hoop.in_net_funnel(Vec3::new(15.1, 10.5, 0.0)));
        assert!(!hoop.in_net_funnel(Vec3::new(15.5, 9.5, 0.0)));
        assert!(!hoop.in_net_funnel(Vec3::new(15.0, 7.5, 0.0)));
    }

    #[test]
    fn test_net_segments_taper() {
        let hoop = HoopSpec::new(-15.0, 0.0, -1.0);
        let (top, bottom) = hoop.net_segment(4);
        assert!((hoop.horizontal_distance(top) - RIM_RADIUS).abs() < 1e-5);
        assert!((hoop.horizontal_distance(bottom) - RIM_RADIUS * NET_TAPER).abs() < 1e-5);
        assert!((top.y - bottom.y - NET_HEIGHT).abs() < 1e-5);
    }
}
