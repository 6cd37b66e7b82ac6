//! A circular particle with mass, size, and per-tick velocity

use std::f64::consts::PI;
use std::fmt;

use common::Viewport;
use glam::DVec2;

use crate::velocity::Velocity;

/// Stable handle of a body, assigned by the world at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display color class picked from mass per area. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityBand {
    Red,
    Orange,
    Yellow,
    White,
    Blue,
}

impl DensityBand {
    pub fn from_density(density: f64) -> Self {
        if density <= 0.03 {
            DensityBand::Red
        } else if density <= 0.1 {
            DensityBand::Orange
        } else if density <= 0.5 {
            DensityBand::Yellow
        } else if density <= 1.0 {
            DensityBand::White
        } else {
            DensityBand::Blue
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            DensityBand::Red => [1.0, 0.0, 0.0, 1.0],
            DensityBand::Orange => [1.0, 0.78, 0.0, 1.0],
            DensityBand::Yellow => [1.0, 1.0, 0.0, 1.0],
            DensityBand::White => [1.0, 1.0, 1.0, 1.0],
            DensityBand::Blue => [0.0, 0.0, 1.0, 1.0],
        }
    }
}

/// Axis a wall bounce was resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A body in the simulation.
///
/// `position` is the top-left corner of the body's bounding box, not its
/// center; use [`Body::center`] for anything physical.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    position: DVec2,
    diameter: u32,
    mass: f64,
    velocity: Velocity,
}

impl Body {
    pub fn new(id: BodyId, position: DVec2, mass: f64, diameter: u32) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        debug_assert!(diameter >= 1, "body diameter must be at least 1");

        Self {
            id,
            position,
            diameter,
            mass,
            velocity: Velocity::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    pub fn radius(&self) -> f64 {
        self.diameter as f64 / 2.0
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn center(&self) -> DVec2 {
        self.position + DVec2::splat(self.radius())
    }

    /// Mass per unit area
    pub fn density(&self) -> f64 {
        self.mass / (PI * self.radius().powi(2))
    }

    pub fn band(&self) -> DensityBand {
        DensityBand::from_density(self.density())
    }

    /// Move by one tick's worth of velocity
    pub fn integrate(&mut self) {
        self.position += self.velocity.as_vec();
    }

    /// Superpose `v` onto the current velocity
    pub fn apply_velocity(&mut self, v: Velocity) {
        self.velocity.add(v);
    }

    /// One-dimensional elastic collision response, applied to each axis
    /// independently:
    ///
    /// v' = (v·(m − m_o) + 2·m_o·v_o) / (m + m_o)
    ///
    /// The result is added to the current velocity, so callers that want the
    /// post-collision velocity outright cancel the old one first.
    pub fn apply_elastic(&mut self, other_velocity: Velocity, other_mass: f64) {
        let total = self.mass + other_mass;
        let diff = self.mass - other_mass;
        let v = self.velocity.as_vec();
        let new = (v * diff + 2.0 * other_mass * other_velocity.as_vec()) / total;
        self.apply_velocity(Velocity::from_vec(new));
    }

    /// Take all of `other`'s mass and a quarter of its diameter (rounded up).
    /// Removing `other` from the world is the caller's job.
    pub fn absorb(&mut self, other: &Body) {
        self.mass += other.mass;
        self.diameter += other.diameter.div_ceil(4);
    }

    /// Whether `point` lies inside the body's circle, boundary included
    pub fn contains_point(&self, point: DVec2) -> bool {
        self.center().distance_squared(point) <= self.radius().powi(2)
    }

    /// Whether the two circles share any area. Touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.radius() + other.radius();
        self.center().distance_squared(other.center()) < reach * reach
    }

    /// Keep the body inside `viewport` and reflect its velocity on the axis it
    /// hit. A body touching a vertical wall is resolved on X only, even if it
    /// also touches a horizontal one this tick.
    pub fn bounce_off_walls(&mut self, viewport: Viewport) -> Option<Axis> {
        let size = self.diameter as f64;
        let opposite = self.velocity.negate();
        let mut reflected = self.velocity.duplicate();

        let axis = if self.position.x <= 0.0 || self.position.x + size >= viewport.width {
            // Snap back in so the next tick does not trigger again
            if self.position.x < 0.0 {
                self.position.x = 1.0;
            } else if self.position.x + size > viewport.width {
                self.position.x = viewport.width - size - 1.0;
            }
            reflected.set_x(-reflected.x());
            Axis::X
        } else if self.position.y <= 0.0 || self.position.y + size >= viewport.height {
            if self.position.y < 0.0 {
                self.position.y = 1.0;
            } else if self.position.y + size > viewport.height {
                self.position.y = viewport.height - size - 1.0;
            }
            reflected.set_y(-reflected.y());
            Axis::Y
        } else {
            return None;
        };

        self.apply_velocity(opposite);
        self.apply_velocity(reflected);
        Some(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn body(x: f64, y: f64, mass: f64, diameter: u32) -> Body {
        Body::new(BodyId::new(0), DVec2::new(x, y), mass, diameter)
    }

    #[test]
    fn integrate_moves_by_velocity() {
        let mut b = body(10.0, 10.0, 1.0, 4).with_velocity(Velocity::new(0.5, -0.5));
        b.integrate();
        assert_eq!(b.position(), DVec2::new(10.5, 9.5));
    }

    #[test]
    fn center_is_offset_by_radius() {
        let b = body(10.0, 20.0, 1.0, 10);
        assert_eq!(b.center(), DVec2::new(15.0, 25.0));

        let odd = body(0.0, 0.0, 1.0, 3);
        assert_eq!(odd.center(), DVec2::new(1.5, 1.5));
    }

    #[test]
    fn elastic_with_zeroed_velocity_takes_other_velocity_for_equal_masses() {
        let mut b = body(0.0, 0.0, 4.0, 4);
        b.apply_elastic(Velocity::new(-0.5, 0.25), 4.0);
        assert!((b.velocity().x() + 0.5).abs() < EPS);
        assert!((b.velocity().y() - 0.25).abs() < EPS);
    }

    #[test]
    fn elastic_uses_mass_ratio() {
        let mut light = body(0.0, 0.0, 1.0, 4).with_velocity(Velocity::new(0.2, 0.0));
        // (0.2·(1 − 3) + 2·3·(−0.1)) / 4 = −0.25, added to 0.2
        light.apply_elastic(Velocity::new(-0.1, 0.0), 3.0);
        assert!((light.velocity().x() - (0.2 - 0.25)).abs() < EPS);
        assert_eq!(light.velocity().y(), 0.0);
    }

    #[test]
    fn absorb_takes_mass_and_quarter_diameter_rounded_up() {
        let mut big = body(0.0, 0.0, 5.0, 10);
        let small = body(0.0, 0.0, 3.0, 6);
        big.absorb(&small);
        assert_eq!(big.mass(), 8.0);
        assert_eq!(big.diameter(), 12);

        let tiny = body(0.0, 0.0, 1.0, 1);
        big.absorb(&tiny);
        assert_eq!(big.diameter(), 13);
    }

    #[test]
    fn band_follows_density_thresholds() {
        // radius 5 => area 25π
        let area = PI * 25.0;
        assert_eq!(body(0.0, 0.0, 0.02 * area, 10).band(), DensityBand::Red);
        assert_eq!(body(0.0, 0.0, 0.05 * area, 10).band(), DensityBand::Orange);
        assert_eq!(body(0.0, 0.0, 0.3 * area, 10).band(), DensityBand::Yellow);
        assert_eq!(body(0.0, 0.0, 0.9 * area, 10).band(), DensityBand::White);
        assert_eq!(body(0.0, 0.0, 2.0 * area, 10).band(), DensityBand::Blue);
    }

    #[test]
    fn band_tracks_absorption() {
        let mut b = body(0.0, 0.0, 1.0, 10);
        assert_eq!(b.band(), DensityBand::Red);
        b.absorb(&body(0.0, 0.0, 30.0, 2));
        assert_eq!(b.band(), DensityBand::Yellow);
    }

    #[test]
    fn contains_point_is_circular() {
        let b = body(0.0, 0.0, 1.0, 10);
        assert!(b.contains_point(DVec2::new(5.0, 5.0)));
        assert!(b.contains_point(DVec2::new(10.0, 5.0)));
        // Corner of the bounding box is outside the circle
        assert!(!b.contains_point(DVec2::new(0.5, 0.5)));
    }

    #[test]
    fn touching_bodies_do_not_overlap() {
        let a = body(0.0, 0.0, 1.0, 10);
        let touching = body(10.0, 0.0, 1.0, 10);
        let overlapping = body(9.5, 0.0, 1.0, 10);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn left_wall_snaps_and_reflects() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut b = body(-1.0, 50.0, 1.0, 10).with_velocity(Velocity::new(-0.3, 0.1));
        assert_eq!(b.bounce_off_walls(viewport), Some(Axis::X));
        assert_eq!(b.position().x, 1.0);
        assert!((b.velocity().x() - 0.3).abs() < EPS);
        assert!((b.velocity().y() - 0.1).abs() < EPS);
    }

    #[test]
    fn right_wall_snaps_one_unit_inside() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut b = body(95.0, 50.0, 1.0, 10).with_velocity(Velocity::new(0.4, 0.0));
        assert_eq!(b.bounce_off_walls(viewport), Some(Axis::X));
        assert_eq!(b.position().x, 89.0);
        assert!((b.velocity().x() + 0.4).abs() < EPS);
    }

    #[test]
    fn touching_wall_reflects_without_moving() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut b = body(0.0, 50.0, 1.0, 10).with_velocity(Velocity::new(-0.2, 0.0));
        assert_eq!(b.bounce_off_walls(viewport), Some(Axis::X));
        assert_eq!(b.position().x, 0.0);
        assert!((b.velocity().x() - 0.2).abs() < EPS);
    }

    #[test]
    fn bottom_wall_reflects_y() {
        let viewport = Viewport::new(100.0, 60.0);
        let mut b = body(40.0, 55.0, 1.0, 10).with_velocity(Velocity::new(0.1, 0.6));
        assert_eq!(b.bounce_off_walls(viewport), Some(Axis::Y));
        assert_eq!(b.position().y, 49.0);
        assert!((b.velocity().x() - 0.1).abs() < EPS);
        assert!((b.velocity().y() + 0.6).abs() < EPS);
    }

    #[test]
    fn corner_resolves_x_only() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut b = body(-2.0, -3.0, 1.0, 10).with_velocity(Velocity::new(-0.5, -0.5));
        assert_eq!(b.bounce_off_walls(viewport), Some(Axis::X));
        assert_eq!(b.position(), DVec2::new(1.0, -3.0));
        assert!((b.velocity().x() - 0.5).abs() < EPS);
        assert!((b.velocity().y() + 0.5).abs() < EPS);
    }

    #[test]
    fn interior_body_is_untouched() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut b = body(40.0, 40.0, 1.0, 10).with_velocity(Velocity::new(0.7, -0.7));
        let before = b.clone();
        assert_eq!(b.bounce_off_walls(viewport), None);
        assert_eq!(b, before);
    }
}
