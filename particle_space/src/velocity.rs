//! Per-tick displacement of a body
//!
//! A `Velocity` is applied once per tick, never scaled by a time step, so it is
//! really "how far the body moves this tick". Both components are clamped to
//! [-MAX_SPEED, MAX_SPEED] on every write: a body can never cover more than one
//! unit per axis in a tick, which keeps it from skipping over a wall or another
//! body between two collision checks.

use common::constants::MAX_SPEED;
use glam::DVec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    x: f64,
    y: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        let mut velocity = Self::ZERO;
        velocity.set(x, y);
        velocity
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Overwrite both components, clamping each independently
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x.clamp(-MAX_SPEED, MAX_SPEED);
        self.y = y.clamp(-MAX_SPEED, MAX_SPEED);
    }

    pub fn set_x(&mut self, x: f64) {
        self.set(x, self.y);
    }

    pub fn set_y(&mut self, y: f64) {
        self.set(self.x, y);
    }

    /// Superpose `other`; saturates at the unit bound instead of growing
    pub fn add(&mut self, other: Velocity) {
        self.set(self.x + other.x, self.y + other.y);
    }

    pub fn negate(&self) -> Velocity {
        Velocity::new(-self.x, -self.y)
    }

    pub fn duplicate(&self) -> Velocity {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_each_component() {
        let v = Velocity::new(3.5, -0.25);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), -0.25);

        let v = Velocity::new(-7.0, 42.0);
        assert_eq!(v.x(), -1.0);
        assert_eq!(v.y(), 1.0);
    }

    #[test]
    fn repeated_adds_saturate() {
        let mut v = Velocity::ZERO;
        let kick = Velocity::new(0.3, -0.4);
        for _ in 0..10 {
            v.add(kick);
            assert!((-1.0..=1.0).contains(&v.x()));
            assert!((-1.0..=1.0).contains(&v.y()));
        }
        assert_eq!(v, Velocity::new(1.0, -1.0));
    }

    #[test]
    fn add_after_saturation_can_come_back() {
        let mut v = Velocity::new(1.0, 0.0);
        v.add(Velocity::new(1.0, 0.0));
        v.add(Velocity::new(-0.5, 0.0));
        assert_eq!(v.x(), 0.5);
    }

    #[test]
    fn negate_flips_both_signs() {
        let v = Velocity::new(0.5, -0.75);
        assert_eq!(v.negate(), Velocity::new(-0.5, 0.75));

        let mut cancelled = v;
        cancelled.add(v.negate());
        assert_eq!(cancelled, Velocity::ZERO);
    }

    #[test]
    fn duplicate_is_independent() {
        let original = Velocity::new(0.2, 0.2);
        let mut copy = original.duplicate();
        copy.set_x(-0.9);
        assert_eq!(original.x(), 0.2);
        assert_eq!(copy.x(), -0.9);
        assert_eq!(copy.y(), 0.2);
    }
}
