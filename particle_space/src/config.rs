//! Tunables for the world and for spawning new bodies

use common::constants::{
    DEFAULT_MASS, DEFAULT_RADIUS, G, MASS_RANGE, MAX_BODIES, RADIUS_RANGE,
};
use common::Viewport;
use glam::DVec2;

use crate::velocity::Velocity;

/// Fixed parameters of a world. Changing them mid-run means building a new
/// world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub gravitational_constant: f64,
    pub capacity: usize,
    pub gravity_enabled: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            capacity: MAX_BODIES,
            gravity_enabled: true,
        }
    }
}

impl WorldConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity_enabled = enabled;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }
}

/// Radius and mass the next launched body gets, as picked on the settings
/// panel. Slider values are clamped to their range and a zero maps to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSettings {
    radius: u32,
    mass: u32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            mass: DEFAULT_MASS,
        }
    }
}

fn slider_value(value: u32, range: &std::ops::RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end()).max(1)
}

impl SpawnSettings {
    pub fn new(radius: u32, mass: u32) -> Self {
        let mut settings = Self::default();
        settings.set_radius(radius);
        settings.set_mass(mass);
        settings
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn diameter(&self) -> u32 {
        self.radius * 2
    }

    pub fn mass(&self) -> f64 {
        self.mass as f64
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = slider_value(radius, &RADIUS_RANGE);
    }

    pub fn set_mass(&mut self, mass: u32) {
        self.mass = slider_value(mass, &MASS_RANGE);
    }

    /// Turn a drag from `start` to `end` into a body centered on `start`,
    /// moving towards `end`. Longer drags launch faster, scaled by the size
    /// of the viewport.
    pub fn launch(&self, start: DVec2, end: DVec2, viewport: Viewport) -> Launch {
        let position = start - DVec2::splat(self.radius as f64);
        let velocity = Velocity::from_vec((end - start) / viewport.half_perimeter());

        Launch {
            position,
            mass: self.mass(),
            diameter: self.diameter(),
            velocity,
        }
    }
}

/// Everything needed to spawn a launched body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: DVec2,
    pub mass: f64,
    pub diameter: u32,
    pub velocity: Velocity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = WorldConfig::default();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.gravitational_constant, 5e-3);
        assert!(config.gravity_enabled);

        let settings = SpawnSettings::default();
        assert_eq!(settings.radius(), 5);
        assert_eq!(settings.diameter(), 10);
        assert_eq!(settings.mass(), 20.0);
    }

    #[test]
    fn sliders_clamp_and_map_zero_to_one() {
        let settings = SpawnSettings::new(0, 0);
        assert_eq!(settings.radius(), 1);
        assert_eq!(settings.mass(), 1.0);

        let settings = SpawnSettings::new(50, 500);
        assert_eq!(settings.radius(), 20);
        assert_eq!(settings.mass(), 100.0);
    }

    #[test]
    fn launch_centers_body_on_drag_start() {
        let settings = SpawnSettings::new(5, 20);
        let viewport = Viewport::new(800.0, 600.0);
        let launch = settings.launch(DVec2::new(100.0, 100.0), DVec2::new(240.0, 30.0), viewport);

        assert_eq!(launch.position, DVec2::new(95.0, 95.0));
        assert_eq!(launch.diameter, 10);
        assert_eq!(launch.mass, 20.0);
        assert!((launch.velocity.x() - 0.1).abs() < 1e-12);
        assert!((launch.velocity.y() + 0.05).abs() < 1e-12);
    }

    #[test]
    fn long_drags_are_clamped() {
        let viewport = Viewport::new(100.0, 100.0);
        let launch = SpawnSettings::default().launch(
            DVec2::new(10.0, 10.0),
            DVec2::new(1000.0, 10.0),
            viewport,
        );
        assert_eq!(launch.velocity.x(), 1.0);
        assert_eq!(launch.velocity.y(), 0.0);
    }
}
