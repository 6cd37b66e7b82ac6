//! Common utilities for the particle space simulation
//!
//! This crate provides the tunable constants and the viewport bounds shared by
//! the physics core and whatever host drives it.

pub mod viewport;

pub use viewport::*;

/// Physical constants and tunables used by the simulation
pub mod constants {
    use std::ops::RangeInclusive;

    /// Gravitational constant (scaled so a handful of bodies orbit on screen)
    pub const G: f64 = 5e-3;

    /// Maximum number of bodies alive at once
    pub const MAX_BODIES: usize = 10;

    /// Largest displacement a body may make in one tick, on either axis
    pub const MAX_SPEED: f64 = 1.0;

    /// Spawn radius slider, in pixels
    pub const RADIUS_RANGE: RangeInclusive<u32> = 0..=20;
    pub const DEFAULT_RADIUS: u32 = 5;

    /// Spawn mass slider
    pub const MASS_RANGE: RangeInclusive<u32> = 0..=100;
    pub const DEFAULT_MASS: u32 = 20;

    /// Default window size of the host
    pub const WINDOW_WIDTH: f64 = 800.0;
    pub const WINDOW_HEIGHT: f64 = 600.0;
}
