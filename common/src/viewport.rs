//! Viewport bounds that confine the simulation

use glam::DVec2;

/// The drawable area bodies bounce around in, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Width plus height, used to scale drag distances into launch speeds
    pub fn half_perimeter(&self) -> f64 {
        self.width + self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::constants::WINDOW_WIDTH,
            crate::constants::WINDOW_HEIGHT,
        )
    }
}
