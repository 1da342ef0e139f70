use linkarm_core::nalgebra::Point2;

use crate::config::ViewportConfig;

/// Display surface with the axis origin at its centre.
///
/// The chain works in surface coordinates where y grows downwards. Display
/// coordinates put the origin in the middle of the surface with y growing
/// upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the surface, in surface coordinates.
    pub fn centre(&self) -> Point2<f32> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn to_x(&self, x: f32) -> f32 {
        x - self.width / 2.0
    }

    #[inline]
    pub fn to_y(&self, y: f32) -> f32 {
        self.height / 2.0 - y
    }

    /// Map a surface point to display coordinates.
    pub fn to_display(&self, point: &Point2<f32>) -> Point2<f32> {
        Point2::new(self.to_x(point.x), self.to_y(point.y))
    }

    /// Whether a surface point falls inside the surface.
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl From<&ViewportConfig> for Viewport {
    fn from(config: &ViewportConfig) -> Self {
        Self::new(config.width, config.height)
    }
}
