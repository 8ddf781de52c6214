#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, lerp};

/// Viewport transform for the editor canvas.
///
/// `pan_x` / `pan_y` are the viewport position of the scene origin, in CSS pixels.
/// `zoom` is a uniform scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Camera at `zoom` with the scene origin placed on `center`.
    #[must_use]
    pub fn centered_on(center: Point, zoom: f64) -> Self {
        Self { pan_x: center.x, pan_y: center.y, zoom }
    }

    /// Convert a viewport point (CSS pixels) to scene coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a scene point to viewport coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Interpolate every component linearly toward `to`.
    #[must_use]
    pub fn lerp(&self, to: &Camera, t: f64) -> Camera {
        Camera {
            pan_x: lerp(self.pan_x, to.pan_x, t),
            pan_y: lerp(self.pan_y, to.pan_y, t),
            zoom: lerp(self.zoom, to.zoom, t),
        }
    }
}
