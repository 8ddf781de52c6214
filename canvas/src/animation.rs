//! Auto-fill animation: eases the viewport so the crop box fills the safe area.
//!
//! The host drives it with frame timestamps. The first tick fixes the start
//! time, so construction and the first frame may be far apart without
//! skipping ahead.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::camera::Camera;
use crate::geometry::Point;
use crate::safe_area::SafeArea;
use crate::target::CropTarget;
use crate::zoom::auto_fill_destination;

/// One sampled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub camera: Camera,
    /// Scene position of the crop-box center.
    pub position: Point,
    pub finished: bool,
}

/// Linear tween from the current viewport to the fitted one.
#[derive(Debug, Clone)]
pub struct AutoFill {
    from_camera: Camera,
    to_camera: Camera,
    from_position: Point,
    to_position: Point,
    duration_ms: f64,
    started_at_ms: Option<f64>,
}

impl AutoFill {
    #[must_use]
    pub fn new(target: &CropTarget, camera: &Camera, safe: &SafeArea, duration_ms: f64) -> Self {
        let (to_camera, to_position) = auto_fill_destination(target, safe);
        Self {
            from_camera: *camera,
            to_camera,
            from_position: Point::new(target.left, target.top),
            to_position,
            duration_ms,
            started_at_ms: None,
        }
    }

    #[must_use]
    pub fn destination(&self) -> Camera {
        self.to_camera
    }

    /// Frame at progress `t` in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f64) -> AnimationFrame {
        let t = t.clamp(0.0, 1.0);
        AnimationFrame {
            camera: self.from_camera.lerp(&self.to_camera, t),
            position: self.from_position.lerp(self.to_position, t),
            finished: t >= 1.0,
        }
    }

    /// Advance to `now_ms`. The last frame lands exactly on the destination.
    pub fn tick(&mut self, now_ms: f64) -> AnimationFrame {
        let start = *self.started_at_ms.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return self.finish();
        }
        let t = (now_ms - start) / self.duration_ms;
        if t >= 1.0 { self.finish() } else { self.sample(t) }
    }

    /// Jump to the end.
    #[must_use]
    pub fn finish(&self) -> AnimationFrame {
        AnimationFrame { camera: self.to_camera, position: self.to_position, finished: true }
    }
}
