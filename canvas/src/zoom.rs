//! Zoom while cropping.
//!
//! Zooming changes the viewport scale and, inversely, the crop window: zooming
//! in crops tighter, zooming out reveals more of the asset. After every step
//! the crop box is re-fit to the safe area and the viewport is re-centered on
//! it, so the box always fills the safe area along at least one axis.
//!
//! Zoom is clamped to `[min, max]`:
//!
//! - **min** shows the largest box of the current aspect the asset can hold.
//! - **max** is the zoom at which a nominal 10×10 box fills the safe area,
//!   further capped so the box never drops below the minimum crop size.
//!
//! The host slider maps to zoom through a quartic curve so equal slider
//! steps feel even near the minimum.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use tracing::debug;

use crate::camera::Camera;
use crate::consts::{MAX_ZOOM_NOMINAL_SIZE, ZOOM_SMOOTHING_FACTOR};
use crate::geometry::{Point, Size, find_scale_to_cover, find_scale_to_fit};
use crate::safe_area::SafeArea;
use crate::target::CropTarget;

/// Legal zoom range for the current target and safe area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom <= self.min {
            self.min
        } else if zoom >= self.max {
            self.max
        } else {
            zoom
        }
    }
}

/// Zoom at which the largest box of the target's current aspect fills the safe area.
#[must_use]
pub fn compute_min_scale(safe: &SafeArea, target: &CropTarget) -> f64 {
    let abstract_box = Size::new(target.width / target.height, 1.0);
    let largest = abstract_box.scaled(find_scale_to_fit(abstract_box, target.original));
    find_scale_to_fit(largest.scaled(target.scale), safe.size())
}

/// Zoom at which the nominal maximum-zoom box fills the safe area.
#[must_use]
pub fn compute_max_scale(safe: &SafeArea) -> f64 {
    find_scale_to_fit(Size::new(MAX_ZOOM_NOMINAL_SIZE, MAX_ZOOM_NOMINAL_SIZE), safe.size())
}

/// Both bounds, with `max` capped so a box re-fit at max zoom still meets the
/// minimum crop size, and never below `min`.
#[must_use]
pub fn zoom_bounds(safe: &SafeArea, target: &CropTarget, crop_min_size: f64) -> ZoomBounds {
    let min = compute_min_scale(safe, target);

    // Box of the current shape whose constrained edge is exactly the minimum.
    let constrained = if target.aspect.is_fixed() {
        target.width / target.min_width(crop_min_size)
    } else {
        (target.width / target.min_width(crop_min_size)).min(target.height / target.min_height(crop_min_size))
    };
    let smallest = target.scaled_size().scaled(1.0 / constrained);
    let size_cap = find_scale_to_fit(smallest, safe.size());

    let max = compute_max_scale(safe).min(size_cap).max(min);
    ZoomBounds { min, max }
}

/// `zoom * factor` clamped into `bounds`.
#[must_use]
pub fn refine_scale_factor(zoom: f64, factor: f64, bounds: ZoomBounds) -> f64 {
    bounds.clamp(zoom * factor)
}

/// Per-tick wheel factor: scrolling down zooms out.
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64, zoom_factor: f64) -> f64 {
    if delta_y > 0.0 { 1.0 / zoom_factor } else { zoom_factor }
}

/// Slider position in `[0, 100]` for `scale`.
#[must_use]
pub fn scale_to_percent(scale: f64, bounds: ZoomBounds) -> f64 {
    if bounds.max <= bounds.min {
        return 0.0;
    }
    let t = ((scale - bounds.min) / (bounds.max - bounds.min)).clamp(0.0, 1.0);
    t.powf(1.0 / f64::from(ZOOM_SMOOTHING_FACTOR)) * 100.0
}

/// Inverse of [`scale_to_percent`].
#[must_use]
pub fn percent_to_scale(percent: f64, bounds: ZoomBounds) -> f64 {
    if bounds.max <= bounds.min {
        return bounds.min;
    }
    let t = (percent / 100.0).clamp(0.0, 1.0);
    bounds.min + (bounds.max - bounds.min) * t.powi(ZOOM_SMOOTHING_FACTOR)
}

/// Viewport that centers the crop box at `zoom`. The box moves to the scene origin.
pub fn recenter(target: &mut CropTarget, camera: &mut Camera, safe: &SafeArea, zoom: f64) {
    target.left = 0.0;
    target.top = 0.0;
    *camera = Camera::centered_on(safe.center(), zoom);
    target.setup_drag_matrix();
}

/// Re-center with the box covering the safe area. Used outside cropping,
/// where the whole image should fill its frame.
pub fn recenter_to_cover(target: &mut CropTarget, camera: &mut Camera, safe: &SafeArea) {
    let zoom = find_scale_to_cover(target.scaled_size(), safe.size());
    recenter(target, camera, safe, zoom);
}

/// Viewport and box position that fit the box inside the safe area.
#[must_use]
pub fn auto_fill_destination(target: &CropTarget, safe: &SafeArea) -> (Camera, Point) {
    let zoom = find_scale_to_fit(target.scaled_size(), safe.size());
    (Camera::centered_on(safe.center(), zoom), Point::new(0.0, 0.0))
}

/// Zoom by `factor` around the crop box, resizing the crop window to match.
///
/// Returns the new zoom.
pub fn rescale(target: &mut CropTarget, camera: &mut Camera, safe: &SafeArea, factor: f64, crop_min_size: f64) -> f64 {
    let bounds = zoom_bounds(safe, target, crop_min_size);
    let total = refine_scale_factor(camera.zoom, factor, bounds);

    let k = total * target.scale;
    let max_width = safe.width / k;
    let max_height = safe.height / k;

    let broken_x = target.width > max_width;
    let broken_y = target.height > max_height;

    if broken_x && broken_y {
        // Fixing the tighter axis first always fixes the other one too.
        if target.size().aspect() <= safe.size().aspect() {
            shrink_to_height(target, max_height);
        } else {
            shrink_to_width(target, max_width);
        }
        if target.width > max_width {
            shrink_to_width(target, max_width);
        }
        if target.height > max_height {
            shrink_to_height(target, max_height);
        }
    } else if broken_x {
        shrink_to_width(target, max_width);
    } else if broken_y {
        shrink_to_height(target, max_height);
    } else if target.width < max_width && target.height < max_height {
        let grow = find_scale_to_fit(target.size(), Size::new(max_width, max_height));
        let diff_x = target.width * grow - target.width;
        let diff_y = target.height * grow - target.height;
        target.width += diff_x;
        target.height += diff_y;
        target.crop_x -= diff_x / 2.0;
        target.crop_y -= diff_y / 2.0;
    }

    target.fit_and_finish();
    recenter(target, camera, safe, total);
    debug!(zoom = total, width = target.width, height = target.height, "rescaled crop");
    total
}

fn shrink_to_width(target: &mut CropTarget, max_width: f64) {
    let diff_x = target.width - max_width;
    let pct = max_width / target.width;
    let diff_y = target.height - target.height * pct;
    target.width = max_width;
    target.height -= diff_y;
    target.crop_x += diff_x / 2.0;
    target.crop_y += diff_y / 2.0;
}

fn shrink_to_height(target: &mut CropTarget, max_height: f64) {
    let diff_y = target.height - max_height;
    let pct = max_height / target.height;
    let diff_x = target.width - target.width * pct;
    target.height = max_height;
    target.width -= diff_x;
    target.crop_x += diff_x / 2.0;
    target.crop_y += diff_y / 2.0;
}

/// Jump to a slider position. Returns the new zoom.
pub fn zoom_from_percent(target: &mut CropTarget, camera: &mut Camera, safe: &SafeArea, percent: f64, crop_min_size: f64) -> f64 {
    let bounds = zoom_bounds(safe, target, crop_min_size);
    let scale = percent_to_scale(percent, bounds);
    rescale(target, camera, safe, scale / camera.zoom, crop_min_size)
}
