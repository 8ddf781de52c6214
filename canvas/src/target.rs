//! Crop target: a displayed image and its crop window onto the source asset.
//!
//! Three coordinate spaces meet here:
//!
//! - **asset pixels**: `(0, 0)` is the top-left of the original image.
//! - **local**: object space centered on the crop box; `(0, 0)` is the box center
//!   and one unit is one asset pixel.
//! - **scene**: `left`/`top` place the box center; `scale` maps local units to
//!   scene units. The [`Camera`] maps scene to viewport.
//!
//! The crop window is `crop_x, crop_y, width, height` in asset pixels. Moving the
//! window without moving the box on screen means changing `crop_*` and
//! repositioning the box so the image stays put.

#[cfg(test)]
#[path = "target_test.rs"]
mod target_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Camera;
use crate::consts::FREE_ASPECT_SENTINEL;
use crate::error::EditorError;
use crate::geometry::{Matrix, Point, Size, find_scale_to_fit};
use crate::safe_area::{Limits, SafeArea};

/// Unique identifier for a crop target.
pub type TargetId = Uuid;

/// Crop-box aspect constraint.
///
/// On the wire this is a bare number: positive means fixed, `-1` means free.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum AspectRatio {
    #[default]
    Free,
    /// Width divided by height.
    Fixed(f64),
}

impl AspectRatio {
    /// Strict parse of the wire value: `-1` or a positive finite ratio.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidAspectRatio`] for anything else.
    pub fn from_sentinel(value: f64) -> Result<Self, EditorError> {
        if (value - FREE_ASPECT_SENTINEL).abs() < f64::EPSILON {
            Ok(Self::Free)
        } else if value.is_finite() && value > 0.0 {
            Ok(Self::Fixed(value))
        } else {
            Err(EditorError::InvalidAspectRatio(value))
        }
    }

    /// The locked ratio, if any.
    #[must_use]
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Fixed(r) => Some(r),
        }
    }

    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl From<f64> for AspectRatio {
    fn from(value: f64) -> Self {
        if value.is_finite() && value > 0.0 { Self::Fixed(value) } else { Self::Free }
    }
}

impl From<AspectRatio> for f64 {
    fn from(value: AspectRatio) -> Self {
        value.fixed().unwrap_or(FREE_ASPECT_SENTINEL)
    }
}

/// Horizontal anchor on the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginX {
    Left,
    Center,
    Right,
}

/// Vertical anchor on the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginY {
    Top,
    Center,
    Bottom,
}

impl OriginX {
    fn factor(self) -> f64 {
        match self {
            Self::Left => -0.5,
            Self::Center => 0.0,
            Self::Right => 0.5,
        }
    }
}

impl OriginY {
    fn factor(self) -> f64 {
        match self {
            Self::Top => -0.5,
            Self::Center => 0.0,
            Self::Bottom => 0.5,
        }
    }
}

/// Crop window normalized to `[0, 1]` per asset dimension, plus the zoom
/// slider position. This is what the host persists.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropState {
    pub zoom_percent: f64,
    pub crop_x: f64,
    pub crop_y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropState {
    /// True when the crop window (not the zoom) differs from `other` beyond rounding noise.
    #[must_use]
    pub fn window_differs(&self, other: &Self) -> bool {
        const TOLERANCE: f64 = 1e-9;
        (self.crop_x - other.crop_x).abs() > TOLERANCE
            || (self.crop_y - other.crop_y).abs() > TOLERANCE
            || (self.width - other.width).abs() > TOLERANCE
            || (self.height - other.height).abs() > TOLERANCE
    }
}

/// The image being cropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropTarget {
    pub id: TargetId,
    /// Scene x of the crop-box center.
    pub left: f64,
    /// Scene y of the crop-box center.
    pub top: f64,
    /// Crop-box width in asset pixels.
    pub width: f64,
    /// Crop-box height in asset pixels.
    pub height: f64,
    /// Offset of the crop window into the asset.
    pub crop_x: f64,
    pub crop_y: f64,
    /// Scene units per local unit.
    pub scale: f64,
    /// Full source image dimensions.
    pub original: Size,
    pub aspect: AspectRatio,
    pub is_cropping: bool,
    /// Linear map from scene deltas to local deltas, captured at gesture start.
    #[serde(skip)]
    pub drag_matrix: Matrix,
}

impl CropTarget {
    /// A target showing the whole asset, centered on the scene origin.
    #[must_use]
    pub fn new(original: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            left: 0.0,
            top: 0.0,
            width: original.width,
            height: original.height,
            crop_x: 0.0,
            crop_y: 0.0,
            scale: 1.0,
            original,
            aspect: AspectRatio::Free,
            is_cropping: false,
            drag_matrix: Matrix::IDENTITY,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Crop-box size in scene units.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        self.size().scaled(self.scale)
    }

    /// Local → scene.
    #[must_use]
    pub fn object_matrix(&self) -> Matrix {
        Matrix::scale_translate(self.scale, self.left, self.top)
    }

    #[must_use]
    pub fn local_to_scene(&self, local: Point) -> Point {
        self.object_matrix().transform_point(local)
    }

    #[must_use]
    pub fn scene_to_local(&self, scene: Point) -> Point {
        self.object_matrix().invert().transform_point(scene)
    }

    /// Scene position of an anchor on the crop box.
    #[must_use]
    pub fn origin_point(&self, ox: OriginX, oy: OriginY) -> Point {
        Point::new(
            self.left + ox.factor() * self.width * self.scale,
            self.top + oy.factor() * self.height * self.scale,
        )
    }

    /// Move the box so its `(ox, oy)` anchor lands on `point`.
    pub fn set_position_by_origin(&mut self, point: Point, ox: OriginX, oy: OriginY) {
        self.left = point.x - ox.factor() * self.width * self.scale;
        self.top = point.y - oy.factor() * self.height * self.scale;
    }

    /// Viewport pixels per asset pixel at the given camera.
    #[must_use]
    pub fn viewport_scale(&self, camera: &Camera) -> f64 {
        camera.zoom * self.scale
    }

    /// Map an asset-pixel coordinate to the viewport.
    ///
    /// Works for points outside the crop window, so it also locates the
    /// hidden parts of the image.
    #[must_use]
    pub fn pixel_to_viewport(&self, camera: &Camera, px: f64, py: f64) -> Point {
        let local = Point::new(px - (self.width / 2.0 + self.crop_x), py - (self.height / 2.0 + self.crop_y));
        camera.world_to_screen(self.local_to_scene(local))
    }

    /// Viewport bounds of the entire source image.
    #[must_use]
    pub fn image_limits(&self, camera: &Camera) -> Limits {
        let tl = self.pixel_to_viewport(camera, 0.0, 0.0);
        let br = self.pixel_to_viewport(camera, self.original.width, self.original.height);
        Limits { left: tl.x, top: tl.y, right: br.x, bottom: br.y }
    }

    /// Viewport bounds of the crop box.
    #[must_use]
    pub fn box_limits(&self, camera: &Camera) -> Limits {
        let tl = self.pixel_to_viewport(camera, self.crop_x, self.crop_y);
        let br = self.pixel_to_viewport(camera, self.crop_x + self.width, self.crop_y + self.height);
        Limits { left: tl.x, top: tl.y, right: br.x, bottom: br.y }
    }

    /// How far any crop edge may travel: the image bounds clipped to the safe area.
    #[must_use]
    pub fn crop_limits(&self, camera: &Camera, safe: &SafeArea) -> Limits {
        self.image_limits(camera).intersect(&safe.limits())
    }

    /// Effective minimum edge length. An asset smaller than the minimum can
    /// still be cropped down to its own size.
    #[must_use]
    pub fn min_width(&self, crop_min_size: f64) -> f64 {
        crop_min_size.min(self.original.width)
    }

    #[must_use]
    pub fn min_height(&self, crop_min_size: f64) -> f64 {
        crop_min_size.min(self.original.height)
    }

    /// Capture the scene → local delta map for the gesture about to start.
    pub fn setup_drag_matrix(&mut self) {
        self.drag_matrix = self.object_matrix().invert().without_translation();
    }

    /// Slide the image under a stationary crop box.
    ///
    /// `movement` is the scene-space pointer delta since the last event. The
    /// image follows the pointer, so the crop window moves the opposite way.
    /// Returns `true` if the window moved.
    pub fn pan_image(&mut self, movement: Point) -> bool {
        let change = self.drag_matrix.transform_vector(movement.scale(-1.0));
        let max_x = (self.original.width - self.width).max(0.0);
        let max_y = (self.original.height - self.height).max(0.0);
        let crop_x = (self.crop_x + change.x).clamp(0.0, max_x);
        let crop_y = (self.crop_y + change.y).clamp(0.0, max_y);
        let moved = (crop_x - self.crop_x).abs() > f64::EPSILON || (crop_y - self.crop_y).abs() > f64::EPSILON;
        self.crop_x = crop_x;
        self.crop_y = crop_y;
        moved
    }

    /// Restore `0 ≤ crop ≤ crop + size ≤ original` after a resize or zoom.
    ///
    /// An oversize locked-aspect box shrinks proportionally; a free box is
    /// clamped per axis.
    pub fn fit_and_finish(&mut self) {
        self.crop_x = self.crop_x.max(0.0);
        self.crop_y = self.crop_y.max(0.0);

        if self.aspect.is_fixed() {
            let k = (self.original.width / self.width).min(self.original.height / self.height);
            if k < 1.0 {
                self.width *= k;
                self.height *= k;
            }
        } else {
            self.width = self.width.min(self.original.width);
            self.height = self.height.min(self.original.height);
        }

        if self.crop_x + self.width > self.original.width {
            self.crop_x = (self.original.width - self.width).max(0.0);
        }
        if self.crop_y + self.height > self.original.height {
            self.crop_y = (self.original.height - self.height).max(0.0);
        }
    }

    /// Lock the aspect ratio and reshape the box to it.
    ///
    /// The new box is the `ratio × 1` shape covering the safe area at `zoom`.
    /// If the asset has room on the growing axis the box just widens (or
    /// heightens) around its center. Otherwise it is scaled down to fit the
    /// asset and the offsets keep their relative position.
    pub fn reset_to_aspect_ratio(&mut self, ratio: f64, safe: &SafeArea, zoom: f64) {
        self.aspect = AspectRatio::Fixed(ratio);

        let k = zoom * self.scale;
        let abstract_box = Size::new(ratio, 1.0);
        let cover = safe.size().scaled(1.0 / k);
        let s = (cover.width / abstract_box.width).max(cover.height / abstract_box.height);
        let new_w = abstract_box.width * s;
        let new_h = abstract_box.height * s;

        let grow_w = new_w - self.width;
        let grow_h = new_h - self.height;
        let room_x = self.original.width - self.width;
        let room_y = self.original.height - self.height;
        let fits_x = grow_w <= room_x;
        let fits_y = grow_h <= room_y;

        if fits_x && fits_y {
            self.crop_x -= grow_w / 2.0;
            self.crop_y -= grow_h / 2.0;
            self.width = new_w;
            self.height = new_h;
        } else {
            let rel_x = if room_x > 0.0 { Some(self.crop_x / room_x) } else { None };
            let rel_y = if room_y > 0.0 { Some(self.crop_y / room_y) } else { None };

            let fit = find_scale_to_fit(Size::new(new_w, new_h), self.original);
            self.width = new_w * fit;
            self.height = new_h * fit;

            let room_x = self.original.width - self.width;
            let room_y = self.original.height - self.height;
            self.crop_x = rel_x.map_or(room_x / 2.0, |r| r * room_x);
            self.crop_y = rel_y.map_or(room_y / 2.0, |r| r * room_y);
        }

        self.fit_and_finish();
    }

    /// Normalized crop window for persistence.
    #[must_use]
    pub fn crop_state(&self, zoom_percent: f64) -> CropState {
        CropState {
            zoom_percent,
            crop_x: self.crop_x / self.original.width,
            crop_y: self.crop_y / self.original.height,
            width: self.width / self.original.width,
            height: self.height / self.original.height,
        }
    }

    /// Inverse of [`CropTarget::crop_state`]. A zero-sized state leaves the
    /// window untouched. The caller re-centers the viewport afterward.
    pub fn apply_crop_state(&mut self, state: &CropState) {
        if state.width <= 0.0 || state.height <= 0.0 {
            return;
        }
        self.crop_x = state.crop_x * self.original.width;
        self.crop_y = state.crop_y * self.original.height;
        self.width = state.width * self.original.width;
        self.height = state.height * self.original.height;
        self.left = 0.0;
        self.top = 0.0;
        self.fit_and_finish();
    }
}
