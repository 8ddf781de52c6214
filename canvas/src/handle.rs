//! Crop handles: hit-testing, cursors, and dispatch to the crop handlers.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::consts::{HANDLE_OFFSET_PX, HANDLE_SIZE_PX, TOUCH_HANDLE_SIZE_PX};
use crate::geometry::Point;
use crate::safe_area::SafeArea;
use crate::target::{AspectRatio, CropTarget};
use crate::{fixed_crop, free_crop};

/// One of the eight grips around the crop box, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

/// Which part of the crop box was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Handle(CropHandle),
    Body,
}

/// Pointer device, which decides handle hit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

impl PointerKind {
    /// Map a DOM `PointerEvent.pointerType`. Pens hit like a mouse.
    #[must_use]
    pub fn from_pointer_type(kind: &str) -> Self {
        if kind == "touch" { Self::Touch } else { Self::Mouse }
    }
}

impl CropHandle {
    /// Corners first so they win where their hit areas overlap a side.
    pub const ALL: [CropHandle; 8] = [
        CropHandle::Nw,
        CropHandle::Ne,
        CropHandle::Se,
        CropHandle::Sw,
        CropHandle::N,
        CropHandle::E,
        CropHandle::S,
        CropHandle::W,
    ];

    /// Position on the box as fractions of its size from the center, in `[-0.5, 0.5]`.
    #[must_use]
    pub fn anchor(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -0.5),
            Self::Ne => (0.5, -0.5),
            Self::E => (0.5, 0.0),
            Self::Se => (0.5, 0.5),
            Self::S => (0.0, 0.5),
            Self::Sw => (-0.5, 0.5),
            Self::W => (-0.5, 0.0),
            Self::Nw => (-0.5, -0.5),
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Se | Self::Nw => "nwse-resize",
        }
    }

    /// Viewport center of this handle's hit area.
    #[must_use]
    pub fn position(self, target: &CropTarget, camera: &Camera) -> Point {
        let b = target.box_limits(camera);
        let (fx, fy) = self.anchor();
        let cx = (b.left + b.right) / 2.0 + fx * (b.right - b.left);
        let cy = (b.top + b.bottom) / 2.0 + fy * (b.bottom - b.top);
        // Handles sit just outside the outline.
        Point::new(cx + 2.0 * fx * HANDLE_OFFSET_PX, cy + 2.0 * fy * HANDLE_OFFSET_PX)
    }
}

/// CSS cursor for a hit part.
#[must_use]
pub fn cursor_for(part: Option<HitPart>) -> &'static str {
    match part {
        Some(HitPart::Handle(h)) => h.cursor(),
        Some(HitPart::Body) => "move",
        None => "default",
    }
}

/// Find what lies under a viewport point while cropping: a handle, the box
/// body, or nothing.
#[must_use]
pub fn hit_test(screen: Point, target: &CropTarget, camera: &Camera, pointer: PointerKind) -> Option<HitPart> {
    let half = match pointer {
        PointerKind::Mouse => HANDLE_SIZE_PX,
        PointerKind::Touch => TOUCH_HANDLE_SIZE_PX,
    } / 2.0;

    for handle in CropHandle::ALL {
        let p = handle.position(target, camera);
        if (screen.x - p.x).abs() <= half && (screen.y - p.y).abs() <= half {
            return Some(HitPart::Handle(handle));
        }
    }

    if target.box_limits(camera).contains(screen, 0.0) {
        return Some(HitPart::Body);
    }
    None
}

/// Run the crop handler for `handle`, picking the fixed-aspect or free-form
/// family from the target's aspect lock. `pointer` is in scene space.
pub fn apply_crop(
    handle: CropHandle,
    target: &mut CropTarget,
    pointer: Point,
    camera: &Camera,
    safe: &SafeArea,
    config: &EditorConfig,
) -> bool {
    match target.aspect {
        AspectRatio::Fixed(ratio) => {
            let f = match handle {
                CropHandle::N => fixed_crop::crop_from_top,
                CropHandle::Ne => fixed_crop::crop_from_top_right,
                CropHandle::E => fixed_crop::crop_from_right,
                CropHandle::Se => fixed_crop::crop_from_bottom_right,
                CropHandle::S => fixed_crop::crop_from_bottom,
                CropHandle::Sw => fixed_crop::crop_from_bottom_left,
                CropHandle::W => fixed_crop::crop_from_left,
                CropHandle::Nw => fixed_crop::crop_from_top_left,
            };
            f(target, pointer, camera, safe, config, ratio)
        }
        AspectRatio::Free => {
            let f = match handle {
                CropHandle::N => free_crop::crop_from_top,
                CropHandle::Ne => free_crop::crop_from_top_right,
                CropHandle::E => free_crop::crop_from_right,
                CropHandle::Se => free_crop::crop_from_bottom_right,
                CropHandle::S => free_crop::crop_from_bottom,
                CropHandle::Sw => free_crop::crop_from_bottom_left,
                CropHandle::W => free_crop::crop_from_left,
                CropHandle::Nw => free_crop::crop_from_top_left,
            };
            f(target, pointer, camera, safe, config.crop_min_size)
        }
    }
}
