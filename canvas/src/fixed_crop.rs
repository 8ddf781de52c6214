//! Fixed-aspect crop: the box keeps `width / height == ratio` through every drag.
//!
//! All bounds are computed in viewport pixels against the crop limits (image
//! bounds clipped to the safe area), then converted back to asset pixels with
//! the target's viewport scale.
//!
//! Corners scale the box uniformly about the opposite corner. Sides move one
//! edge (the explicit axis) and grow the other axis symmetrically about its
//! center (the implicit axis).
//!
//! A drag that would take the width under the minimum is ignored outright:
//! the handler reports success and leaves the target untouched.

#[cfg(test)]
#[path = "fixed_crop_test.rs"]
mod fixed_crop_test;

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::safe_area::{Limits, SafeArea};
use crate::target::{CropTarget, OriginX, OriginY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn of(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    fn low(self, l: &Limits) -> f64 {
        match self {
            Self::X => l.left,
            Self::Y => l.top,
        }
    }

    fn high(self, l: &Limits) -> f64 {
        match self {
            Self::X => l.right,
            Self::Y => l.bottom,
        }
    }
}

/// Move the left edge; the right edge stays fixed and the height follows the ratio about its center.
pub fn crop_from_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    side(target, pointer, camera, safe, config, ratio, Axis::X, -1.0)
}

/// Move the right edge; the left edge stays fixed and the height follows the ratio about its center.
pub fn crop_from_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    side(target, pointer, camera, safe, config, ratio, Axis::X, 1.0)
}

/// Move the top edge; the bottom edge stays fixed and the width follows the ratio about its center.
pub fn crop_from_top(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    side(target, pointer, camera, safe, config, ratio, Axis::Y, -1.0)
}

/// Move the bottom edge; the top edge stays fixed and the width follows the ratio about its center.
pub fn crop_from_bottom(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    side(target, pointer, camera, safe, config, ratio, Axis::Y, 1.0)
}

/// Scale from the top-left corner; the bottom-right corner stays fixed.
pub fn crop_from_top_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    corner(target, pointer, camera, safe, config, ratio, OriginX::Left, OriginY::Top)
}

/// Scale from the top-right corner; the bottom-left corner stays fixed.
pub fn crop_from_top_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    corner(target, pointer, camera, safe, config, ratio, OriginX::Right, OriginY::Top)
}

/// Scale from the bottom-left corner; the top-right corner stays fixed.
pub fn crop_from_bottom_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    corner(target, pointer, camera, safe, config, ratio, OriginX::Left, OriginY::Bottom)
}

/// Scale from the bottom-right corner; the top-left corner stays fixed.
pub fn crop_from_bottom_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, config: &EditorConfig, ratio: f64) -> bool {
    corner(target, pointer, camera, safe, config, ratio, OriginX::Right, OriginY::Bottom)
}

/// `moving_x`/`moving_y` name the dragged corner; the opposite corner stays put.
#[allow(clippy::too_many_arguments)]
fn corner(
    target: &mut CropTarget,
    pointer: Point,
    camera: &Camera,
    safe: &SafeArea,
    config: &EditorConfig,
    ratio: f64,
    moving_x: OriginX,
    moving_y: OriginY,
) -> bool {
    let screen = camera.world_to_screen(pointer);
    let bx = target.box_limits(camera);
    let limits = target.crop_limits(camera, safe);
    let offset = config.min_pixel_offset;

    let (fixed_ox, x) = if moving_x == OriginX::Left {
        (OriginX::Right, screen.x.min(bx.right - offset).min(limits.right).max(limits.left))
    } else {
        (OriginX::Left, screen.x.max(bx.left + offset).max(limits.left).min(limits.right))
    };
    let (fixed_oy, y) = if moving_y == OriginY::Top {
        (OriginY::Bottom, screen.y.min(bx.bottom - offset).min(limits.bottom).max(limits.top))
    } else {
        (OriginY::Top, screen.y.max(bx.top + offset).max(limits.top).min(limits.bottom))
    };
    let fixed = Point::new(
        if fixed_ox == OriginX::Left { bx.left } else { bx.right },
        if fixed_oy == OriginY::Top { bx.top } else { bx.bottom },
    );

    let k = target.viewport_scale(camera);
    let (width, height) = (target.width, target.height);
    let new_width = (x - fixed.x).abs() / k;
    let new_height = (y - fixed.y).abs() / k;

    // The smaller ratio keeps both edges inside their limits.
    let r = (new_width / width).min(new_height / height);
    let change_x = width * r - width;
    let change_y = height * r - height;

    let min_width = target.min_width(config.crop_min_size);
    if width + change_x < min_width && height + change_y < min_width / ratio {
        return true;
    }

    let anchor = target.origin_point(fixed_ox, fixed_oy);
    if moving_x == OriginX::Left {
        target.crop_x -= change_x;
    }
    if moving_y == OriginY::Top {
        target.crop_y -= change_y;
    }
    target.width += change_x;
    target.height += change_y;
    target.set_position_by_origin(anchor, fixed_ox, fixed_oy);
    true
}

/// `dir` is `-1` for the left/top edge and `+1` for the right/bottom edge.
#[allow(clippy::too_many_arguments)]
fn side(
    target: &mut CropTarget,
    pointer: Point,
    camera: &Camera,
    safe: &SafeArea,
    config: &EditorConfig,
    ratio: f64,
    axis: Axis,
    dir: f64,
) -> bool {
    let screen = camera.world_to_screen(pointer);
    let bx = target.box_limits(camera);
    let limits = target.crop_limits(camera, safe);
    let implicit = axis.other();
    let offset = config.min_pixel_offset;

    let (moving, fixed) = if dir < 0.0 {
        (axis.low(&bx), axis.high(&bx))
    } else {
        (axis.high(&bx), axis.low(&bx))
    };
    let explicit_room = if dir < 0.0 { moving - axis.low(&limits) } else { axis.high(&limits) - moving };
    let implicit_room = (implicit.low(&bx) - implicit.low(&limits)).min(implicit.high(&limits) - implicit.high(&bx));

    // Explicit-axis change → implicit-axis change.
    let to_implicit = match axis {
        Axis::X => 1.0 / ratio,
        Axis::Y => ratio,
    };

    let p = axis.of(screen);
    let wanted = (p - moving) * dir;
    let bound = if wanted < explicit_room && wanted * to_implicit / 2.0 < implicit_room {
        if dir < 0.0 { p.min(fixed - offset) } else { p.max(fixed + offset) }
    } else {
        // The implicit axis grows on both sides, so it can absorb twice its tightest room.
        let reach = 2.0 * implicit_room / to_implicit;
        if dir < 0.0 {
            axis.low(&limits).max(moving - reach)
        } else {
            axis.high(&limits).min(moving + reach)
        }
    };

    let k = target.viewport_scale(camera);
    let change = (bound - moving) * dir / k;
    let implicit_change = change * to_implicit;
    let (change_x, change_y) = match axis {
        Axis::X => (change, implicit_change),
        Axis::Y => (implicit_change, change),
    };

    let min_width = target.min_width(config.crop_min_size);
    if target.width + change_x < min_width && target.height + change_y < min_width / ratio {
        return true;
    }

    let (fixed_ox, fixed_oy) = match (axis, dir < 0.0) {
        (Axis::X, true) => (OriginX::Right, OriginY::Center),
        (Axis::X, false) => (OriginX::Left, OriginY::Center),
        (Axis::Y, true) => (OriginX::Center, OriginY::Bottom),
        (Axis::Y, false) => (OriginX::Center, OriginY::Top),
    };
    let anchor = target.origin_point(fixed_ox, fixed_oy);

    match axis {
        Axis::X => {
            if dir < 0.0 {
                target.crop_x -= change_x;
            }
            target.crop_y -= change_y / 2.0;
        }
        Axis::Y => {
            if dir < 0.0 {
                target.crop_y -= change_y;
            }
            target.crop_x -= change_x / 2.0;
        }
    }
    target.width += change_x;
    target.height += change_y;
    target.set_position_by_origin(anchor, fixed_ox, fixed_oy);
    true
}
