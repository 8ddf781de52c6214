//! Free-form crop: each edge moves independently.
//!
//! Every handler takes the pointer in scene space, clamps it to the safe area
//! edge it is moving toward, and converts it to a new edge position in local
//! units. The opposite edge stays fixed on screen. A moving left or top edge
//! shifts the crop offset with it so the image does not slide.
//!
//! Handlers return `true` when they updated the target.

#[cfg(test)]
#[path = "free_crop_test.rs"]
mod free_crop_test;

use crate::camera::Camera;
use crate::geometry::Point;
use crate::safe_area::SafeArea;
use crate::target::{CropTarget, OriginX, OriginY};

/// Move the left edge to the pointer; the right edge stays fixed.
pub fn crop_from_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let mut new_x = pointer.x;
    if camera.world_to_screen(pointer).x < safe.x {
        new_x = camera.screen_to_world(Point::new(safe.x, 0.0)).x;
    }

    let anchor = target.origin_point(OriginX::Right, OriginY::Center);
    let width = target.width;
    let min_width = target.min_width(min_size);
    let local = target.scene_to_local(Point::new(new_x, pointer.y));

    let mut change = local.x + width / 2.0;
    let mut new_width = width - change;

    if target.crop_x + change < 0.0 {
        change = -target.crop_x;
        new_width = width + target.crop_x;
    }
    if new_width <= min_width {
        change += new_width - min_width;
        new_width = min_width;
    }

    target.width = new_width;
    target.set_position_by_origin(anchor, OriginX::Right, OriginY::Center);
    target.crop_x += change;
    true
}

/// Move the top edge to the pointer; the bottom edge stays fixed.
pub fn crop_from_top(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let mut new_y = pointer.y;
    if camera.world_to_screen(pointer).y < safe.y {
        new_y = camera.screen_to_world(Point::new(0.0, safe.y)).y;
    }

    let anchor = target.origin_point(OriginX::Center, OriginY::Bottom);
    let height = target.height;
    let min_height = target.min_height(min_size);
    let local = target.scene_to_local(Point::new(pointer.x, new_y));

    let mut change = local.y + height / 2.0;
    let mut new_height = height - change;

    if target.crop_y + change < 0.0 {
        change = -target.crop_y;
        new_height = height + target.crop_y;
    }
    if new_height <= min_height {
        change += new_height - min_height;
        new_height = min_height;
    }

    target.height = new_height;
    target.set_position_by_origin(anchor, OriginX::Center, OriginY::Bottom);
    target.crop_y += change;
    true
}

/// Move the right edge to the pointer; the left edge stays fixed.
pub fn crop_from_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let mut new_x = pointer.x;
    if camera.world_to_screen(pointer).x > safe.right() {
        new_x = camera.screen_to_world(Point::new(safe.right(), 0.0)).x;
    }

    let mut anchor = target.origin_point(OriginX::Left, OriginY::Center);
    let width = target.width;
    let min_width = target.min_width(min_size);
    let local = target.scene_to_local(Point::new(new_x, pointer.y));

    let mut new_width = width / 2.0 + local.x;
    if target.crop_x + new_width > target.original.width {
        new_width = target.original.width - target.crop_x;
    }
    if new_width < min_width {
        new_width = min_width;
    }

    // A minimum-width box flush with the asset's right edge pushes the left edge out.
    let overflow = target.crop_x + new_width - target.original.width;
    if overflow > 0.0 {
        target.crop_x -= overflow;
        anchor.x -= overflow * target.scale;
    }

    target.width = new_width;
    target.set_position_by_origin(anchor, OriginX::Left, OriginY::Center);
    true
}

/// Move the bottom edge to the pointer; the top edge stays fixed.
pub fn crop_from_bottom(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let mut new_y = pointer.y;
    if camera.world_to_screen(pointer).y > safe.bottom() {
        new_y = camera.screen_to_world(Point::new(0.0, safe.bottom())).y;
    }

    let mut anchor = target.origin_point(OriginX::Center, OriginY::Top);
    let height = target.height;
    let min_height = target.min_height(min_size);
    let local = target.scene_to_local(Point::new(pointer.x, new_y));

    let mut new_height = height / 2.0 + local.y;
    if target.crop_y + new_height > target.original.height {
        new_height = target.original.height - target.crop_y;
    }
    if new_height < min_height {
        new_height = min_height;
    }

    let overflow = target.crop_y + new_height - target.original.height;
    if overflow > 0.0 {
        target.crop_y -= overflow;
        anchor.y -= overflow * target.scale;
    }

    target.height = new_height;
    target.set_position_by_origin(anchor, OriginX::Center, OriginY::Top);
    true
}

/// Move the left and top edges; the bottom-right corner stays fixed.
pub fn crop_from_top_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let left = crop_from_left(target, pointer, camera, safe, min_size);
    let top = crop_from_top(target, pointer, camera, safe, min_size);
    left || top
}

/// Move the right and top edges; the bottom-left corner stays fixed.
pub fn crop_from_top_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let right = crop_from_right(target, pointer, camera, safe, min_size);
    let top = crop_from_top(target, pointer, camera, safe, min_size);
    right || top
}

/// Move the left and bottom edges; the top-right corner stays fixed.
pub fn crop_from_bottom_left(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let left = crop_from_left(target, pointer, camera, safe, min_size);
    let bottom = crop_from_bottom(target, pointer, camera, safe, min_size);
    left || bottom
}

/// Move the right and bottom edges; the top-left corner stays fixed.
pub fn crop_from_bottom_right(target: &mut CropTarget, pointer: Point, camera: &Camera, safe: &SafeArea, min_size: f64) -> bool {
    let right = crop_from_right(target, pointer, camera, safe, min_size);
    let bottom = crop_from_bottom(target, pointer, camera, safe, min_size);
    right || bottom
}
