#![allow(clippy::float_cmp)]

use super::*;
use crate::handle::CropHandle;

// =============================================================
// Helpers
// =============================================================

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn safe() -> SafeArea {
    SafeArea::new(0.0, 0.0, 320.0, 180.0)
}

/// 1600×900 asset in a 320×180 safe area, already in crop mode.
fn cropping_core() -> EngineCore {
    cropping_core_with(EditorConfig::default())
}

fn cropping_core_with(config: EditorConfig) -> EngineCore {
    let mut core = EngineCore::new(config);
    core.load_target(1600.0, 900.0).unwrap();
    core.set_safe_area(safe()).unwrap();
    core.enter_crop().unwrap();
    core
}

fn instant() -> EditorConfig {
    EditorConfig { auto_fill_duration_ms: 0.0, ..EditorConfig::default() }
}

fn target(core: &EngineCore) -> &CropTarget {
    core.target().unwrap()
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_crop_modified(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::CropModified { .. }))
}

fn cursor_set_to(actions: &[Action], expected: &str) -> bool {
    has_action(actions, |a| matches!(a, Action::SetCursor { cursor } if cursor == expected))
}

/// Drag the bottom-right handle to the safe-area center.
fn drag_corner_to_center(core: &mut EngineCore) -> Vec<Action> {
    let down = core.on_pointer_down(pt(320.0, 180.0), Button::Primary, PointerKind::Mouse);
    assert!(cursor_set_to(&down, "nwse-resize"));
    core.on_pointer_move(pt(160.0, 90.0), PointerKind::Mouse);
    core.on_pointer_up(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse)
}

// =============================================================
// Construction and lifecycle
// =============================================================

#[test]
fn core_new_is_empty() {
    let core = EngineCore::default();
    assert!(core.target().is_none());
    assert!(core.crop_state().is_none());
    assert!(core.zoom_bounds().is_none());
    assert!(!core.is_animating());
    assert_eq!(core.cursor(), "default");
}

#[test]
fn load_target_rejects_empty_asset() {
    let mut core = EngineCore::default();
    let err = core.load_target(0.0, 10.0).unwrap_err();
    assert!(matches!(err, EditorError::InvalidAssetSize { .. }));
}

#[test]
fn load_target_replaces_previous_image() {
    let mut core = EngineCore::default();
    let first = core.load_target(100.0, 100.0).unwrap();
    let second = core.load_target(200.0, 50.0).unwrap();
    assert_ne!(first, second);
    assert_eq!(core.store.active_id(), Some(second));
    assert!(!core.remove_target(&first));
    assert_eq!(target(&core).original, Size::new(200.0, 50.0));
}

#[test]
fn remove_target_returns_to_empty() {
    let mut core = cropping_core();
    let id = target(&core).id;
    assert!(core.remove_target(&id));
    assert!(core.target().is_none());
    assert!(!core.remove_target(&id));
}

#[test]
fn safe_area_covers_image_outside_crop_mode() {
    let mut core = EngineCore::default();
    core.load_target(1600.0, 1600.0).unwrap();
    let actions = core.set_safe_area(safe()).unwrap();
    assert!(has_render_needed(&actions));
    // Square image covering a 320×180 frame.
    assert!(approx(core.camera().zoom, 0.2));
}

#[test]
fn degenerate_safe_area_is_rejected() {
    let mut core = cropping_core();
    let err = core.set_safe_area(SafeArea::new(0.0, 0.0, 0.0, 100.0)).unwrap_err();
    assert!(matches!(err, EditorError::DegenerateSafeArea));
    assert_eq!(core.safe_area, safe());
}

#[test]
fn update_safe_area_merges_patch() {
    let mut core = cropping_core();
    let patch = SafeAreaPatch { width: Some(640.0), height: Some(360.0), ..Default::default() };
    core.update_safe_area(&patch).unwrap();
    assert_eq!(core.safe_area, SafeArea::new(0.0, 0.0, 640.0, 360.0));
    assert!(approx(core.camera().zoom, 0.4));
}

#[test]
fn safe_area_change_mid_gesture_defers_refit() {
    let mut core = cropping_core();
    core.on_pointer_down(pt(320.0, 180.0), Button::Primary, PointerKind::Mouse);
    let before = core.camera();
    let actions = core.set_safe_area(SafeArea::new(0.0, 0.0, 640.0, 360.0)).unwrap();
    assert!(actions.is_empty());
    assert_eq!(core.camera(), before);
}

// =============================================================
// Crop mode
// =============================================================

#[test]
fn operations_without_target_fail_or_noop() {
    let mut core = EngineCore::default();
    core.set_safe_area(safe()).unwrap();
    assert!(matches!(core.enter_crop(), Err(EditorError::NoActiveTarget)));
    assert!(matches!(core.exit_crop(), Err(EditorError::NoActiveTarget)));
    assert!(matches!(core.auto_fill(), Err(EditorError::NoActiveTarget)));
    assert!(core.on_pointer_down(pt(10.0, 10.0), Button::Primary, PointerKind::Mouse).is_empty());
    assert!(core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 }).is_empty());
    assert!(core.on_frame(16.0).is_empty());
}

#[test]
fn enter_crop_fits_box_to_safe_area() {
    let core = cropping_core();
    let t = target(&core);
    assert!(t.is_cropping);
    let b = t.box_limits(&core.camera());
    assert!(approx(b.left, 0.0) && approx(b.right, 320.0));
    assert!(approx(b.top, 0.0) && approx(b.bottom, 180.0));
    assert!(core.zoom_percent() < 1.0);
}

#[test]
fn enter_crop_twice_is_noop() {
    let mut core = cropping_core();
    assert!(core.enter_crop().unwrap().is_empty());
}

#[test]
fn exit_without_changes_reports_nothing() {
    let mut core = cropping_core();
    let actions = core.exit_crop().unwrap();
    assert!(!has_crop_modified(&actions));
    assert!(!target(&core).is_cropping);
}

#[test]
fn exit_after_crop_reports_final_state() {
    let mut core = cropping_core_with(instant());
    drag_corner_to_center(&mut core);
    let actions = core.exit_crop().unwrap();
    let state = actions.iter().find_map(|a| match a {
        Action::CropModified { state } => Some(*state),
        _ => None,
    });
    let state = state.expect("crop modified");
    assert!(approx(state.width, 0.5));
    assert!(approx(state.height, 0.5));
    assert!(!core.is_modified());
}

#[test]
fn reset_restores_entry_state() {
    let mut core = cropping_core_with(instant());
    drag_corner_to_center(&mut core);
    core.set_aspect_ratio(AspectRatio::Fixed(1.0)).unwrap();
    core.reset_crop().unwrap();

    let t = target(&core);
    assert!(approx(t.width, 1600.0) && approx(t.height, 900.0));
    assert_eq!((t.crop_x, t.crop_y), (0.0, 0.0));
    assert_eq!(t.aspect, AspectRatio::Free);
    assert!(t.is_cropping);
    assert!(!core.is_modified());
}

#[test]
fn apply_crop_state_restores_saved_window() {
    let mut core = cropping_core();
    let state = CropState { zoom_percent: 0.0, crop_x: 0.25, crop_y: 0.0, width: 0.5, height: 0.5 };
    core.apply_crop_state(&state).unwrap();
    let t = target(&core);
    assert!(approx(t.crop_x, 400.0));
    assert!(approx(t.width, 800.0));
    // Box re-fit to the safe area.
    assert!(approx(core.camera().zoom, 0.4));
}

// =============================================================
// Pointer gestures
// =============================================================

#[test]
fn non_primary_button_is_ignored() {
    let mut core = cropping_core();
    let actions = core.on_pointer_down(pt(320.0, 180.0), Button::Secondary, PointerKind::Mouse);
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_down_outside_box_does_nothing() {
    let mut core = cropping_core();
    core.update_safe_area(&SafeAreaPatch { x: Some(100.0), ..Default::default() }).unwrap();
    let actions = core.on_pointer_down(pt(10.0, 90.0), Button::Primary, PointerKind::Mouse);
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn gestures_require_crop_mode() {
    let mut core = EngineCore::default();
    core.load_target(1600.0, 900.0).unwrap();
    core.set_safe_area(safe()).unwrap();
    assert!(core.on_pointer_down(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse).is_empty());
    assert!(core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 }).is_empty());
}

#[test]
fn hover_sets_cursor_once() {
    let mut core = cropping_core();
    let first = core.on_pointer_move(pt(324.0, 184.0), PointerKind::Mouse);
    assert!(cursor_set_to(&first, "nwse-resize"));
    let again = core.on_pointer_move(pt(325.0, 185.0), PointerKind::Mouse);
    assert!(again.is_empty());
    let body = core.on_pointer_move(pt(160.0, 90.0), PointerKind::Mouse);
    assert!(cursor_set_to(&body, "move"));
}

#[test]
fn free_corner_drag_crops_and_reports() {
    let mut core = cropping_core();
    let actions = drag_corner_to_center(&mut core);
    assert!(has_crop_modified(&actions));
    assert!(has_render_needed(&actions));
    assert!(core.input.is_idle());
    assert!(core.is_modified());

    let t = target(&core);
    assert!(approx(t.width, 800.0));
    assert!(approx(t.height, 450.0));
    assert_eq!((t.crop_x, t.crop_y), (0.0, 0.0));
}

#[test]
fn crop_drag_marks_gesture_state() {
    let mut core = cropping_core();
    core.on_pointer_down(pt(320.0, 180.0), Button::Primary, PointerKind::Mouse);
    assert_eq!(core.input, InputState::Cropping { handle: CropHandle::Se });
    let moved = core.on_pointer_move(pt(200.0, 120.0), PointerKind::Mouse);
    assert!(has_render_needed(&moved));
}

#[test]
fn finished_crop_auto_fills_the_viewport() {
    let mut core = cropping_core();
    drag_corner_to_center(&mut core);
    assert!(core.is_animating());

    let first = core.on_frame(1000.0);
    assert!(has_render_needed(&first));
    assert!(core.is_animating());

    let mid = core.on_frame(1100.0);
    assert!(!has_action(&mid, |a| matches!(a, Action::ZoomChanged { .. })));
    assert!(core.camera().zoom > 0.2 && core.camera().zoom < 0.4);

    let last = core.on_frame(1200.0);
    assert!(has_action(&last, |a| matches!(a, Action::ZoomChanged { .. })));
    assert!(!core.is_animating());
    assert!(approx(core.camera().zoom, 0.4));

    let b = target(&core).box_limits(&core.camera());
    assert!(approx(b.left, 0.0) && approx(b.right, 320.0));
    assert!(core.zoom_percent() > 0.0 && core.zoom_percent() < 100.0);
}

#[test]
fn zero_duration_auto_fill_is_immediate() {
    let mut core = cropping_core_with(instant());
    drag_corner_to_center(&mut core);
    assert!(!core.is_animating());
    assert!(approx(core.camera().zoom, 0.4));
}

#[test]
fn new_gesture_supersedes_animation() {
    let mut core = cropping_core();
    drag_corner_to_center(&mut core);
    assert!(core.is_animating());
    core.on_pointer_down(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse);
    assert!(!core.is_animating());
}

#[test]
fn auto_fill_is_idempotent() {
    let mut core = cropping_core_with(instant());
    drag_corner_to_center(&mut core);
    let settled = core.camera();
    core.auto_fill().unwrap();
    assert_eq!(core.camera(), settled);
    assert!(core.finish_animation().is_empty());
}

#[test]
fn body_drag_pans_image_under_box() {
    let mut core = cropping_core_with(instant());
    core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 });
    let before = target(&core).crop_x;
    assert!(before > 0.0);

    let down = core.on_pointer_down(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse);
    assert!(cursor_set_to(&down, "move"));
    let moved = core.on_pointer_move(pt(165.0, 90.0), PointerKind::Mouse);
    assert!(has_render_needed(&moved));
    assert!(target(&core).crop_x < before);

    let up = core.on_pointer_up(pt(165.0, 90.0), Button::Primary, PointerKind::Mouse);
    assert!(has_crop_modified(&up));
    // Panning does not re-fit the viewport.
    assert!(!core.is_animating());
}

#[test]
fn click_without_drag_is_not_a_modification() {
    let mut core = cropping_core();
    core.on_pointer_down(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse);
    let up = core.on_pointer_up(pt(160.0, 90.0), Button::Primary, PointerKind::Mouse);
    assert!(!has_crop_modified(&up));
    assert!(core.input.is_idle());
    assert!(!core.is_modified());

    let exit = core.exit_crop().unwrap();
    assert!(!has_crop_modified(&exit));
}

#[test]
fn handle_click_without_drag_keeps_viewport() {
    let mut core = cropping_core();
    let camera = core.camera();
    core.on_pointer_down(pt(320.0, 180.0), Button::Primary, PointerKind::Mouse);
    let up = core.on_pointer_up(pt(320.0, 180.0), Button::Primary, PointerKind::Mouse);
    assert!(!has_crop_modified(&up));
    assert!(!core.is_animating());
    assert_eq!(core.camera(), camera);
    assert!(!core.is_modified());
}

// =============================================================
// Aspect ratio
// =============================================================

#[test]
fn locking_aspect_reshapes_and_animates() {
    let mut core = cropping_core();
    let actions = core.set_aspect_ratio(AspectRatio::Fixed(1.0)).unwrap();
    assert!(has_render_needed(&actions));
    assert!(core.is_animating());

    let t = target(&core);
    assert_eq!(t.aspect, AspectRatio::Fixed(1.0));
    assert!(approx(t.width, t.height));
    assert!(t.crop_x + t.width <= 1600.0 + 1e-6);

    core.finish_animation();
    let b = target(&core).box_limits(&core.camera());
    assert!(approx(b.bottom - b.top, 180.0));
}

#[test]
fn unlocking_aspect_keeps_box() {
    let mut core = cropping_core_with(instant());
    core.set_aspect_ratio(AspectRatio::Fixed(1.0)).unwrap();
    let size = target(&core).size();
    core.set_aspect_ratio(AspectRatio::Free).unwrap();
    assert_eq!(target(&core).aspect, AspectRatio::Free);
    assert_eq!(target(&core).size(), size);
}

#[test]
fn aspect_lock_is_ignored_outside_crop_mode() {
    let mut core = EngineCore::default();
    core.load_target(1600.0, 900.0).unwrap();
    core.set_safe_area(safe()).unwrap();
    let camera = core.camera();

    let actions = core.set_aspect_ratio(AspectRatio::Fixed(1.0)).unwrap();
    assert!(actions.is_empty());
    assert!(!core.is_animating());
    assert!(!core.is_modified());
    assert_eq!(core.camera(), camera);
    let t = target(&core);
    assert_eq!(t.aspect, AspectRatio::Free);
    assert_eq!(t.size(), Size::new(1600.0, 900.0));

    // Validation still applies.
    let err = core.set_aspect_ratio(AspectRatio::Fixed(-2.0)).unwrap_err();
    assert!(matches!(err, EditorError::InvalidAspectRatio(_)));
}

#[test]
fn invalid_aspect_is_rejected() {
    let mut core = cropping_core();
    let err = core.set_aspect_ratio(AspectRatio::Fixed(0.0)).unwrap_err();
    assert!(matches!(err, EditorError::InvalidAspectRatio(_)));
}

#[test]
fn fixed_corner_drag_keeps_ratio() {
    let mut core = cropping_core_with(instant());
    core.set_aspect_ratio(AspectRatio::Fixed(16.0 / 9.0)).unwrap();
    drag_corner_to_center(&mut core);
    let t = target(&core);
    assert!((t.width / t.height - 16.0 / 9.0).abs() < 1e-6);
    assert!(t.width < 1600.0);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn wheel_zooms_in_and_reports() {
    let mut core = cropping_core();
    let start = core.camera().zoom;
    let actions = core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 });
    assert!(has_action(&actions, |a| matches!(a, Action::ZoomChanged { percent } if *percent > 0.0)));
    assert!(has_crop_modified(&actions));
    assert!(approx(core.camera().zoom, start * core.config.zoom_factor));
    assert!(target(&core).width < 1600.0);
}

#[test]
fn wheel_out_at_minimum_holds() {
    let mut core = cropping_core();
    let start = core.camera().zoom;
    core.on_wheel(WheelDelta { dx: 0.0, dy: 1.0 });
    assert!(approx(core.camera().zoom, start));
    assert!(approx(target(&core).width, 1600.0));
}

#[test]
fn horizontal_only_wheel_is_ignored() {
    let mut core = cropping_core();
    assert!(core.on_wheel(WheelDelta { dx: 5.0, dy: 0.0 }).is_empty());
}

#[test]
fn repeated_wheel_is_monotonic_and_bounded() {
    let mut core = cropping_core();
    let mut last = core.zoom_percent();
    for _ in 0..150 {
        core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 });
        assert!(core.zoom_percent() >= last - 1e-9);
        last = core.zoom_percent();
    }
    let bounds = core.zoom_bounds().unwrap();
    assert!(core.camera().zoom <= bounds.max + 1e-9);
    assert!(approx(last, 100.0));
}

#[test]
fn slider_jumps_to_percent() {
    let mut core = cropping_core();
    let actions = core.zoom_from_percent(100.0).unwrap();
    assert!(has_render_needed(&actions));
    assert!(approx(core.zoom_percent(), 100.0));
    core.zoom_from_percent(0.0).unwrap();
    assert!(core.zoom_percent() < 1.0);
}

// =============================================================
// Snapshot and wire format
// =============================================================

#[test]
fn snapshot_serializes_view_state() {
    let core = cropping_core();
    let json = serde_json::to_value(core.snapshot()).unwrap();
    assert!(json["camera"]["zoom"].is_number());
    assert_eq!(json["target"]["is_cropping"], true);
    assert_eq!(json["crop_state"]["width"], 1.0);
}

#[test]
fn actions_serialize_with_type_tag() {
    let json = serde_json::to_value(Action::ZoomChanged { percent: 12.5 }).unwrap();
    assert_eq!(json["type"], "zoom_changed");
    assert_eq!(json["percent"], 12.5);
    let json = serde_json::to_value(Action::SetCursor { cursor: "move".into() }).unwrap();
    assert_eq!(json["type"], "set_cursor");
}
