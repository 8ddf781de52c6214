//! Editor engine: turns host events into crop-target mutations and actions.
//!
//! `EngineCore` owns every piece of editor state and has no browser
//! dependencies, so the whole crop flow is testable natively. The
//! [`crate::wasm`] bindings wrap it for the JS host.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::animation::{AnimationFrame, AutoFill};
use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::{Point, Size};
use crate::handle::{self, HitPart, PointerKind};
use crate::input::{Button, InputState, WheelDelta};
use crate::safe_area::{SafeArea, SafeAreaPatch};
use crate::store::TargetStore;
use crate::target::{AspectRatio, CropState, CropTarget, TargetId};
use crate::zoom::{self, ZoomBounds};

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    RenderNeeded,
    SetCursor { cursor: String },
    ZoomChanged { percent: f64 },
    CropModified { state: CropState },
}

/// Everything the host needs to draw a frame or persist the edit.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub target: Option<CropTarget>,
    pub camera: Camera,
    pub safe_area: SafeArea,
    pub zoom_percent: f64,
    pub crop_state: Option<CropState>,
}

/// Core engine state.
pub struct EngineCore {
    pub store: TargetStore,
    pub camera: Camera,
    pub safe_area: SafeArea,
    pub config: EditorConfig,
    pub input: InputState,
    pub animation: Option<AutoFill>,
    zoom_percent: f64,
    cursor: &'static str,
    modified: bool,
    /// Crop window and aspect captured on entering crop mode, restored by reset.
    entry: Option<(CropState, AspectRatio)>,
    /// Crop window when the current gesture started.
    gesture_start: Option<CropState>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: TargetStore::new(),
            camera: Camera::default(),
            safe_area: SafeArea::default(),
            config,
            input: InputState::default(),
            animation: None,
            zoom_percent: 0.0,
            cursor: "default",
            modified: false,
            entry: None,
            gesture_start: None,
        }
    }

    // --- Asset lifecycle ---

    /// Replace the current image with a fresh target showing the whole asset.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidAssetSize`] unless both dimensions are positive.
    pub fn load_target(&mut self, width: f64, height: f64) -> Result<TargetId, EditorError> {
        let size = Size::new(width, height);
        if !size.is_positive() {
            warn!(width, height, "rejected asset size");
            return Err(EditorError::InvalidAssetSize { width, height });
        }

        self.input = InputState::Idle;
        self.animation = None;
        self.modified = false;
        self.entry = None;
        self.store.clear();
        let id = self.store.insert(CropTarget::new(size));
        self.refit_viewport();
        debug!(%id, width, height, "asset loaded");
        Ok(id)
    }

    /// Drop a target. Returns false for unknown ids.
    pub fn remove_target(&mut self, id: &TargetId) -> bool {
        let removed = self.store.remove(id).is_some();
        if removed && self.store.active_id().is_none() {
            self.input = InputState::Idle;
            self.animation = None;
            self.entry = None;
        }
        removed
    }

    // --- Layout ---

    /// Replace the safe area. Outside a gesture the viewport re-fits to it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DegenerateSafeArea`] for zero or negative sizes.
    pub fn set_safe_area(&mut self, area: SafeArea) -> Result<Vec<Action>, EditorError> {
        if area.is_degenerate() {
            warn!(?area, "rejected degenerate safe area");
            return Err(EditorError::DegenerateSafeArea);
        }
        self.safe_area = area;
        if !self.input.is_idle() || self.store.active().is_none() {
            return Ok(Vec::new());
        }
        self.animation = None;
        self.refit_viewport();
        Ok(vec![Action::RenderNeeded])
    }

    /// Apply a sparse layout update.
    ///
    /// # Errors
    ///
    /// Same as [`EngineCore::set_safe_area`] for the merged result.
    pub fn update_safe_area(&mut self, patch: &SafeAreaPatch) -> Result<Vec<Action>, EditorError> {
        let mut next = self.safe_area;
        next.apply_patch(patch);
        self.set_safe_area(next)
    }

    // --- Crop mode ---

    /// Show handles and start accepting crop gestures.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded.
    pub fn enter_crop(&mut self) -> Result<Vec<Action>, EditorError> {
        let target = self.store.active_mut().ok_or(EditorError::NoActiveTarget)?;
        if target.is_cropping {
            return Ok(Vec::new());
        }
        target.is_cropping = true;
        self.refit_viewport();

        let percent = self.current_zoom_percent();
        self.entry = self.store.active().map(|t| (t.crop_state(percent), t.aspect));
        self.modified = false;
        self.zoom_percent = percent;
        debug!(percent, "entered crop mode");
        Ok(vec![Action::ZoomChanged { percent }, Action::RenderNeeded])
    }

    /// Leave crop mode, reporting the final crop if anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded.
    pub fn exit_crop(&mut self) -> Result<Vec<Action>, EditorError> {
        let percent = self.current_zoom_percent();
        let target = self.store.active_mut().ok_or(EditorError::NoActiveTarget)?;
        if !target.is_cropping {
            return Ok(Vec::new());
        }
        target.is_cropping = false;
        let state = target.crop_state(percent);

        self.input = InputState::Idle;
        self.gesture_start = None;
        self.animation = None;
        self.entry = None;
        self.refit_viewport();

        let modified = std::mem::take(&mut self.modified);
        let mut actions = Vec::new();
        if modified {
            actions.push(Action::CropModified { state });
        }
        actions.push(Action::RenderNeeded);
        actions.extend(self.set_cursor("default"));
        debug!(modified, "exited crop mode");
        Ok(actions)
    }

    /// Undo every change made since entering crop mode.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded.
    pub fn reset_crop(&mut self) -> Result<Vec<Action>, EditorError> {
        let entry = self.entry;
        let target = self.store.active_mut().ok_or(EditorError::NoActiveTarget)?;
        match entry {
            Some((state, aspect)) => {
                target.aspect = aspect;
                target.apply_crop_state(&state);
            }
            None => {
                *target = CropTarget {
                    id: target.id,
                    is_cropping: target.is_cropping,
                    ..CropTarget::new(target.original)
                };
            }
        }

        self.input = InputState::Idle;
        self.animation = None;
        self.modified = false;
        self.refit_viewport();
        let percent = self.current_zoom_percent();
        self.zoom_percent = percent;
        debug!(percent, "crop reset");
        Ok(vec![Action::ZoomChanged { percent }, Action::RenderNeeded])
    }

    /// Restore a persisted crop window (e.g. a saved edit being reopened).
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded.
    pub fn apply_crop_state(&mut self, state: &CropState) -> Result<Vec<Action>, EditorError> {
        let id = self.store.active_id().ok_or(EditorError::NoActiveTarget)?;
        self.store.apply_crop_state(&id, state);
        self.animation = None;
        self.refit_viewport();
        self.zoom_percent = self.current_zoom_percent();
        Ok(vec![Action::ZoomChanged { percent: self.zoom_percent }, Action::RenderNeeded])
    }

    /// Lock (or unlock) the crop-box aspect ratio.
    ///
    /// Locking reshapes the box to the new ratio and animates the viewport to
    /// fit it. Outside crop mode a valid lock is ignored, like every other
    /// crop gesture.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidAspectRatio`] for a non-positive ratio,
    /// [`EditorError::DegenerateSafeArea`] before a layout exists, and
    /// [`EditorError::NoActiveTarget`] before an image is loaded.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) -> Result<Vec<Action>, EditorError> {
        let safe = self.safe_area;
        let zoom = self.camera.zoom;
        let target = self.store.active_mut().ok_or(EditorError::NoActiveTarget)?;
        match aspect {
            AspectRatio::Free => {
                target.aspect = AspectRatio::Free;
                debug!("aspect ratio unlocked");
                Ok(Vec::new())
            }
            AspectRatio::Fixed(ratio) => {
                if !ratio.is_finite() || ratio <= 0.0 {
                    return Err(EditorError::InvalidAspectRatio(ratio));
                }
                if safe.is_degenerate() {
                    return Err(EditorError::DegenerateSafeArea);
                }
                if !target.is_cropping {
                    debug!(ratio, "aspect lock ignored outside crop mode");
                    return Ok(Vec::new());
                }
                target.reset_to_aspect_ratio(ratio, &safe, zoom);
                debug!(ratio, width = target.width, height = target.height, "aspect ratio locked");
                self.modified = true;
                let mut actions = vec![Action::RenderNeeded];
                actions.extend(self.start_auto_fill());
                Ok(actions)
            }
        }
    }

    // --- Pointer input ---

    /// Begin a crop or image-pan gesture. Supersedes a running auto-fill.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, pointer: PointerKind) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let camera = self.camera;
        let Some(target) = self.store.active_mut() else {
            return Vec::new();
        };
        if !target.is_cropping {
            return Vec::new();
        }
        if self.animation.take().is_some() {
            debug!("auto-fill superseded by new gesture");
        }

        let hit = handle::hit_test(screen, target, &camera, pointer);
        if hit.is_some() {
            self.gesture_start = Some(target.crop_state(self.zoom_percent));
        }
        match hit {
            Some(HitPart::Handle(h)) => {
                target.setup_drag_matrix();
                self.input = InputState::Cropping { handle: h };
                debug!(handle = ?h, "crop gesture started");
            }
            Some(HitPart::Body) => {
                target.setup_drag_matrix();
                self.input = InputState::PanningImage { last_world: camera.screen_to_world(screen) };
                debug!("image pan started");
            }
            None => return Vec::new(),
        }
        self.set_cursor(handle::cursor_for(hit)).into_iter().collect()
    }

    /// Advance the active gesture, or update the hover cursor when idle.
    pub fn on_pointer_move(&mut self, screen: Point, pointer: PointerKind) -> Vec<Action> {
        let camera = self.camera;
        let safe = self.safe_area;
        let config = self.config;
        let Some(target) = self.store.active_mut() else {
            return Vec::new();
        };
        let world = camera.screen_to_world(screen);

        match self.input {
            InputState::Idle => {
                if !target.is_cropping {
                    return Vec::new();
                }
                let hit = handle::hit_test(screen, target, &camera, pointer);
                self.set_cursor(handle::cursor_for(hit)).into_iter().collect()
            }
            InputState::Cropping { handle } => {
                if handle::apply_crop(handle, target, world, &camera, &safe, &config) {
                    trace!(handle = ?handle, width = target.width, height = target.height, "crop");
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::PanningImage { last_world } => {
                self.input = InputState::PanningImage { last_world: world };
                if target.pan_image(world.sub(last_world)) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Finish the active gesture.
    ///
    /// A gesture that changed the crop window marks the edit modified and
    /// reports it; a finished crop also animates the viewport to fit the new
    /// box. A click that moved nothing only ends the gesture.
    pub fn on_pointer_up(&mut self, screen: Point, button: Button, pointer: PointerKind) -> Vec<Action> {
        if button != Button::Primary || self.input.is_idle() {
            return Vec::new();
        }
        let mut actions = self.on_pointer_move(screen, pointer);
        let finished = std::mem::take(&mut self.input);
        let start = self.gesture_start.take();
        let percent = self.zoom_percent;
        let Some(target) = self.store.active_mut() else {
            return actions;
        };
        target.setup_drag_matrix();
        let state = target.crop_state(percent);
        let changed = start.is_none_or(|start| state.window_differs(&start));
        debug!(gesture = ?finished, changed, width = target.width, height = target.height, "gesture finished");
        if !changed {
            return actions;
        }

        self.modified = true;
        if matches!(finished, InputState::Cropping { .. }) {
            actions.extend(self.start_auto_fill());
        }
        actions.push(Action::CropModified { state });
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// One wheel tick zooms by the configured factor around the crop box.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if delta.dy.abs() < f64::EPSILON || !self.input.is_idle() || self.safe_area.is_degenerate() {
            return Vec::new();
        }
        let safe = self.safe_area;
        let config = self.config;
        let Some(target) = self.store.active_mut() else {
            return Vec::new();
        };
        if !target.is_cropping {
            return Vec::new();
        }
        self.animation = None;

        let factor = zoom::wheel_zoom_factor(delta.dy, config.zoom_factor);
        let zoom = zoom::rescale(target, &mut self.camera, &safe, factor, config.crop_min_size);
        trace!(zoom, dy = delta.dy, "wheel zoom");
        self.modified = true;
        self.zoom_percent = self.current_zoom_percent();
        let Some(state) = self.crop_state() else {
            return Vec::new();
        };
        vec![
            Action::ZoomChanged { percent: self.zoom_percent },
            Action::CropModified { state },
            Action::RenderNeeded,
        ]
    }

    /// Slider input: jump to `percent` of the zoom range.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded and
    /// [`EditorError::DegenerateSafeArea`] before a layout exists.
    pub fn zoom_from_percent(&mut self, percent: f64) -> Result<Vec<Action>, EditorError> {
        if self.safe_area.is_degenerate() {
            return Err(EditorError::DegenerateSafeArea);
        }
        let safe = self.safe_area;
        let min_size = self.config.crop_min_size;
        let target = self.store.active_mut().ok_or(EditorError::NoActiveTarget)?;
        if !target.is_cropping {
            return Ok(Vec::new());
        }
        self.animation = None;
        zoom::zoom_from_percent(target, &mut self.camera, &safe, percent, min_size);
        self.modified = true;
        self.zoom_percent = self.current_zoom_percent();
        Ok(vec![Action::ZoomChanged { percent: self.zoom_percent }, Action::RenderNeeded])
    }

    // --- Auto-fill ---

    /// Animate the viewport so the crop box fills the safe area.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveTarget`] before an image is loaded and
    /// [`EditorError::DegenerateSafeArea`] before a layout exists.
    pub fn auto_fill(&mut self) -> Result<Vec<Action>, EditorError> {
        if self.store.active().is_none() {
            return Err(EditorError::NoActiveTarget);
        }
        if self.safe_area.is_degenerate() {
            return Err(EditorError::DegenerateSafeArea);
        }
        Ok(self.start_auto_fill())
    }

    /// Step the running animation to the host's frame timestamp.
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<Action> {
        let Some(anim) = self.animation.as_mut() else {
            return Vec::new();
        };
        let frame = anim.tick(now_ms);
        self.apply_frame(frame)
    }

    /// Jump a running animation to its end.
    pub fn finish_animation(&mut self) -> Vec<Action> {
        let Some(frame) = self.animation.as_ref().map(AutoFill::finish) else {
            return Vec::new();
        };
        self.apply_frame(frame)
    }

    fn start_auto_fill(&mut self) -> Vec<Action> {
        let Some(target) = self.store.active() else {
            return Vec::new();
        };
        if self.safe_area.is_degenerate() {
            return Vec::new();
        }
        let anim = AutoFill::new(target, &self.camera, &self.safe_area, self.config.auto_fill_duration_ms);
        debug!(to_zoom = anim.destination().zoom, "auto-fill started");
        self.animation = Some(anim);
        if self.config.auto_fill_duration_ms <= 0.0 {
            return self.finish_animation();
        }
        vec![Action::RenderNeeded]
    }

    fn apply_frame(&mut self, frame: AnimationFrame) -> Vec<Action> {
        self.camera = frame.camera;
        let Some(target) = self.store.active_mut() else {
            self.animation = None;
            return Vec::new();
        };
        target.left = frame.position.x;
        target.top = frame.position.y;
        if !frame.finished {
            return vec![Action::RenderNeeded];
        }

        target.setup_drag_matrix();
        self.animation = None;
        self.zoom_percent = self.current_zoom_percent();
        debug!(zoom = self.camera.zoom, percent = self.zoom_percent, "auto-fill finished");
        vec![Action::ZoomChanged { percent: self.zoom_percent }, Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn target(&self) -> Option<&CropTarget> {
        self.store.active()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.zoom_percent
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    /// Current zoom range, if an image and a layout exist.
    #[must_use]
    pub fn zoom_bounds(&self) -> Option<ZoomBounds> {
        if self.safe_area.is_degenerate() {
            return None;
        }
        let target = self.store.active()?;
        Some(zoom::zoom_bounds(&self.safe_area, target, self.config.crop_min_size))
    }

    #[must_use]
    pub fn crop_state(&self) -> Option<CropState> {
        self.store.active().map(|t| t.crop_state(self.zoom_percent))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            target: self.store.active().cloned(),
            camera: self.camera,
            safe_area: self.safe_area,
            zoom_percent: self.zoom_percent,
            crop_state: self.crop_state(),
        }
    }

    // --- Internals ---

    fn current_zoom_percent(&self) -> f64 {
        self.zoom_bounds().map_or(0.0, |b| zoom::scale_to_percent(self.camera.zoom, b))
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor { cursor: cursor.to_owned() })
    }

    /// Snap the viewport to the target: fit while cropping, cover otherwise.
    fn refit_viewport(&mut self) {
        if self.safe_area.is_degenerate() {
            return;
        }
        let safe = self.safe_area;
        let Some(target) = self.store.active_mut() else {
            return;
        };
        if target.is_cropping {
            let (dest, _) = zoom::auto_fill_destination(target, &safe);
            zoom::recenter(target, &mut self.camera, &safe, dest.zoom);
        } else {
            zoom::recenter_to_cover(target, &mut self.camera, &safe);
        }
    }
}
