//! JavaScript bindings.
//!
//! `CropEditor` wraps [`EngineCore`] for the host page. Every mutating call
//! returns the resulting [`Action`] list as a JSON array; structured inputs
//! (config, safe-area patches, crop states) arrive as JSON strings.

use std::fmt::Display;

use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::engine::{Action, EngineCore};
use crate::error::EditorError;
use crate::geometry::Point;
use crate::handle::PointerKind;
use crate::input::{Button, WheelDelta};
use crate::safe_area::{SafeArea, SafeAreaPatch};
use crate::target::{AspectRatio, CropState};

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn actions_json(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(to_js)
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| to_js(EditorError::from(e)))
}

/// The crop/resize editor as seen from JavaScript.
#[wasm_bindgen]
pub struct CropEditor {
    core: EngineCore,
}

#[wasm_bindgen]
impl CropEditor {
    /// Create an editor. `config_json` overrides the defaults when present.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CropEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(to_js)?,
            None => EditorConfig::default(),
        };
        Ok(Self { core: EngineCore::new(config) })
    }

    // ─── Asset and layout ────────────────────────────────────────────────

    /// Load the image to crop. Returns the target id.
    pub fn load_image(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let id = self.core.load_target(width, height).map_err(to_js)?;
        Ok(id.to_string())
    }

    pub fn set_safe_area(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<String, JsValue> {
        let actions = self.core.set_safe_area(SafeArea::new(x, y, width, height)).map_err(to_js)?;
        actions_json(&actions)
    }

    /// Apply a partial layout update, e.g. `{"width": 640}`.
    pub fn update_safe_area(&mut self, patch_json: &str) -> Result<String, JsValue> {
        let patch: SafeAreaPatch = from_json(patch_json)?;
        let actions = self.core.update_safe_area(&patch).map_err(to_js)?;
        actions_json(&actions)
    }

    // ─── Crop mode ───────────────────────────────────────────────────────

    pub fn enter_crop(&mut self) -> Result<String, JsValue> {
        let actions = self.core.enter_crop().map_err(to_js)?;
        actions_json(&actions)
    }

    pub fn exit_crop(&mut self) -> Result<String, JsValue> {
        let actions = self.core.exit_crop().map_err(to_js)?;
        actions_json(&actions)
    }

    pub fn reset_crop(&mut self) -> Result<String, JsValue> {
        let actions = self.core.reset_crop().map_err(to_js)?;
        actions_json(&actions)
    }

    /// Lock the box to `ratio`; `-1` unlocks it.
    pub fn set_aspect_ratio(&mut self, ratio: f64) -> Result<String, JsValue> {
        let aspect = AspectRatio::from_sentinel(ratio).map_err(to_js)?;
        let actions = self.core.set_aspect_ratio(aspect).map_err(to_js)?;
        actions_json(&actions)
    }

    pub fn crop_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.crop_state()).map_err(to_js)
    }

    pub fn apply_crop_state(&mut self, state_json: &str) -> Result<String, JsValue> {
        let state: CropState = from_json(state_json)?;
        let actions = self.core.apply_crop_state(&state).map_err(to_js)?;
        actions_json(&actions)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// `button` is the DOM `MouseEvent.button`; `pointer_type` the DOM `PointerEvent.pointerType`.
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, pointer_type: &str) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_down(
            Point::new(x, y),
            Button::from_dom(button),
            PointerKind::from_pointer_type(pointer_type),
        );
        actions_json(&actions)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, pointer_type: &str) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_move(Point::new(x, y), PointerKind::from_pointer_type(pointer_type));
        actions_json(&actions)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, pointer_type: &str) -> Result<String, JsValue> {
        let actions = self.core.on_pointer_up(
            Point::new(x, y),
            Button::from_dom(button),
            PointerKind::from_pointer_type(pointer_type),
        );
        actions_json(&actions)
    }

    pub fn wheel(&mut self, dx: f64, dy: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_wheel(WheelDelta { dx, dy }))
    }

    // ─── Zoom and animation ──────────────────────────────────────────────

    pub fn zoom_from_percent(&mut self, percent: f64) -> Result<String, JsValue> {
        let actions = self.core.zoom_from_percent(percent).map_err(to_js)?;
        actions_json(&actions)
    }

    pub fn zoom_percent(&self) -> f64 {
        self.core.zoom_percent()
    }

    pub fn auto_fill(&mut self) -> Result<String, JsValue> {
        let actions = self.core.auto_fill().map_err(to_js)?;
        actions_json(&actions)
    }

    /// Call from `requestAnimationFrame` with its timestamp.
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_frame(now_ms))
    }

    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    /// Camera, target and crop state for drawing.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.snapshot()).map_err(to_js)
    }
}
