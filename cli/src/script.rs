//! Replay scripts: a recorded crop session as JSON.
//!
//! ```json
//! {
//!   "asset": { "width": 1600, "height": 900 },
//!   "safe_area": { "x": 0, "y": 0, "width": 320, "height": 180 },
//!   "aspect_ratio": -1,
//!   "steps": [
//!     { "op": "enter_crop" },
//!     { "op": "pointer_down", "x": 320, "y": 180 },
//!     { "op": "pointer_up", "x": 160, "y": 90 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use pfp_canvas::config::EditorConfig;
use pfp_canvas::engine::{Action, EngineCore, Snapshot};
use pfp_canvas::error::EditorError;
use pfp_canvas::geometry::{Point, Size};
use pfp_canvas::handle::PointerKind;
use pfp_canvas::input::{Button, WheelDelta};
use pfp_canvas::safe_area::SafeArea;
use pfp_canvas::target::{AspectRatio, CropState};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub asset: Size,
    pub safe_area: SafeArea,
    /// A positive ratio enters crop mode and locks it before the steps run.
    /// `-1` or absent leaves the editor as loaded.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    /// Overrides for the environment-derived config.
    #[serde(default)]
    pub config: Option<EditorConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    EnterCrop,
    ExitCrop,
    Reset,
    AspectRatio { ratio: f64 },
    PointerDown { x: f64, y: f64, #[serde(default)] touch: bool },
    PointerMove { x: f64, y: f64, #[serde(default)] touch: bool },
    PointerUp { x: f64, y: f64, #[serde(default)] touch: bool },
    Wheel { dy: f64 },
    Zoom { percent: f64 },
    AutoFill,
    Frame { ms: f64 },
    FinishAnimation,
    SafeArea { x: f64, y: f64, width: f64, height: f64 },
    ApplyState { state: CropState },
}

/// Final engine state after a replay, plus every action emitted on the way.
#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: usize,
    pub snapshot: Snapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

fn pointer_kind(touch: bool) -> PointerKind {
    if touch { PointerKind::Touch } else { PointerKind::Mouse }
}

/// Run `script` against a fresh engine. Auto-fill animations still running at
/// the end are finished so the report shows the settled viewport.
///
/// # Errors
///
/// Returns the first [`EditorError`] a step produces.
pub fn replay(script: &Script, base: EditorConfig, keep_actions: bool) -> Result<Report, EditorError> {
    let config = script.config.unwrap_or(base).validate()?;
    let mut core = EngineCore::new(config);
    core.load_target(script.asset.width, script.asset.height)?;
    core.set_safe_area(script.safe_area)?;

    let mut actions = Vec::new();
    if let Some(ratio) = script.aspect_ratio {
        let aspect = AspectRatio::from_sentinel(ratio)?;
        if matches!(aspect, AspectRatio::Fixed(_)) {
            core.enter_crop()?;
            actions.extend(core.set_aspect_ratio(aspect)?);
        }
    }

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        let emitted = run_step(&mut core, step)?;
        if keep_actions {
            actions.extend(emitted);
        }
    }
    let settled = core.finish_animation();
    if keep_actions {
        actions.extend(settled);
    } else {
        actions.clear();
    }

    Ok(Report { steps: script.steps.len(), snapshot: core.snapshot(), actions })
}

fn run_step(core: &mut EngineCore, step: &Step) -> Result<Vec<Action>, EditorError> {
    let actions = match *step {
        Step::EnterCrop => core.enter_crop()?,
        Step::ExitCrop => core.exit_crop()?,
        Step::Reset => core.reset_crop()?,
        Step::AspectRatio { ratio } => core.set_aspect_ratio(AspectRatio::from_sentinel(ratio)?)?,
        Step::PointerDown { x, y, touch } => core.on_pointer_down(Point::new(x, y), Button::Primary, pointer_kind(touch)),
        Step::PointerMove { x, y, touch } => core.on_pointer_move(Point::new(x, y), pointer_kind(touch)),
        Step::PointerUp { x, y, touch } => core.on_pointer_up(Point::new(x, y), Button::Primary, pointer_kind(touch)),
        Step::Wheel { dy } => core.on_wheel(WheelDelta { dx: 0.0, dy }),
        Step::Zoom { percent } => core.zoom_from_percent(percent)?,
        Step::AutoFill => core.auto_fill()?,
        Step::Frame { ms } => core.on_frame(ms),
        Step::FinishAnimation => core.finish_animation(),
        Step::SafeArea { x, y, width, height } => core.set_safe_area(SafeArea::new(x, y, width, height))?,
        Step::ApplyState { state } => core.apply_crop_state(&state)?,
    };
    Ok(actions)
}

/// Parse `WxH`, e.g. `1600x900`.
#[must_use]
pub fn parse_size(raw: &str) -> Option<Size> {
    let (w, h) = raw.split_once(['x', 'X'])?;
    Some(Size::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Parse `X,Y,W,H`.
#[must_use]
pub fn parse_safe_area(raw: &str) -> Option<SafeArea> {
    let parts = raw.split(',').map(|p| p.trim().parse::<f64>()).collect::<Result<Vec<_>, _>>();
    match parts.as_deref() {
        Ok([x, y, w, h]) => Some(SafeArea::new(*x, *y, *w, *h)),
        _ => None,
    }
}
