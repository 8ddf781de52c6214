//! Input model: mouse buttons, wheel deltas, and the crop gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. It carries only what the move handler needs; the crop handlers
//! read everything else from the live target.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::handle::CropHandle;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` index. Unknown buttons are treated as secondary.
    #[must_use]
    pub fn from_dom(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            _ => Self::Secondary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; pointer moves only update the hover cursor.
    #[default]
    Idle,
    /// A handle is being dragged.
    Cropping {
        handle: CropHandle,
    },
    /// The image is being slid under the crop box.
    PanningImage {
        /// Scene-space pointer position at the previous event.
        last_world: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
