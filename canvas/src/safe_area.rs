//! Safe area: the viewport rectangle that bounds active content.
//!
//! When the user is not cropping, the safe area frames the whole (possibly
//! cropped) image. While cropping it frames the crop box. The layout updates it
//! whenever the viewport resizes; crop handlers only read it.

#[cfg(test)]
#[path = "safe_area_test.rs"]
mod safe_area_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Viewport-space rectangle usable for active content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Sparse update for a [`SafeArea`]. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SafeAreaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl SafeArea {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// A zero or negative dimension makes every zoom computation undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.size().is_positive()
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits { left: self.x, top: self.y, right: self.right(), bottom: self.bottom() }
    }

    pub fn apply_patch(&mut self, patch: &SafeAreaPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
    }
}

/// Per-side bounds in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Limits {
    /// The tighter bound on every side.
    #[must_use]
    pub fn intersect(&self, other: &Limits) -> Limits {
        Limits {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.left - tolerance
            && p.x <= self.right + tolerance
            && p.y >= self.top - tolerance
            && p.y <= self.bottom + tolerance
    }
}
