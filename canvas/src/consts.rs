//! Shared numeric constants for the canvas crate.

// ── Cropping ────────────────────────────────────────────────────

/// Minimum crop-box edge length, in asset pixels.
pub const CROP_MIN_SIZE: f64 = 20.0;

/// Minimum viewport-pixel gap kept between a moving edge and its fixed edge.
pub const MIN_PIXEL_OFFSET: f64 = 10.0;

/// Wire sentinel for "no fixed aspect ratio".
pub const FREE_ASPECT_SENTINEL: f64 = -1.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Multiplicative zoom step per wheel tick.
pub const ZOOM_FACTOR: f64 = 1.05;

/// Exponent of the slider-percent to zoom-scale curve.
pub const ZOOM_SMOOTHING_FACTOR: i32 = 4;

/// Edge of the nominal square whose fit into the safe area bounds zoom-in.
pub const MAX_ZOOM_NOMINAL_SIZE: f64 = 10.0;

/// Duration of the auto-fill viewport animation.
pub const AUTO_FILL_DURATION_MS: f64 = 200.0;

// ── Handles ─────────────────────────────────────────────────────

/// Outward offset of each handle from the crop-box outline, in viewport pixels.
pub const HANDLE_OFFSET_PX: f64 = 4.0;

/// Square hit area of a handle for mouse input, in viewport pixels.
pub const HANDLE_SIZE_PX: f64 = 35.0;

/// Square hit area of a handle for touch input, in viewport pixels.
pub const TOUCH_HANDLE_SIZE_PX: f64 = 48.0;
