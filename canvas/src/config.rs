//! Editor tuning parsed from host JSON or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{AUTO_FILL_DURATION_MS, CROP_MIN_SIZE, MIN_PIXEL_OFFSET, ZOOM_FACTOR};
use crate::error::ConfigError;

/// Constants the crop engine needs from its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum crop-box edge length, in asset pixels.
    pub crop_min_size: f64,
    /// Minimum viewport-pixel gap between a moving edge and the fixed edge.
    pub min_pixel_offset: f64,
    /// Per-wheel-tick multiplicative zoom step (> 1).
    pub zoom_factor: f64,
    /// Auto-fill animation length; 0 snaps immediately.
    pub auto_fill_duration_ms: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            crop_min_size: CROP_MIN_SIZE,
            min_pixel_offset: MIN_PIXEL_OFFSET,
            zoom_factor: ZOOM_FACTOR,
            auto_fill_duration_ms: AUTO_FILL_DURATION_MS,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `PFP_CROP_MIN_SIZE`: default 20
    /// - `PFP_MIN_PIXEL_OFFSET`: default 10
    /// - `PFP_ZOOM_FACTOR`: default 1.05
    /// - `PFP_AUTO_FILL_DURATION_MS`: default 200
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but unparsable or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self {
            crop_min_size: env_parse_f64("PFP_CROP_MIN_SIZE", defaults.crop_min_size)?,
            min_pixel_offset: env_parse_f64("PFP_MIN_PIXEL_OFFSET", defaults.min_pixel_offset)?,
            zoom_factor: env_parse_f64("PFP_ZOOM_FACTOR", defaults.zoom_factor)?,
            auto_fill_duration_ms: env_parse_f64("PFP_AUTO_FILL_DURATION_MS", defaults.auto_fill_duration_ms)?,
        }
        .validate()
    }

    /// Parse a (possibly partial) JSON object; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON or out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(raw)?.validate()
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first bad field.
    pub fn validate(self) -> Result<Self, ConfigError> {
        check(self.crop_min_size, "crop_min_size", "a positive number", |v| v > 0.0)?;
        check(self.min_pixel_offset, "min_pixel_offset", "zero or positive", |v| v >= 0.0)?;
        check(self.zoom_factor, "zoom_factor", "greater than 1", |v| v > 1.0)?;
        check(self.auto_fill_duration_ms, "auto_fill_duration_ms", "zero or positive", |v| v >= 0.0)?;
        Ok(self)
    }
}

fn check(value: f64, field: &'static str, requirement: &'static str, ok: impl Fn(f64) -> bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, requirement, value })
    }
}

fn env_parse_f64(key: &str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidValue { key: key.to_owned(), value: raw.clone() })
}
