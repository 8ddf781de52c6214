//! Error types for the editor boundary.
//!
//! Geometry code never fails: out-of-range drags are clamped or ignored. These
//! errors only cover invalid input at the edge of the crate (configuration,
//! asset loading, host calls made before an image exists).

/// Error returned while building an [`crate::config::EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was present but could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    /// A field parsed but is outside its allowed range.
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange { field: &'static str, requirement: &'static str, value: f64 },
    /// The JSON config supplied by the host is malformed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned by [`crate::engine::EngineCore`] operations that validate host input.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no image loaded")]
    NoActiveTarget,
    #[error("invalid asset size {width}x{height}")]
    InvalidAssetSize { width: f64, height: f64 },
    #[error("invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),
    #[error("safe area must have positive width and height")]
    DegenerateSafeArea,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
