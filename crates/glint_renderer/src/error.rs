//! Error types for configuration validation and image output.

use thiserror::Error;

/// Camera settings that would make the viewport or sampling degenerate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Aspect ratio must be a positive finite number, got {0}")]
    AspectRatio(f64),

    #[error("Image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Vertical field of view must lie in (0, 180) degrees, got {0}")]
    FieldOfView(f64),

    #[error("Defocus angle must be a non-negative finite number, got {0}")]
    DefocusAngle(f64),

    #[error("Focus distance must be a positive finite number, got {0}")]
    FocusDistance(f64),

    #[error("Camera look_from and look_at must be distinct points")]
    DegenerateView,

    #[error("View up vector must not be parallel to the view direction")]
    DegenerateUp,
}

/// Failure while writing a finished image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
