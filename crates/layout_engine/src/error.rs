//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid box: {width} x {height} (dimensions must be non-negative)")]
    InvalidBox { width: f32, height: f32 },

    #[error("Invalid font size range: [{min}, {max}]")]
    InvalidFontRange { min: f32, max: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
