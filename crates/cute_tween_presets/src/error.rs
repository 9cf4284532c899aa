//! Preset error types

use cute_tween::TweenError;
use thiserror::Error;

/// Errors raised by the preset layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    /// No preset is registered under this identifier
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Tween(#[from] TweenError),
}

/// Result type for preset operations
pub type Result<T> = std::result::Result<T, PresetError>;
