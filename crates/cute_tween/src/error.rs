//! Tween error types

use thiserror::Error;

/// Errors raised while building or advancing tweens
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TweenError {
    /// A negative or NaN time step was passed to `advance`/`tick`
    #[error("invalid timestep: {0} (must be non-negative)")]
    InvalidTimestep(f32),

    /// The target does not expose a property channel the tween writes to
    #[error("target has no {channel} channel")]
    MissingCapability { channel: &'static str },
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;

/// Reject time steps that would move a tween backwards or poison it with NaN
#[inline]
pub(crate) fn check_timestep(dt: f32) -> Result<()> {
    if dt.is_nan() || dt < 0.0 {
        return Err(TweenError::InvalidTimestep(dt));
    }
    Ok(())
}
