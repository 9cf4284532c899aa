//! Time-bounded interpolation of a single value

use crate::easing::Easing;
use crate::error::{check_timestep, Result};
use glam::Vec3;

/// Values that can be blended componentwise
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec3::lerp(self, to, t)
    }
}

/// Moves a value from `start` to `end` over `duration` seconds
///
/// `elapsed` never exceeds `duration`. Progress is the eased fraction of
/// elapsed time and the value is a linear blend at that progress, so
/// overshooting easings overshoot the value too. A finished interpolator
/// always holds exactly `end`.
#[derive(Clone, Debug)]
pub struct Interpolator<V> {
    start: V,
    end: V,
    duration: f32,
    easing: Easing,
    elapsed: f32,
    /// Toggled by every `reverse`; lets callers recover the configured end
    reversed: bool,
}

impl<V: Lerp> Interpolator<V> {
    pub fn new(start: V, end: V, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            easing,
            elapsed: 0.0,
            reversed: false,
        }
    }

    /// Advance by `dt` seconds, returning the new value and whether the end was reached
    pub fn advance(&mut self, dt: f32) -> Result<(V, bool)> {
        check_timestep(dt)?;
        self.elapsed = (self.elapsed + dt).min(self.duration);
        Ok((self.value(), self.is_finished()))
    }

    /// Eased progress (0.0 to 1.0 for non-overshooting easings)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply(self.elapsed / self.duration)
    }

    /// Get the current interpolated value
    ///
    /// Full progress yields exactly `end`, with no rounding from the blend.
    pub fn value(&self) -> V {
        if self.is_finished() {
            return self.end;
        }
        self.start.lerp(self.end, self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rewind to the start without touching the endpoints
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Swap the endpoints and rewind (one yoyo leg)
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.reversed = !self.reversed;
        self.elapsed = 0.0;
    }

    /// Undo any yoyo reversal and rewind
    pub fn rewind(&mut self) {
        if self.reversed {
            std::mem::swap(&mut self.start, &mut self.end);
            self.reversed = false;
        }
        self.elapsed = 0.0;
    }

    /// Jump to the end of the current leg
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Replace both endpoints, e.g. once the start value is read from a target
    pub fn set_endpoints(&mut self, start: V, end: V) {
        if self.reversed {
            self.start = end;
            self.end = start;
        } else {
            self.start = start;
            self.end = end;
        }
    }

    pub fn start(&self) -> V {
        self.start
    }

    pub fn end(&self) -> V {
        self.end
    }

    /// The end value as configured, regardless of yoyo reversal
    pub fn configured_end(&self) -> V {
        if self.reversed {
            self.start
        } else {
            self.end
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}
