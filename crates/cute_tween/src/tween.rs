//! Leaf tweens: one interpolator wired to one target property
//!
//! Start values are read from the target when the leaf first runs, not when
//! it is built. A leaf placed later in a sequence therefore starts from
//! whatever the earlier steps left behind.

use crate::easing::Easing;
use crate::error::{check_timestep, Result, TweenError};
use crate::interpolator::Interpolator;
use crate::path::{JumpArc, ShakeParams, ShakePath};
use crate::target::{Animatable, Axis, Channel, ScalarChannel, TargetRef};
use glam::Vec3;
use std::ops::Add;

/// How the end value of a leaf is resolved when it starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint<V> {
    /// Move to this value
    To(V),
    /// Move by this amount from the captured start
    By(V),
}

impl<V: Copy + Add<Output = V>> Endpoint<V> {
    fn resolve(self, start: V) -> V {
        match self {
            Endpoint::To(v) => v,
            Endpoint::By(delta) => start + delta,
        }
    }
}

#[derive(Clone, Debug)]
enum Motion {
    Vector {
        channel: Channel,
        end: Endpoint<Vec3>,
        interp: Interpolator<Vec3>,
    },
    Scalar {
        channel: ScalarChannel,
        end: Endpoint<f32>,
        interp: Interpolator<f32>,
    },
    /// Procedural path around the captured position, driven by 0→1 progress
    Path {
        path: PositionPath,
        origin: Vec3,
        interp: Interpolator<f32>,
    },
}

#[derive(Clone, Debug)]
enum PositionPath {
    Shake(ShakePath),
    Jump(JumpArc),
}

impl PositionPath {
    fn sample(&self, t: f32) -> Vec3 {
        match self {
            PositionPath::Shake(path) => path.sample(t),
            PositionPath::Jump(arc) => arc.sample(t),
        }
    }
}

/// A single property tween on a target
#[derive(Clone)]
pub struct Tween {
    target: TargetRef,
    motion: Motion,
    started: bool,
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("motion", &self.motion)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl Tween {
    fn vector(target: &TargetRef, channel: Channel, end: Endpoint<Vec3>, duration: f32) -> Self {
        Self {
            target: target.clone(),
            motion: Motion::Vector {
                channel,
                end,
                interp: Interpolator::new(Vec3::ZERO, Vec3::ZERO, duration, Easing::default()),
            },
            started: false,
        }
    }

    fn scalar(
        target: &TargetRef,
        channel: ScalarChannel,
        end: Endpoint<f32>,
        duration: f32,
    ) -> Self {
        Self {
            target: target.clone(),
            motion: Motion::Scalar {
                channel,
                end,
                interp: Interpolator::new(0.0, 0.0, duration, Easing::default()),
            },
            started: false,
        }
    }

    fn path(target: &TargetRef, path: PositionPath, duration: f32) -> Self {
        Self {
            target: target.clone(),
            motion: Motion::Path {
                path,
                origin: Vec3::ZERO,
                interp: Interpolator::new(0.0, 1.0, duration, Easing::default()),
            },
            started: false,
        }
    }

    /// Scale uniformly or per-axis to `to`
    pub fn scale(target: &TargetRef, to: Vec3, duration: f32) -> Self {
        Self::vector(target, Channel::Scale, Endpoint::To(to), duration)
    }

    /// Scale a single axis to `to`
    pub fn scale_axis(target: &TargetRef, axis: Axis, to: f32, duration: f32) -> Self {
        Self::scalar(
            target,
            ScalarChannel::Component(Channel::Scale, axis),
            Endpoint::To(to),
            duration,
        )
    }

    /// Move to an absolute position
    pub fn move_to(target: &TargetRef, to: Vec3, duration: f32) -> Self {
        Self::vector(target, Channel::Position, Endpoint::To(to), duration)
    }

    /// Move a single position axis to `to`
    pub fn move_axis(target: &TargetRef, axis: Axis, to: f32, duration: f32) -> Self {
        Self::scalar(
            target,
            ScalarChannel::Component(Channel::Position, axis),
            Endpoint::To(to),
            duration,
        )
    }

    /// Rotate to absolute Euler angles (degrees)
    pub fn rotate_to(target: &TargetRef, to: Vec3, duration: f32) -> Self {
        Self::vector(target, Channel::Rotation, Endpoint::To(to), duration)
    }

    /// Rotate by Euler angles (degrees) relative to the rotation at start
    pub fn rotate_by(target: &TargetRef, delta: Vec3, duration: f32) -> Self {
        Self::vector(target, Channel::Rotation, Endpoint::By(delta), duration)
    }

    /// Fade opacity to `to`
    ///
    /// Fails with [`TweenError::MissingCapability`] when the target has no
    /// opacity channel.
    pub fn fade(target: &TargetRef, to: f32, duration: f32) -> Result<Self> {
        if !ScalarChannel::Opacity.supported_by(&*target.borrow()) {
            return Err(TweenError::MissingCapability {
                channel: ScalarChannel::Opacity.name(),
            });
        }
        Ok(Self::scalar(target, ScalarChannel::Opacity, Endpoint::To(to), duration))
    }

    /// Shake the position around where it is when the tween starts
    pub fn shake(target: &TargetRef, params: &ShakeParams, duration: f32) -> Self {
        Self::path(
            target,
            PositionPath::Shake(ShakePath::new(params, duration)),
            duration,
        )
    }

    /// Hop `jumps` times with peak `height`, landing back on the start position
    pub fn jump(target: &TargetRef, height: f32, jumps: u32, duration: f32) -> Self {
        Self::path(target, PositionPath::Jump(JumpArc::new(height, jumps)), duration)
    }

    /// Builder: set easing
    pub fn ease(mut self, easing: Easing) -> Self {
        let duration = self.duration();
        match &mut self.motion {
            Motion::Vector { interp, .. } => {
                *interp = Interpolator::new(interp.start(), interp.end(), duration, easing)
            }
            Motion::Scalar { interp, .. } | Motion::Path { interp, .. } => {
                *interp = Interpolator::new(interp.start(), interp.end(), duration, easing)
            }
        }
        self
    }

    pub fn duration(&self) -> f32 {
        match &self.motion {
            Motion::Vector { interp, .. } => interp.duration(),
            Motion::Scalar { interp, .. } | Motion::Path { interp, .. } => interp.duration(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.started
            && match &self.motion {
                Motion::Vector { interp, .. } => interp.is_finished(),
                Motion::Scalar { interp, .. } | Motion::Path { interp, .. } => interp.is_finished(),
            }
    }

    /// Capture start values from the target
    fn begin(&mut self) {
        let target = self.target.borrow();
        match &mut self.motion {
            Motion::Vector { channel, end, interp } => {
                let start = channel.read(&*target);
                interp.set_endpoints(start, end.resolve(start));
            }
            Motion::Scalar { channel, end, interp } => {
                let start = channel.read(&*target);
                interp.set_endpoints(start, end.resolve(start));
            }
            Motion::Path { origin, .. } => {
                *origin = target.position();
            }
        }
        drop(target);
        self.started = true;
    }

    /// Advance by `dt` and write the new value; returns whether the leaf finished
    pub fn advance(&mut self, dt: f32) -> Result<bool> {
        check_timestep(dt)?;
        if !self.started {
            self.begin();
        }

        let mut target = self.target.borrow_mut();
        let target: &mut dyn Animatable = &mut *target;
        let finished = match &mut self.motion {
            Motion::Vector { channel, interp, .. } => {
                let (value, done) = interp.advance(dt)?;
                channel.write(target, value);
                done
            }
            Motion::Scalar { channel, interp, .. } => {
                let (value, done) = interp.advance(dt)?;
                channel.write(target, value);
                done
            }
            Motion::Path { path, origin, interp } => {
                let (t, done) = interp.advance(dt)?;
                target.set_position(*origin + path.sample(t));
                done
            }
        };
        Ok(finished)
    }

    /// Stop the leaf; with `jump_to_end` the property is snapped to its configured end
    pub fn kill(&mut self, jump_to_end: bool) {
        if !jump_to_end {
            return;
        }
        if !self.started {
            self.begin();
        }

        let mut target = self.target.borrow_mut();
        let target: &mut dyn Animatable = &mut *target;
        match &mut self.motion {
            Motion::Vector { channel, interp, .. } => {
                channel.write(target, interp.configured_end());
                interp.finish();
            }
            Motion::Scalar { channel, interp, .. } => {
                channel.write(target, interp.configured_end());
                interp.finish();
            }
            Motion::Path { path, origin, interp } => {
                let end = interp.configured_end();
                target.set_position(*origin + path.sample(end));
                interp.finish();
            }
        }
    }

    /// Rewind to the start of a leg played forwards or, with `reversed`, backwards
    ///
    /// Captured endpoints are kept.
    pub(crate) fn orient(&mut self, reversed: bool) {
        match &mut self.motion {
            Motion::Vector { interp, .. } => orient(interp, reversed),
            Motion::Scalar { interp, .. } | Motion::Path { interp, .. } => orient(interp, reversed),
        }
    }

    /// Start and end value of a vector leaf, once started
    pub fn vector_endpoints(&self) -> Option<(Vec3, Vec3)> {
        match &self.motion {
            Motion::Vector { interp, .. } if self.started => Some((interp.start(), interp.end())),
            _ => None,
        }
    }

    /// Start and end value of a scalar leaf, once started
    pub fn scalar_endpoints(&self) -> Option<(f32, f32)> {
        match &self.motion {
            Motion::Scalar { interp, .. } if self.started => Some((interp.start(), interp.end())),
            _ => None,
        }
    }
}

fn orient<V: crate::interpolator::Lerp>(interp: &mut Interpolator<V>, reversed: bool) {
    if interp.is_reversed() == reversed {
        interp.reset();
    } else {
        interp.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Transform;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn target() -> (Rc<RefCell<Transform>>, TargetRef) {
        let concrete = Transform::new().shared();
        let target: TargetRef = concrete.clone();
        (concrete, target)
    }

    #[test]
    fn test_start_captured_on_first_advance() {
        let (concrete, target) = target();
        let mut tween = Tween::scale(&target, Vec3::splat(2.0), 1.0);

        // Change the property after building but before running
        concrete.borrow_mut().scale = Vec3::splat(0.5);

        tween.advance(0.5).unwrap();
        let (start, end) = tween.vector_endpoints().unwrap();
        assert_eq!(start, Vec3::splat(0.5));
        assert_eq!(end, Vec3::splat(2.0));
        assert!(concrete.borrow().scale.abs_diff_eq(Vec3::splat(1.25), 1e-5));
    }

    #[test]
    fn test_relative_rotation_resolves_from_start() {
        let (concrete, target) = target();
        concrete.borrow_mut().rotation = Vec3::new(0.0, 0.0, 30.0);

        let mut tween = Tween::rotate_by(&target, Vec3::new(0.0, 0.0, 360.0), 1.0);
        assert!(tween.advance(1.0).unwrap());
        assert_eq!(concrete.borrow().rotation, Vec3::new(0.0, 0.0, 390.0));
    }

    #[test]
    fn test_axis_tween_leaves_other_axes() {
        let (concrete, target) = target();
        concrete.borrow_mut().position = Vec3::new(1.0, 2.0, 3.0);

        let mut tween = Tween::move_axis(&target, Axis::Y, 12.0, 1.0);
        tween.advance(1.0).unwrap();
        assert_eq!(concrete.borrow().position, Vec3::new(1.0, 12.0, 3.0));
    }

    #[test]
    fn test_fade_requires_opacity() {
        let with: TargetRef = Transform::new().shared();
        let without: TargetRef = Transform::new().with_opacity(None).shared();

        assert!(Tween::fade(&with, 0.0, 1.0).is_ok());
        assert_eq!(
            Tween::fade(&without, 0.0, 1.0).unwrap_err(),
            TweenError::MissingCapability { channel: "opacity" }
        );
    }

    #[test]
    fn test_negative_dt_does_not_start() {
        let (concrete, target) = target();
        let mut tween = Tween::scale(&target, Vec3::ZERO, 1.0);

        assert!(tween.advance(-1.0).is_err());
        assert!(!tween.is_started());
        assert_eq!(concrete.borrow().scale, Vec3::ONE);
    }

    #[test]
    fn test_kill_jump_to_end_on_unstarted_leaf() {
        let (concrete, target) = target();
        let mut tween = Tween::move_to(&target, Vec3::new(5.0, 0.0, 0.0), 1.0);

        tween.kill(true);
        assert_eq!(concrete.borrow().position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_kill_in_place_keeps_value() {
        let (concrete, target) = target();
        let mut tween = Tween::move_to(&target, Vec3::new(10.0, 0.0, 0.0), 1.0);

        tween.advance(0.5).unwrap();
        tween.kill(false);
        assert!((concrete.borrow().position.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_lands_on_start() {
        let (concrete, target) = target();
        concrete.borrow_mut().position = Vec3::new(3.0, 4.0, 0.0);

        let mut tween = Tween::jump(&target, 50.0, 2, 1.0);
        tween.advance(0.25).unwrap();
        assert!((concrete.borrow().position.y - 54.0).abs() < 1e-3);

        tween.advance(0.75).unwrap();
        assert_eq!(concrete.borrow().position, Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_ease_builder_keeps_duration() {
        let (_, target) = target();
        let tween = Tween::scale(&target, Vec3::ONE, 0.3).ease(Easing::EaseOutBack);
        assert_eq!(tween.duration(), 0.3);
    }
}
