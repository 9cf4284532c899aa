//! Animation targets and the property channels tweens write to
//!
//! A target is owned by the host. Tweens only hold a shared reference and
//! read/write the channels a preset touches.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An entity whose transform (and optionally opacity) can be animated
///
/// Rotation is a set of Euler angles in degrees. Values are never wrapped,
/// so a spin to 720° stays at 720°.
pub trait Animatable {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn rotation(&self) -> Vec3;
    fn set_rotation(&mut self, rotation: Vec3);

    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);

    /// Current opacity, or `None` when the target has no opacity channel
    fn opacity(&self) -> Option<f32> {
        None
    }

    /// Set opacity; targets without the channel ignore the write
    fn set_opacity(&mut self, _opacity: f32) {}

    fn has_opacity(&self) -> bool {
        self.opacity().is_some()
    }
}

/// Shared handle to a host-owned target
pub type TargetRef = Rc<RefCell<dyn Animatable>>;

/// Vector-valued transform channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

impl Channel {
    pub fn read(self, target: &dyn Animatable) -> Vec3 {
        match self {
            Channel::Position => target.position(),
            Channel::Rotation => target.rotation(),
            Channel::Scale => target.scale(),
        }
    }

    pub fn write(self, target: &mut dyn Animatable, value: Vec3) {
        match self {
            Channel::Position => target.set_position(value),
            Channel::Rotation => target.set_rotation(value),
            Channel::Scale => target.set_scale(value),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Position => "position",
            Channel::Rotation => "rotation",
            Channel::Scale => "scale",
        }
    }
}

/// A component axis of a vector channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    #[inline]
    pub fn with(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Scalar-valued channels: one axis of a transform channel, or opacity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarChannel {
    Component(Channel, Axis),
    Opacity,
}

impl ScalarChannel {
    pub fn read(self, target: &dyn Animatable) -> f32 {
        match self {
            ScalarChannel::Component(channel, axis) => axis.get(channel.read(target)),
            ScalarChannel::Opacity => target.opacity().unwrap_or(1.0),
        }
    }

    /// Write one component, leaving the other two untouched
    pub fn write(self, target: &mut dyn Animatable, value: f32) {
        match self {
            ScalarChannel::Component(channel, axis) => {
                let current = channel.read(target);
                channel.write(target, axis.with(current, value));
            }
            ScalarChannel::Opacity => target.set_opacity(value),
        }
    }

    /// Whether the target exposes this channel at all
    pub fn supported_by(self, target: &dyn Animatable) -> bool {
        match self {
            ScalarChannel::Component(..) => true,
            ScalarChannel::Opacity => target.has_opacity(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarChannel::Component(channel, _) => channel.name(),
            ScalarChannel::Opacity => "opacity",
        }
    }
}

impl fmt::Display for ScalarChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarChannel::Component(channel, axis) => write!(f, "{}.{:?}", channel.name(), axis),
            ScalarChannel::Opacity => f.write_str("opacity"),
        }
    }
}

/// Plain transform value, usable as a target by hosts without their own scene types
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// `None` models an entity without an opacity-capable renderer
    pub opacity: Option<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: Some(1.0),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set rotation (degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set or remove the opacity channel
    pub fn with_opacity(mut self, opacity: Option<f32>) -> Self {
        self.opacity = opacity;
        self
    }

    /// Wrap in the shared cell that tweens hold on to
    pub fn shared(self) -> Rc<RefCell<Transform>> {
        Rc::new(RefCell::new(self))
    }
}

impl Animatable for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn opacity(&self) -> Option<f32> {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        if let Some(current) = self.opacity.as_mut() {
            *current = opacity;
        }
    }
}
