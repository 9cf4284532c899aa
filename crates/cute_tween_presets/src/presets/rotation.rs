//! Rotation-driven presets
//!
//! Angles are Euler degrees. `Spin`, `WigglyDance` and `PageFlip` rotate
//! relative to the rotation at start; `Swing` and `Tilt` rotate to absolute
//! angles.

use super::{kill_current, launch, DEFAULT_DURATION};
use crate::error::Result;
use cute_tween::{
    Callback, Easing, LoopCount, LoopMode, TargetRef, Tween, TweenId, TweenNode, TweenScheduler,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

// ============================================================================
// Spin
// ============================================================================

/// Rotate by `rotation_axis`, past 360° without wrapping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spin {
    pub duration: f32,
    pub rotation_axis: Vec3,
    pub spin_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            rotation_axis: Vec3::new(0.0, 0.0, 360.0),
            spin_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Spin {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let spin = Tween::rotate_by(target, self.rotation_axis, self.duration).ease(self.spin_ease);

        let id = launch(scheduler, spin, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Swing
// ============================================================================

/// Swing to `swing_rotation` and back, as if hanging
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Swing {
    pub duration: f32,
    pub swing_rotation: Vec3,
    /// Legs to play; -1 loops forever
    pub swing_loops: i32,
    pub loop_mode: LoopMode,
    pub swing_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Swing {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            swing_rotation: Vec3::new(0.0, 0.0, 15.0),
            swing_loops: 6,
            loop_mode: LoopMode::Yoyo,
            swing_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Swing {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let swing = TweenNode::leaf(
            Tween::rotate_to(target, self.swing_rotation, self.duration).ease(self.swing_ease),
        )
        .looped(LoopCount::from_i32(self.swing_loops), self.loop_mode);

        let id = launch(scheduler, swing, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Tilt
// ============================================================================

/// Tilt to `tilt_rotation` and back
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tilt {
    pub duration: f32,
    pub tilt_rotation: Vec3,
    /// Legs to play; -1 loops forever
    pub tilt_loops: i32,
    pub loop_mode: LoopMode,
    pub tilt_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            tilt_rotation: Vec3::new(180.0, 0.0, 0.0),
            tilt_loops: 2,
            loop_mode: LoopMode::Yoyo,
            tilt_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Tilt {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let tilt = TweenNode::leaf(
            Tween::rotate_to(target, self.tilt_rotation, self.duration).ease(self.tilt_ease),
        )
        .looped(LoopCount::from_i32(self.tilt_loops), self.loop_mode);

        let id = launch(scheduler, tilt, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// WigglyDance
// ============================================================================

/// Wiggle around Z by ±`wiggle_angle`, then snap back to the starting rotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WigglyDance {
    pub duration: f32,
    pub wiggle_angle: f32,
    /// Passes of the wiggle; -1 loops forever
    pub wiggle_loops: i32,
    pub wiggle_ease: Easing,
    pub loop_mode: LoopMode,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for WigglyDance {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            wiggle_angle: 5.0,
            wiggle_loops: 1,
            wiggle_ease: Easing::EaseInOutSine,
            loop_mode: LoopMode::Yoyo,
            current: None,
        }
    }
}

impl WigglyDance {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let original = target.borrow().rotation();
        let half = self.duration / 2.0;
        let swing = Vec3::new(0.0, 0.0, self.wiggle_angle);

        let restore_target = target.clone();
        let restore: Callback = Rc::new(move || {
            restore_target.borrow_mut().set_rotation(original);
        });

        let wiggle = TweenNode::sequence([
            Tween::rotate_by(target, swing, half).ease(self.wiggle_ease),
            Tween::rotate_by(target, -swing, half).ease(self.wiggle_ease),
        ])
        .looped(LoopCount::from_i32(self.wiggle_loops), self.loop_mode)
        .on_complete(restore);

        let id = launch(scheduler, wiggle, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// PageFlip
// ============================================================================

/// Flip by `flip_rotation`; with `is_return`, flip back afterwards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFlip {
    pub duration: f32,
    pub is_return: bool,
    pub flip_rotation: Vec3,
    pub flip_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for PageFlip {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            is_return: false,
            flip_rotation: Vec3::new(0.0, 180.0, 0.0),
            flip_ease: Easing::EaseInOutBack,
            current: None,
        }
    }
}

impl PageFlip {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let flip = Tween::rotate_by(target, self.flip_rotation, self.duration).ease(self.flip_ease);
        let root = if self.is_return {
            TweenNode::sequence([
                flip,
                Tween::rotate_by(target, -self.flip_rotation, self.duration).ease(self.flip_ease),
            ])
        } else {
            TweenNode::leaf(flip)
        };

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}
