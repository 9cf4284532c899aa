//! Scale-driven presets

use super::{kill_current, launch, DEFAULT_DURATION};
use crate::error::Result;
use cute_tween::{
    Axis, Callback, Easing, LoopCount, LoopMode, TargetRef, Tween, TweenId, TweenNode,
    TweenScheduler,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ============================================================================
// Appear
// ============================================================================

/// Grow from `initial_scale` to `final_scale` while fading back to the original opacity
///
/// Targets without an opacity channel just scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appear {
    pub duration: f32,
    pub initial_scale: Vec3,
    pub final_scale: Vec3,
    pub appear_ease: Easing,
    pub fade_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Appear {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            initial_scale: Vec3::ZERO,
            final_scale: Vec3::ONE,
            appear_ease: Easing::EaseOutQuart,
            fade_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Appear {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let original_opacity = target.borrow().opacity();
        {
            let mut t = target.borrow_mut();
            t.set_scale(self.initial_scale);
            if original_opacity.is_some() {
                t.set_opacity(0.0);
            }
        }

        let grow = Tween::scale(target, self.final_scale, self.duration).ease(self.appear_ease);
        let root = match original_opacity {
            Some(opacity) => {
                let fade = Tween::fade(target, opacity, self.duration)?.ease(self.fade_ease);
                TweenNode::parallel([fade, grow])
            }
            None => {
                warn!("appear target has no opacity channel, skipping fade");
                TweenNode::leaf(grow)
            }
        };

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Bounce
// ============================================================================

/// Grow in, overshoot to `final_scale * bounce_scale`, settle back
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounce {
    pub duration: f32,
    pub initial_scale: Vec3,
    pub final_scale: Vec3,
    pub bounce_scale: f32,
    pub bounce_duration: f32,
    pub ease_in: Easing,
    pub ease_bounce: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Bounce {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            initial_scale: Vec3::splat(0.5),
            final_scale: Vec3::ONE,
            bounce_scale: 1.2,
            bounce_duration: 0.2,
            ease_in: Easing::EaseOutBack,
            ease_bounce: Easing::EaseInOutElastic,
            current: None,
        }
    }
}

impl Bounce {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        target.borrow_mut().set_scale(self.initial_scale);

        let root = TweenNode::sequence([
            Tween::scale(target, self.final_scale, self.duration).ease(self.ease_in),
            Tween::scale(target, self.final_scale * self.bounce_scale, self.bounce_duration)
                .ease(Easing::EaseOutQuad),
            Tween::scale(target, self.final_scale, self.bounce_duration).ease(self.ease_bounce),
        ]);

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Pulse
// ============================================================================

/// Grow to `pulse_scale` and shrink back to 1
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pulse {
    /// Unused by the recipe; each half lasts `pulse_duration`
    pub duration: f32,
    pub pulse_scale: f32,
    pub pulse_duration: f32,
    pub pulse_ease_out: Easing,
    pub pulse_ease_in: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            pulse_scale: 1.2,
            pulse_duration: 0.5,
            pulse_ease_out: Easing::EaseOutQuad,
            pulse_ease_in: Easing::EaseInQuad,
            current: None,
        }
    }
}

impl Pulse {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let root = TweenNode::sequence([
            Tween::scale(target, Vec3::splat(self.pulse_scale), self.pulse_duration)
                .ease(self.pulse_ease_out),
            Tween::scale(target, Vec3::ONE, self.pulse_duration).ease(self.pulse_ease_in),
        ]);

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// SquishyPop
// ============================================================================

/// Squish horizontally while stretching vertically, then pop to `final_scale`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquishyPop {
    /// Unused by the recipe; each stage lasts `pop_duration`
    pub duration: f32,
    pub squish_scale_x: f32,
    pub squish_scale_y: f32,
    pub pop_duration: f32,
    pub final_scale: Vec3,
    pub squish_ease: Easing,
    pub scale_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for SquishyPop {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            squish_scale_x: 0.8,
            squish_scale_y: 1.2,
            pop_duration: 0.2,
            final_scale: Vec3::ONE,
            squish_ease: Easing::EaseOutBack,
            scale_ease: Easing::EaseOutElastic,
            current: None,
        }
    }
}

impl SquishyPop {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let squish = TweenNode::parallel([
            Tween::scale_axis(target, Axis::X, self.squish_scale_x, self.pop_duration)
                .ease(self.squish_ease),
            Tween::scale_axis(target, Axis::Y, self.squish_scale_y, self.pop_duration)
                .ease(Easing::EaseOutQuad),
        ]);
        let root = squish.then(
            Tween::scale(target, self.final_scale, self.pop_duration).ease(self.scale_ease),
        );

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// ElasticStretch
// ============================================================================

/// Stretch X by `stretch_factor`, then return to the original scale in half the time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticStretch {
    pub duration: f32,
    pub stretch_factor: f32,
    pub stretch_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for ElasticStretch {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            stretch_factor: 1.3,
            stretch_ease: Easing::EaseOutElastic,
            current: None,
        }
    }
}

impl ElasticStretch {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let original = target.borrow().scale();

        let root = TweenNode::sequence([
            Tween::scale_axis(target, Axis::X, original.x * self.stretch_factor, self.duration)
                .ease(self.stretch_ease),
            Tween::scale(target, original, self.duration / 2.0).ease(Easing::EaseOutQuad),
        ]);

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// PaperDrop
// ============================================================================

/// Scale in while spinning like a falling sheet of paper
///
/// The scale and the rotation are two separate handles. Only the scale handle
/// is tracked as current, so replaying kills the scale but leaves an earlier
/// rotation running. `on_complete` is attached to the rotation handle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperDrop {
    pub duration: f32,
    pub initial_scale: Vec3,
    pub final_scale: Vec3,
    pub final_rotation: Vec3,
    pub rotation_duration: f32,
    /// Rotation passes; -1 loops forever
    pub loops: i32,
    pub loop_mode: LoopMode,
    pub scale_ease: Easing,
    pub rotation_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for PaperDrop {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            initial_scale: Vec3::ZERO,
            final_scale: Vec3::ONE,
            final_rotation: Vec3::new(0.0, 0.0, 180.0),
            rotation_duration: 0.5,
            loops: 2,
            loop_mode: LoopMode::Yoyo,
            scale_ease: Easing::EaseOutBounce,
            rotation_ease: Easing::EaseOutBack,
            current: None,
        }
    }
}

impl PaperDrop {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        target.borrow_mut().set_scale(self.initial_scale);

        let scale = Tween::scale(target, self.final_scale, self.duration).ease(self.scale_ease);
        let id = launch(scheduler, scale, None);
        self.current = Some(id);

        let spin = TweenNode::leaf(
            Tween::rotate_to(target, self.final_rotation, self.rotation_duration)
                .ease(self.rotation_ease),
        )
        .looped(LoopCount::from_i32(self.loops), self.loop_mode);
        launch(scheduler, spin, on_complete);

        Ok(id)
    }
}
