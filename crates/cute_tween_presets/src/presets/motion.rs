//! Position-driven presets

use super::{kill_current, launch, DEFAULT_DURATION};
use crate::error::Result;
use cute_tween::{
    Axis, Callback, Easing, LoopCount, LoopMode, ShakeParams, TargetRef, Tween, TweenId,
    TweenNode, TweenScheduler,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

// ============================================================================
// Shake
// ============================================================================

/// Horizontal-plane jitter around the current position, for errors and warnings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shake {
    pub duration: f32,
    pub shake_strength: f32,
    pub shake_vibrato: u32,
    pub shake_randomness: f32,
    pub shake_ease: Easing,
    /// Fixed seed for reproducible shakes
    pub seed: Option<u64>,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Shake {
    fn default() -> Self {
        let params = ShakeParams::default();
        Self {
            duration: DEFAULT_DURATION,
            shake_strength: params.strength,
            shake_vibrato: params.vibrato,
            shake_randomness: params.randomness,
            shake_ease: Easing::Linear,
            seed: params.seed,
            current: None,
        }
    }
}

impl Shake {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let params = ShakeParams {
            strength: self.shake_strength,
            vibrato: self.shake_vibrato,
            randomness: self.shake_randomness,
            seed: self.seed,
        };
        let shake = Tween::shake(target, &params, self.duration).ease(self.shake_ease);

        let id = launch(scheduler, shake, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Slide
// ============================================================================

/// Jump to `position + slide_direction`, then slide down by `slide_amount`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slide {
    pub duration: f32,
    pub slide_direction: Vec3,
    pub slide_amount: f32,
    pub slide_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            slide_direction: Vec3::new(0.0, 200.0, 0.0),
            slide_amount: 200.0,
            slide_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Slide {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let start = target.borrow().position() + self.slide_direction;
        target.borrow_mut().set_position(start);

        let slide = Tween::move_axis(target, Axis::Y, start.y - self.slide_amount, self.duration)
            .ease(self.slide_ease);

        let id = launch(scheduler, slide, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Jump
// ============================================================================

/// Hop `jump_count` times and land where it started
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jump {
    pub duration: f32,
    pub jump_height: f32,
    pub jump_count: u32,
    pub jump_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Jump {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            jump_height: 50.0,
            jump_count: 3,
            jump_ease: Easing::Linear,
            current: None,
        }
    }
}

impl Jump {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let jump = Tween::jump(target, self.jump_height, self.jump_count, self.duration)
            .ease(self.jump_ease);

        let id = launch(scheduler, jump, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// FloatingHover
// ============================================================================

/// Float up by `float_height` and back, forever by default
///
/// With infinite loops the completion callback is never reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingHover {
    /// Unused by the recipe; each leg lasts `float_speed`
    pub duration: f32,
    /// Legs to play; -1 loops forever
    pub loops: i32,
    pub float_height: f32,
    pub float_speed: f32,
    pub float_ease: Easing,
    pub loop_mode: LoopMode,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for FloatingHover {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            loops: -1,
            float_height: 10.0,
            float_speed: 1.0,
            float_ease: Easing::EaseInOutSine,
            loop_mode: LoopMode::Yoyo,
            current: None,
        }
    }
}

impl FloatingHover {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let base_y = target.borrow().position().y;
        let hover = TweenNode::leaf(
            Tween::move_axis(target, Axis::Y, base_y + self.float_height, self.float_speed)
                .ease(self.float_ease),
        )
        .looped(LoopCount::from_i32(self.loops), self.loop_mode);

        let id = launch(scheduler, hover, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// Press
// ============================================================================

/// Push down by `press_offset` and come back up
///
/// Unlike every other preset, replaying does not kill the previous press: the
/// earlier handle keeps running untracked while the new one becomes current.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Press {
    pub duration: f32,
    pub press_offset: f32,
    /// Legs to play; -1 loops forever
    pub loops: i32,
    pub loop_mode: LoopMode,
    pub press_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for Press {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            press_offset: 4.0,
            loops: 2,
            loop_mode: LoopMode::Yoyo,
            press_ease: Easing::EaseOutQuad,
            current: None,
        }
    }
}

impl Press {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        let base_y = target.borrow().position().y;
        let press = TweenNode::leaf(
            Tween::move_axis(target, Axis::Y, base_y - self.press_offset, self.duration / 2.0)
                .ease(self.press_ease),
        )
        .looped(LoopCount::from_i32(self.loops), self.loop_mode);

        let id = launch(scheduler, press, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// BouncyEntrance
// ============================================================================

/// Drop to `bounce_height` below the current position and bounce back up
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BouncyEntrance {
    pub duration: f32,
    pub bounce_height: f32,
    pub bounce_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for BouncyEntrance {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            bounce_height: 100.0,
            bounce_ease: Easing::EaseOutBounce,
            current: None,
        }
    }
}

impl BouncyEntrance {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let original = target.borrow().position();
        target
            .borrow_mut()
            .set_position(original - Vec3::new(0.0, self.bounce_height, 0.0));

        let entrance = Tween::move_axis(target, Axis::Y, original.y, self.duration)
            .ease(self.bounce_ease);

        let id = launch(scheduler, entrance, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}

// ============================================================================
// CardHover
// ============================================================================

/// Lift by `hover_height` while tilting to `hover_rotation`
///
/// With `is_return` the card drops back to its starting height afterwards;
/// the tilt stays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardHover {
    pub duration: f32,
    pub is_return: bool,
    pub hover_rotation: Vec3,
    pub hover_height: f32,
    pub hover_ease: Easing,
    #[serde(skip)]
    pub(crate) current: Option<TweenId>,
}

impl Default for CardHover {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            is_return: false,
            hover_rotation: Vec3::new(10.0, 0.0, 0.0),
            hover_height: 20.0,
            hover_ease: Easing::EaseOutQuad,
            current: None,
        }
    }
}

impl CardHover {
    pub fn play(
        &mut self,
        scheduler: &TweenScheduler,
        target: &TargetRef,
        on_complete: Option<Callback>,
    ) -> Result<TweenId> {
        kill_current(&mut self.current, scheduler);

        let initial_y = target.borrow().position().y;

        let lift = TweenNode::parallel([
            Tween::move_axis(target, Axis::Y, initial_y + self.hover_height, self.duration)
                .ease(self.hover_ease),
            Tween::rotate_to(target, self.hover_rotation, self.duration).ease(self.hover_ease),
        ]);
        let mut root = TweenNode::sequence([lift]);
        if self.is_return {
            root = root.then(
                Tween::move_axis(target, Axis::Y, initial_y, self.duration).ease(self.hover_ease),
            );
        }

        let id = launch(scheduler, root, on_complete);
        self.current = Some(id);
        Ok(id)
    }
}
