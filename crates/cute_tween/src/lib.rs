//! CuteTween Core
//!
//! A small tween sequencer: time-based interpolators composed into trees,
//! driven by a caller-owned scheduler.
//!
//! # Features
//!
//! - **Easing**: the standard Quad/Cubic/Quart/Sine/Back/Elastic/Bounce curves
//! - **Tweens**: scale, move, rotate, fade, shake and jump leaves bound to a target
//! - **Trees**: sequences, parallel groups, restart and yoyo loops
//! - **Handles**: kill with optional jump-to-end, auto-kill on completion
//! - **Scheduler**: `register` / `tick_all` / `unregister`, callbacks run after each tick's writes
//!
//! # Example
//!
//! ```
//! use cute_tween::{Easing, TargetRef, Transform, Tween, TweenHandle, TweenNode, TweenScheduler};
//! use glam::Vec3;
//!
//! let scheduler = TweenScheduler::new();
//! let target: TargetRef = Transform::new().shared();
//!
//! let pop = TweenNode::sequence([
//!     Tween::scale(&target, Vec3::splat(1.2), 0.2).ease(Easing::EaseOutQuad),
//!     Tween::scale(&target, Vec3::ONE, 0.2).ease(Easing::EaseInQuad),
//! ]);
//! scheduler.register(TweenHandle::new(pop));
//!
//! while scheduler.has_active_animations() {
//!     scheduler.tick_all(1.0 / 60.0).unwrap();
//! }
//! ```

pub mod easing;
pub mod error;
pub mod handle;
pub mod interpolator;
pub mod node;
pub mod path;
pub mod scheduler;
pub mod target;
pub mod tween;

pub use easing::Easing;
pub use error::{Result, TweenError};
pub use handle::{HandleState, TweenHandle};
pub use interpolator::{Interpolator, Lerp};
pub use node::{Callback, LoopCount, LoopMode, TweenNode};
pub use path::{JumpArc, ShakeParams, ShakePath, MAX_SHAKE_WAYPOINTS};
pub use scheduler::{TweenId, TweenScheduler};
pub use target::{Animatable, Axis, Channel, ScalarChannel, TargetRef, Transform};
pub use tween::{Endpoint, Tween};
