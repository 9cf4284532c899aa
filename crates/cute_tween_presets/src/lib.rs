//! CuteTween Presets
//!
//! Eighteen ready-made UI micro-animations built on the `cute_tween` core,
//! and a registry for creating them by name.
//!
//! ```
//! use cute_tween::{TargetRef, Transform, TweenScheduler};
//! use cute_tween_presets::{PresetId, PresetRegistry};
//!
//! let registry = PresetRegistry::builtin();
//! let scheduler = TweenScheduler::new();
//! let target: TargetRef = Transform::new().shared();
//!
//! let mut bounce = registry.create(PresetId::Bounce).unwrap();
//! bounce.play(&scheduler, &target, None).unwrap();
//! while scheduler.has_active_animations() {
//!     scheduler.tick_all(1.0 / 60.0).unwrap();
//! }
//! ```

pub mod error;
pub mod id;
pub mod presets;
pub mod registry;

pub use error::{PresetError, Result};
pub use id::PresetId;
pub use presets::{
    Appear, Bounce, BouncyEntrance, CardHover, ElasticStretch, FloatingHover, Jump, PageFlip,
    PaperDrop, Preset, Press, Pulse, Shake, Slide, Spin, SquishyPop, Swing, Tilt, WigglyDance,
};
pub use registry::{PresetFactory, PresetRegistry};
