//! The preset catalog
//!
//! Every preset follows the same contract when played:
//!
//! 1. a handle this preset is still running is killed in place (no jump)
//! 2. baseline values are read from the target before anything is written
//! 3. the tween tree is built and registered with the scheduler
//! 4. the new handle becomes the preset's current handle
//! 5. `on_complete` runs once on natural completion, after that tick's writes
//!
//! `Press` skips step 1 and `PaperDrop` only tracks its scale handle; see
//! their docs.

mod motion;
mod rotation;
mod scale;

pub use motion::{BouncyEntrance, CardHover, FloatingHover, Jump, Press, Shake, Slide};
pub use rotation::{PageFlip, Spin, Swing, Tilt, WigglyDance};
pub use scale::{Appear, Bounce, ElasticStretch, PaperDrop, Pulse, SquishyPop};

use crate::error::Result;
use crate::id::PresetId;
use cute_tween::{Callback, TargetRef, TweenHandle, TweenId, TweenNode, TweenScheduler};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default duration of every preset, in seconds
pub(crate) const DEFAULT_DURATION: f32 = 0.5;

macro_rules! preset_enum {
    ($($variant:ident),* $(,)?) => {
        /// A configured animation preset
        ///
        /// Deserializes from a table tagged with `preset = "<snake_case name>"`;
        /// every other field is optional and falls back to its default.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "preset", rename_all = "snake_case")]
        pub enum Preset {
            $($variant($variant),)*
        }

        impl Preset {
            /// A preset with its default configuration
            pub fn default_for(id: PresetId) -> Self {
                match id {
                    $(PresetId::$variant => Preset::$variant($variant::default()),)*
                }
            }

            pub fn id(&self) -> PresetId {
                match self {
                    $(Preset::$variant(_) => PresetId::$variant,)*
                }
            }

            /// Play on `target`, returning the handle stored as current
            pub fn play(
                &mut self,
                scheduler: &TweenScheduler,
                target: &TargetRef,
                on_complete: Option<Callback>,
            ) -> Result<TweenId> {
                let id = match self {
                    $(Preset::$variant(preset) => preset.play(scheduler, target, on_complete),)*
                }?;
                debug!(preset = %self.id(), tween = ?id, "preset playing");
                Ok(id)
            }

            /// Base duration in seconds
            pub fn duration(&self) -> f32 {
                match self {
                    $(Preset::$variant(preset) => preset.duration,)*
                }
            }

            pub fn set_duration(&mut self, duration: f32) {
                match self {
                    $(Preset::$variant(preset) => preset.duration = duration,)*
                }
            }

            /// Handle of the most recent `play`, if any
            pub fn current(&self) -> Option<TweenId> {
                match self {
                    $(Preset::$variant(preset) => preset.current,)*
                }
            }
        }

        $(
            impl From<$variant> for Preset {
                fn from(preset: $variant) -> Self {
                    Preset::$variant(preset)
                }
            }

            impl $variant {
                /// Handle of the most recent `play`, if any
                pub fn current(&self) -> Option<TweenId> {
                    self.current
                }
            }
        )*
    };
}

preset_enum!(
    Appear,
    Bounce,
    Shake,
    Spin,
    Slide,
    Pulse,
    Swing,
    PaperDrop,
    Jump,
    Tilt,
    SquishyPop,
    FloatingHover,
    ElasticStretch,
    Press,
    WigglyDance,
    PageFlip,
    BouncyEntrance,
    CardHover,
);

/// Silently kill the handle a preset is still running
pub(crate) fn kill_current(current: &mut Option<TweenId>, scheduler: &TweenScheduler) {
    if let Some(id) = current.take() {
        if scheduler.kill(id, false) {
            debug!(tween = ?id, "killed previous preset run");
        }
    }
}

/// Register a tree with an optional completion callback
pub(crate) fn launch(
    scheduler: &TweenScheduler,
    root: impl Into<TweenNode>,
    on_complete: Option<Callback>,
) -> TweenId {
    let handle = TweenHandle::new(root);
    let handle = match on_complete {
        Some(callback) => handle.on_complete(callback),
        None => handle,
    };
    scheduler.register(handle)
}
