//! Preset identifiers

use crate::error::PresetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the built-in presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetId {
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
}

impl PresetId {
    pub const ALL: [PresetId; 18] = [
        PresetId::Appear,
        PresetId::Bounce,
        PresetId::Shake,
        PresetId::Spin,
        PresetId::Slide,
        PresetId::Pulse,
        PresetId::Swing,
        PresetId::PaperDrop,
        PresetId::Jump,
        PresetId::Tilt,
        PresetId::SquishyPop,
        PresetId::FloatingHover,
        PresetId::ElasticStretch,
        PresetId::Press,
        PresetId::WigglyDance,
        PresetId::PageFlip,
        PresetId::BouncyEntrance,
        PresetId::CardHover,
    ];

    /// Snake-case name, as used in configs and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::Appear => "appear",
            PresetId::Bounce => "bounce",
            PresetId::Shake => "shake",
            PresetId::Spin => "spin",
            PresetId::Slide => "slide",
            PresetId::Pulse => "pulse",
            PresetId::Swing => "swing",
            PresetId::PaperDrop => "paper_drop",
            PresetId::Jump => "jump",
            PresetId::Tilt => "tilt",
            PresetId::SquishyPop => "squishy_pop",
            PresetId::FloatingHover => "floating_hover",
            PresetId::ElasticStretch => "elastic_stretch",
            PresetId::Press => "press",
            PresetId::WigglyDance => "wiggly_dance",
            PresetId::PageFlip => "page_flip",
            PresetId::BouncyEntrance => "bouncy_entrance",
            PresetId::CardHover => "card_hover",
        }
    }

    /// One-line description for listings
    pub fn description(self) -> &'static str {
        match self {
            PresetId::Appear => "scale up from nothing while fading in",
            PresetId::Bounce => "grow in, overshoot, settle",
            PresetId::Shake => "decaying positional jitter for errors and warnings",
            PresetId::Spin => "rotate by a full turn",
            PresetId::Slide => "slide in from an offset",
            PresetId::Pulse => "grow and shrink back",
            PresetId::Swing => "wobble as if hanging",
            PresetId::PaperDrop => "spin in like falling paper",
            PresetId::Jump => "hop in place a few times",
            PresetId::Tilt => "tilt forward and back",
            PresetId::SquishyPop => "squish then pop back, for buttons",
            PresetId::FloatingHover => "gentle endless up and down float",
            PresetId::ElasticStretch => "stretch sideways and snap back",
            PresetId::Press => "quick push down and release",
            PresetId::WigglyDance => "playful side to side wiggle",
            PresetId::PageFlip => "3D page flip",
            PresetId::BouncyEntrance => "drop in from below with a bounce",
            PresetId::CardHover => "lift and tilt a card",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `paper_drop`, `paper-drop`, `PaperDrop` and other spellings
impl FromStr for PresetId {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        PresetId::ALL
            .into_iter()
            .find(|id| id.as_str().replace('_', "") == normalized)
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}
