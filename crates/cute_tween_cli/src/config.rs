//! Catalog configuration file handling

use anyhow::{Context, Result};
use cute_tween_presets::{Preset, PresetRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level catalog configuration (e.g. `animations.toml`)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub animations: Vec<AnimationEntry>,
}

/// How the headless player steps time
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Simulated frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Stop after this many seconds even if animations are still running
    #[serde(default = "default_seconds")]
    pub seconds: f32,
    /// Seed for presets with randomness that do not set their own
    #[serde(default)]
    pub seed: Option<u64>,
    /// Log the transform every N frames (0 disables frame logs)
    #[serde(default = "default_log_every")]
    pub log_every: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_seconds() -> f32 {
    5.0
}

fn default_log_every() -> u32 {
    10
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            seconds: default_seconds(),
            seed: None,
            log_every: default_log_every(),
        }
    }
}

/// One named animation: a preset tag plus any of its fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationEntry {
    pub name: String,
    /// Give the simulated target an opacity channel
    #[serde(default = "default_true")]
    pub opacity: bool,
    #[serde(flatten)]
    pub preset: Preset,
}

fn default_true() -> bool {
    true
}

impl CatalogConfig {
    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("No catalog found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content)?;
        if config.player.fps == 0 {
            anyhow::bail!("player.fps must be at least 1");
        }
        Ok(config)
    }

    /// A catalog with one entry per built-in preset, named after it
    pub fn builtin() -> Result<Self> {
        let registry = PresetRegistry::builtin();
        let animations = registry
            .list_ids()
            .into_iter()
            .map(|id| {
                Ok(AnimationEntry {
                    name: id.as_str().to_string(),
                    opacity: true,
                    preset: registry.create(id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            player: PlayerConfig::default(),
            animations,
        })
    }

    /// Find an animation entry by name
    pub fn animation(&self, name: &str) -> Option<&AnimationEntry> {
        self.animations.iter().find(|entry| entry.name == name)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize catalog")
    }
}
