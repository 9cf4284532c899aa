//! Preset registry
//!
//! Maps preset identifiers to factories. Every `create` call runs the
//! factory again, so instances never share configuration.

use crate::error::{PresetError, Result};
use crate::id::PresetId;
use crate::presets::Preset;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Builds a fresh preset
pub type PresetFactory = Box<dyn Fn() -> Preset>;

#[derive(Default)]
pub struct PresetRegistry {
    factories: FxHashMap<PresetId, PresetFactory>,
}

impl std::fmt::Debug for PresetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetRegistry")
            .field("ids", &self.list_ids())
            .finish()
    }
}

impl PresetRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in preset at its default configuration
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for id in PresetId::ALL {
            registry.register(id, move || Preset::default_for(id));
        }
        registry
    }

    /// Register or replace the factory for `id`, returning the previous one
    pub fn register<F>(&mut self, id: PresetId, factory: F) -> Option<PresetFactory>
    where
        F: Fn() -> Preset + 'static,
    {
        debug!(preset = %id, "registered preset factory");
        self.factories.insert(id, Box::new(factory))
    }

    /// Build a new preset instance
    pub fn create(&self, id: PresetId) -> Result<Preset> {
        self.factories
            .get(&id)
            .map(|factory| factory())
            .ok_or_else(|| PresetError::UnknownPreset(id.to_string()))
    }

    /// Build a new preset instance from a name such as `"paper_drop"` or `"PaperDrop"`
    pub fn create_named(&self, name: &str) -> Result<Preset> {
        self.create(name.parse()?)
    }

    /// Registered identifiers in catalog order
    pub fn list_ids(&self) -> Vec<PresetId> {
        let mut ids: Vec<PresetId> = self.factories.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn contains(&self, id: PresetId) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
