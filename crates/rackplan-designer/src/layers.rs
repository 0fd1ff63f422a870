//! Layer registry: per-category visibility and lock flags.

use crate::model::ElementType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Layer an element type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerCategory {
    Shelves,
    Docks,
    Offices,
    Services,
    Zones,
}

impl LayerCategory {
    pub const ALL: [LayerCategory; 5] = [
        LayerCategory::Shelves,
        LayerCategory::Docks,
        LayerCategory::Offices,
        LayerCategory::Services,
        LayerCategory::Zones,
    ];

    /// Fixed type → category mapping.
    pub fn for_type(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Shelf => Self::Shelves,
            ElementType::Dock => Self::Docks,
            ElementType::Office => Self::Offices,
            ElementType::Service => Self::Services,
            ElementType::Zone => Self::Zones,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shelves => "shelves",
            Self::Docks => "docks",
            Self::Offices => "offices",
            Self::Services => "services",
            Self::Zones => "zones",
        }
    }
}

impl std::fmt::Display for LayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Flags of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerState {
    pub visible: bool,
    pub locked: bool,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            visible: true,
            locked: false,
        }
    }
}

/// Registry of all layers. Every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRegistry {
    layers: BTreeMap<LayerCategory, LayerState>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self {
            layers: LayerCategory::ALL
                .into_iter()
                .map(|c| (c, LayerState::default()))
                .collect(),
        }
    }

    pub fn layer(&self, category: LayerCategory) -> LayerState {
        self.layers.get(&category).copied().unwrap_or_default()
    }

    fn layer_mut(&mut self, category: LayerCategory) -> &mut LayerState {
        self.layers.entry(category).or_default()
    }

    pub fn set_visible(&mut self, category: LayerCategory, visible: bool) {
        self.layer_mut(category).visible = visible;
    }

    pub fn set_locked(&mut self, category: LayerCategory, locked: bool) {
        tracing::debug!("Layer {} locked={}", category, locked);
        self.layer_mut(category).locked = locked;
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_visibility(&mut self, category: LayerCategory) -> bool {
        let layer = self.layer_mut(category);
        layer.visible = !layer.visible;
        layer.visible
    }

    /// Flips the lock and returns the new value.
    pub fn toggle_lock(&mut self, category: LayerCategory) -> bool {
        let layer = self.layer_mut(category);
        layer.locked = !layer.locked;
        layer.locked
    }

    pub fn is_element_visible(&self, element_type: ElementType) -> bool {
        self.layer(LayerCategory::for_type(element_type)).visible
    }

    pub fn is_element_locked(&self, element_type: ElementType) -> bool {
        self.layer(LayerCategory::for_type(element_type)).locked
    }

    /// Layers in display order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerCategory, LayerState)> + '_ {
        self.layers.iter().map(|(c, s)| (*c, *s))
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_layers_visible_and_unlocked_by_default() {
        let registry = LayerRegistry::new();
        for t in ElementType::ALL {
            assert!(registry.is_element_visible(t));
            assert!(!registry.is_element_locked(t));
        }
        assert_eq!(registry.iter().count(), 5);
    }

    #[test]
    fn test_flags_are_independent_per_category() {
        let mut registry = LayerRegistry::new();
        registry.set_locked(LayerCategory::Shelves, true);
        assert!(!registry.toggle_visibility(LayerCategory::Docks));

        assert!(registry.is_element_locked(ElementType::Shelf));
        assert!(registry.is_element_visible(ElementType::Shelf));
        assert!(!registry.is_element_visible(ElementType::Dock));
        assert!(!registry.is_element_locked(ElementType::Dock));
    }

    #[test]
    fn test_office_and_service_have_separate_layers() {
        let mut registry = LayerRegistry::new();
        registry.toggle_lock(LayerCategory::Services);
        assert!(registry.is_element_locked(ElementType::Service));
        assert!(!registry.is_element_locked(ElementType::Office));
    }
}
