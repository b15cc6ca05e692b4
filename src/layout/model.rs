//! Versioned per-user layout state.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::SizePreset;
use crate::widgets::{WidgetId, WidgetRegistry};

/// Schema version written into every stored layout.
///
/// Stored layouts carrying any other version are discarded on load.
pub const SCHEMA_VERSION: u32 = 2;

/// A user's dashboard layout.
///
/// Invariants (upheld by [`normalize`](super::normalize) and the controller):
/// `order` has no duplicates, every non-removable widget is present, and
/// `sizes` has an entry for exactly the ids in `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutModel {
    /// Schema version.
    pub version: u32,
    /// Widgets in display order.
    pub order: Vec<WidgetId>,
    /// Size preset per widget.
    pub sizes: BTreeMap<WidgetId, SizePreset>,
}

impl LayoutModel {
    /// An empty layout at the current schema version.
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            order: Vec::new(),
            sizes: BTreeMap::new(),
        }
    }

    /// Number of widgets in the layout.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the layout holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `id` is in the layout.
    pub fn contains(&self, id: &str) -> bool {
        self.order.iter().any(|w| w.as_str() == id)
    }

    /// Preset recorded for `id`, if any.
    pub fn preset_of(&self, id: &str) -> Option<SizePreset> {
        self.sizes.get(id).copied()
    }

    /// Appends `id` at `preset` unless it is already present.
    ///
    /// Returns `true` if the layout changed.
    pub(crate) fn push(&mut self, id: WidgetId, preset: SizePreset) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.sizes.insert(id.clone(), preset);
        self.order.push(id);
        true
    }

    /// Removes `id` from both order and sizes.
    ///
    /// Returns `true` if the layout changed.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|w| w.as_str() != id);
        self.sizes.remove(id);
        self.order.len() != before
    }

    /// Appends every missing non-removable widget at its default preset.
    ///
    /// Returns `true` if anything was appended.
    pub(crate) fn ensure_mandatory(&mut self, registry: &WidgetRegistry) -> bool {
        let mut changed = false;
        for id in registry.mandatory_ids() {
            if let Some(def) = registry.lookup(id) {
                changed |= self.push(WidgetId::from(id), def.default_preset);
            }
        }
        changed
    }

    /// Serializes the layout into its stored JSON shape.
    pub fn to_value(&self) -> Value {
        json!({
            "version": self.version,
            "order": self.order,
            "sizes": self.sizes,
        })
    }
}
